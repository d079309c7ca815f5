//! # 比特编解码模块
//!
//! 在字节序列与比特序列之间相互转换。比特序列以 `u8` 保存，每个元素为 0 或 1，
//! 每个字节按最高位优先展开为 8 个比特。

/// 将字节序列展开为比特序列 (最高位优先)。
///
/// 结果长度恒为 `8 * bytes.len()`。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
        .collect()
}

/// 将文本的 UTF-8 编码展开为比特序列。
///
/// 非 ASCII 字符会占用多个字节，因此也能完整往返。
pub fn text_to_bits(text: &str) -> Vec<u8> {
    bytes_to_bits(text.as_bytes())
}

/// 将比特序列按 8 位一组解码为文本。
///
/// 末尾不足 8 位的比特会被丢弃；非法的 UTF-8 序列替换为 `U+FFFD`。
pub fn bits_to_text(bits: &[u8]) -> String {
    let bytes: Vec<u8> = bits.chunks_exact(8).map(pack_byte).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// 将比特序列按 8 位一组转换为字节。
///
/// 若长度不是 8 的倍数，最后一组在右侧补 0 后再转换。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| pack_byte(chunk) << (8 - chunk.len()))
        .collect()
}

fn pack_byte(chunk: &[u8]) -> u8 {
    chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}
