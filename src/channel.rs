//! 单个 8 位通道值的比特读写。只修改最低有效位时，每个通道的失真不超过 ±1。

use crate::error::StegoError;

/// 将 `value` 第 `position` 位 (0 为最低位) 设置为 `bit`，其余位保持不变。
///
/// # Errors
///
/// * `bit` 不是 0 或 1 时返回 [`StegoError::InvalidBit`]。
/// * `position` 大于 7 时返回 [`StegoError::InvalidPosition`]。
pub fn set_bit(value: u8, bit: u8, position: u8) -> Result<u8, StegoError> {
    if bit > 1 {
        return Err(StegoError::InvalidBit(bit));
    }
    if position > 7 {
        return Err(StegoError::InvalidPosition(position));
    }

    Ok((value & !(1 << position)) | (bit << position))
}

/// 设置最低有效位。
pub fn set_lsb(value: u8, bit: u8) -> Result<u8, StegoError> {
    set_bit(value, bit, 0)
}

/// 读取最低有效位。
pub fn get_lsb(value: u8) -> u8 {
    value & 1
}
