use image::ImageFormat;

/// 提取结果写入文件时使用的结束判定阈值 (字节)。
/// 连续 `8 * FILE_SANITIZE_COUNT` 个相同比特才被视为数据结束。
pub const FILE_SANITIZE_COUNT: usize = 12;

/// 提取结果以文本形式打印时使用的结束判定阈值 (字节)。
pub const TEXT_SANITIZE_COUNT: usize = 2;

/// 长度前缀格式中，载荷字节数所占的比特数 (大端 `u32`)。
pub const LENGTH_PREFIX_BITS: usize = 32;

/// 未指定输出路径时，嵌入结果图像文件名的前缀。
pub const DEFAULT_OUTPUT_PREFIX: &str = "embedded_";

/// 会破坏最低有效位的有损图像格式扩展名。
pub const LOSSY_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// 嵌入结果可以使用的无损输出格式。
pub const LOSSLESS_OUTPUT_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Qoi,
];

/// 以文本方式读取的载荷文件扩展名，其余文件按二进制读取。
pub const TEXT_FILE_EXTENSION: &str = "txt";
