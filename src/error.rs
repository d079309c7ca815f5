//! # 错误类型模块
//!
//! [`StegoError`] 涵盖核心隐写流程中所有可预期的失败情况。
//! 命令处理层通过 `anyhow` 为这些错误附加上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 隐写核心与文件处理中可能出现的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StegoError {
    /// 图像或载荷文件不存在。
    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// 对角线方向只适用于正方形图像。
    #[error("Diagonal embedding and extraction only work on square images (got {width}x{height})")]
    ShapeMismatch { width: u32, height: u32 },

    /// 载荷比特数超过当前方向下图像的容量。
    #[error(
        "Not enough space to embed data: {required} bits required, at most {capacity} bits ({} bytes) available",
        .capacity / 8
    )]
    CapacityExceeded { required: usize, capacity: usize },

    /// 待写入的比特既不是 0 也不是 1。
    #[error("Bit value must be 0 or 1, got {0}")]
    InvalidBit(u8),

    /// 比特位置超出 8 位通道值的范围。
    #[error("Bit position must be between 0 and 7 included, got {0}")]
    InvalidPosition(u8),

    /// 结束判定阈值必须至少为 1 字节。
    #[error("Sanitize count must be at least 1")]
    InvalidSanitizeCount,

    /// 长度前缀声明的载荷大于图像可容纳的大小。
    #[error("Length prefix declares {declared} bytes but only {capacity} bytes fit in this image")]
    InvalidLengthPrefix { declared: usize, capacity: usize },

    /// 载荷长度无法写入 32 位长度前缀。
    #[error("Payload of {0} bytes is too large for a 32-bit length prefix")]
    PayloadTooLarge(usize),

    /// 嵌入结果只能保存为无损格式。
    #[error("Output image must be PNG, BMP, TIFF or QOI: {}", .0.display())]
    UnsupportedOutputFormat(PathBuf),

    /// 有损格式会破坏最低有效位。
    #[error("Lossy image formats corrupt hidden bits, use a lossless format such as PNG: {}", .0.display())]
    LossyFormat(PathBuf),
}
