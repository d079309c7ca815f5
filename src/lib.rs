//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：比特编解码、像素寻址、嵌入与提取引擎，
//! 以及命令行和文件处理的外围代码。

// 声明库包含的所有模块。

pub mod addressing;
pub mod bits;
pub mod channel;
pub mod cli;
pub mod constants;
pub mod error;
pub mod format;
pub mod handler;
pub mod steganography;
