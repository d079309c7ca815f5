//! # 载荷格式模块
//!
//! 两种互不兼容的载荷布局，由 [`Format`] 标记区分：
//!
//! * [`Format::Heuristic`]：只写入载荷本身，提取时依靠末尾连续相同比特推断结束位置。
//! * [`Format::LengthPrefixed`]：先写入 32 位大端的载荷字节数，再写入载荷，
//!   提取时按长度精确读取。

use crate::addressing::Direction;
use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::constants::LENGTH_PREFIX_BITS;
use crate::error::StegoError;
use crate::steganography::{extract, extract_exact};
use clap::ValueEnum;
use image::RgbImage;

/// 载荷在图像中的布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// 不保存长度，提取时用启发式判定结束。
    #[default]
    Heuristic,
    /// 以 32 位长度前缀开头。
    LengthPrefixed,
}

impl Format {
    /// 将载荷字节转换为待嵌入的比特序列。
    ///
    /// # Errors
    ///
    /// 长度前缀格式下，载荷超过 `u32::MAX` 字节时返回 [`StegoError::PayloadTooLarge`]。
    pub fn encode(self, payload: &[u8]) -> Result<Vec<u8>, StegoError> {
        match self {
            Self::Heuristic => Ok(bytes_to_bits(payload)),
            Self::LengthPrefixed => {
                let length = u32::try_from(payload.len())
                    .map_err(|_| StegoError::PayloadTooLarge(payload.len()))?;
                let mut bits = bytes_to_bits(&length.to_be_bytes());
                bits.extend(bytes_to_bits(payload));
                Ok(bits)
            }
        }
    }

    /// 从图像中读回载荷比特。
    ///
    /// `sanitize_count` 只在启发式格式下使用。
    ///
    /// # Errors
    ///
    /// * 启发式格式下的错误见 [`extract`]。
    /// * 长度前缀声明的大小超出图像容量时返回 [`StegoError::InvalidLengthPrefix`]。
    pub fn recover(
        self,
        image: &RgbImage,
        direction: Direction,
        sanitize_count: usize,
    ) -> Result<Vec<u8>, StegoError> {
        match self {
            Self::Heuristic => extract(image, direction, sanitize_count),
            Self::LengthPrefixed => {
                let (width, height) = image.dimensions();
                let capacity = direction.capacity(width, height);
                if capacity < LENGTH_PREFIX_BITS {
                    return Ok(Vec::new());
                }

                let prefix = bits_to_bytes(&extract_exact(image, direction, LENGTH_PREFIX_BITS)?);
                let declared = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
                let available = (capacity - LENGTH_PREFIX_BITS) / 8;
                if declared > available {
                    return Err(StegoError::InvalidLengthPrefix {
                        declared,
                        capacity: available,
                    });
                }

                log::debug!("Length prefix declares {declared} bytes");
                let mut bits = extract_exact(image, direction, LENGTH_PREFIX_BITS + declared * 8)?;
                bits.drain(..LENGTH_PREFIX_BITS);
                Ok(bits)
            }
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Heuristic => "heuristic",
            Self::LengthPrefixed => "length-prefixed",
        };
        f.write_str(name)
    }
}
