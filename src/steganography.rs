//! # 嵌入与提取引擎
//!
//! [`embed`] 将比特序列逐个写入像素通道的最低有效位；[`extract`] 按相同顺序读回，
//! 并依靠末尾连续相同比特的长度推断数据在哪里结束，因为图像中并不保存载荷长度。

use crate::addressing::Direction;
use crate::channel::{get_lsb, set_lsb};
use crate::error::StegoError;
use image::RgbImage;

/// 将比特序列写入图像。
///
/// 所有校验都在修改任何像素之前完成，失败时图像保持原样。
/// 不会写入任何结束标记。
///
/// # Errors
///
/// * 对角线方向遇到非正方形图像时返回 [`StegoError::ShapeMismatch`]。
/// * 比特序列含有 0/1 以外的值时返回 [`StegoError::InvalidBit`]。
/// * 比特数超过容量时返回 [`StegoError::CapacityExceeded`]。
pub fn embed(image: &mut RgbImage, bits: &[u8], direction: Direction) -> Result<(), StegoError> {
    let (width, height) = image.dimensions();
    direction.check_shape(width, height)?;

    if let Some(&bad) = bits.iter().find(|&&bit| bit > 1) {
        return Err(StegoError::InvalidBit(bad));
    }

    let capacity = direction.capacity(width, height);
    if bits.len() > capacity {
        return Err(StegoError::CapacityExceeded {
            required: bits.len(),
            capacity,
        });
    }

    for (location, &bit) in direction.walk(width, height).zip(bits) {
        let pixel = image.get_pixel_mut(location.x, location.y);
        let channel = &mut pixel.0[location.channel];
        *channel = set_lsb(*channel, bit)?;
    }

    log::debug!("Embedded {} bits {direction}", bits.len());
    Ok(())
}

/// 按遍历顺序读取隐藏的比特，并推断数据的结束位置。
///
/// 对角线方向总是读取整条对角线，不做结束判定。
///
/// 水平与垂直方向每读入一个比特后检查：若已读取至少 `8 * (K + 1)` 个比特，且最后
/// `8 * K` 个比特全部相同 (全 0 或全 1)，则停止读取并丢弃这 `8 * K` 个比特。
/// 若剩余比特也全部属于同一段连续相同比特，说明图像中没有数据，返回空序列。
///
/// 这是一种近似：以长串相同比特结尾的载荷可能会被截断。
/// `K` 越大越不容易误判，但需要更长的空白区域才能判定结束。
///
/// # Errors
///
/// * 水平或垂直方向下 `sanitize_count` 为 0 时返回 [`StegoError::InvalidSanitizeCount`]。
/// * 对角线方向遇到非正方形图像时返回 [`StegoError::ShapeMismatch`]。
pub fn extract(
    image: &RgbImage,
    direction: Direction,
    sanitize_count: usize,
) -> Result<Vec<u8>, StegoError> {
    let (width, height) = image.dimensions();
    direction.check_shape(width, height)?;

    if direction == Direction::Diagonal {
        return Ok(read_bits(image, direction).collect());
    }

    if sanitize_count == 0 {
        return Err(StegoError::InvalidSanitizeCount);
    }

    let window = 8 * sanitize_count;
    let mut bits = Vec::new();
    // 末尾连续相同比特的长度，等价于每次比较最后 `window` 个比特。
    let mut run = 0usize;

    for bit in read_bits(image, direction) {
        run = match bits.last() {
            Some(&previous) if previous == bit => run + 1,
            _ => 1,
        };
        bits.push(bit);

        if bits.len() >= window + 8 && run >= window {
            if run == bits.len() {
                log::debug!("Only a run of identical bits was found");
                bits.clear();
            } else {
                bits.truncate(bits.len() - window);
            }
            break;
        }
    }

    log::debug!("Extracted {} bits {direction}", bits.len());
    Ok(bits)
}

/// 按遍历顺序精确读取前 `count` 个比特，不做结束判定。
///
/// # Errors
///
/// * 对角线方向遇到非正方形图像时返回 [`StegoError::ShapeMismatch`]。
/// * `count` 超过容量时返回 [`StegoError::CapacityExceeded`]。
pub fn extract_exact(
    image: &RgbImage,
    direction: Direction,
    count: usize,
) -> Result<Vec<u8>, StegoError> {
    let (width, height) = image.dimensions();
    direction.check_shape(width, height)?;

    let capacity = direction.capacity(width, height);
    if count > capacity {
        return Err(StegoError::CapacityExceeded {
            required: count,
            capacity,
        });
    }

    Ok(read_bits(image, direction).take(count).collect())
}

fn read_bits(image: &RgbImage, direction: Direction) -> impl Iterator<Item = u8> + '_ {
    let (width, height) = image.dimensions();
    direction
        .walk(width, height)
        .map(move |location| get_lsb(image.get_pixel(location.x, location.y).0[location.channel]))
}
