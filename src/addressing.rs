//! # 像素寻址模块
//!
//! 将线性的比特偏移映射为像素坐标与通道。映射只依赖 (偏移, 方向, 宽, 高)，
//! 嵌入与提取共用同一套函数，从而保证两者完全对称。

use crate::error::StegoError;
use clap::ValueEnum;

/// 遍历图像像素的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Direction {
    /// 逐行遍历：`(i % W, i / W)`。
    #[default]
    Horizontal,
    /// 逐列遍历：`(i / H, i % H)`。
    Vertical,
    /// 沿主对角线遍历：`(i, i)`，要求图像为正方形。
    Diagonal,
}

/// 某个比特偏移所对应的像素坐标与通道下标 (0 = R, 1 = G, 2 = B)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub x: u32,
    pub y: u32,
    pub channel: usize,
}

impl Direction {
    /// 该方向下图像最多能容纳的比特数，每个像素一个比特。
    pub fn capacity(self, width: u32, height: u32) -> usize {
        match self {
            Self::Horizontal | Self::Vertical => width as usize * height as usize,
            Self::Diagonal => width.min(height) as usize,
        }
    }

    /// 检查图像形状是否适用于该方向。
    ///
    /// # Errors
    ///
    /// 对角线方向遇到非正方形图像时返回 [`StegoError::ShapeMismatch`]。
    pub fn check_shape(self, width: u32, height: u32) -> Result<(), StegoError> {
        if self == Self::Diagonal && width != height {
            return Err(StegoError::ShapeMismatch { width, height });
        }
        Ok(())
    }

    /// 计算第 `offset` 个比特所在的像素与通道。
    ///
    /// 超出容量时返回 `None`。通道按 R→G→B 循环，与方向无关。
    pub fn locate(self, offset: usize, width: u32, height: u32) -> Option<Location> {
        if offset >= self.capacity(width, height) {
            return None;
        }

        let (x, y) = match self {
            Self::Horizontal => (offset % width as usize, offset / width as usize),
            Self::Vertical => (offset / height as usize, offset % height as usize),
            Self::Diagonal => (offset, offset),
        };

        Some(Location {
            x: x as u32,
            y: y as u32,
            channel: offset % 3,
        })
    }

    /// 按遍历顺序依次给出所有可用位置。
    pub fn walk(self, width: u32, height: u32) -> impl Iterator<Item = Location> {
        (0..self.capacity(width, height)).filter_map(move |offset| self.locate(offset, width, height))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Diagonal => "diagonal",
        };
        f.write_str(name)
    }
}
