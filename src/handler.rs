//! # 命令处理逻辑模块
//!
//! 包含嵌入与提取两种模式的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像解码与编码、调用核心隐写算法以及向用户报告结果。

use crate::bits::{bits_to_bytes, bits_to_text};
use crate::cli::{EmbedArgs, ExtractArgs, PayloadSource};
use crate::constants::{
    DEFAULT_OUTPUT_PREFIX, FILE_SANITIZE_COUNT, LOSSLESS_OUTPUT_FORMATS, LOSSY_EXTENSIONS,
    TEXT_FILE_EXTENSION, TEXT_SANITIZE_COUNT,
};
use crate::error::StegoError;
use crate::steganography::embed;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, ImageReader, RgbImage};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 待嵌入的载荷内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    /// 载荷的原始字节，文本按 UTF-8 编码。
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// 提取模式的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// 图像中没有找到数据。
    Empty,
    /// 解码后打印的文本。
    Text(String),
    /// 写入文件的字节数。
    File { path: PathBuf, bytes: usize },
}

/// 处理嵌入模式的执行逻辑。
///
/// 负责读取图像与载荷、检查方向与容量、调用嵌入引擎，最后按目标文件扩展名
/// 选择的无损格式 (无扩展名时为 PNG) 写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与嵌入选项的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 图像或载荷文件不存在或无法读取。
/// * 图像为有损格式。
/// * 目标文件扩展名不是 PNG、BMP、TIFF 或 QOI。
/// * 对角线方向用于非正方形图像。
/// * 图像在该方向下没有足够的空间容纳载荷。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    ensure_exists(&args.image)?;
    ensure_lossless(&args.image)?;

    let dest = args
        .dest
        .unwrap_or_else(|| default_embed_path(&args.image));
    let encoding = output_format(&dest)?;

    let payload = load_payload(&args.payload)?;
    let mut picture = open_rgb(&args.image)?;

    let bits = args.format.encode(payload.as_bytes())?;
    log::info!(
        "Embedding {} bytes {} with {} format",
        payload.as_bytes().len(),
        args.direction,
        args.format
    );

    embed(&mut picture, &bits, args.direction).with_context(|| {
        format!(
            "Failed to embed data into {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    ensure_writable(&dest, args.force)?;

    let mut encoded = Cursor::new(Vec::new());
    picture
        .write_to(&mut encoded, encoding)
        .with_context(|| format!("Failed to encode the embedded image as {encoding:?}"))?;
    write_atomic(&dest, encoded.get_ref())?;

    println!(
        "Data embedded successfully and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理提取模式的执行逻辑。
///
/// 负责读取图像、调用提取引擎，并根据是否指定了输出路径，将结果写入文件或以文本形式打印。
/// 返回的 [`Extraction`] 描述了实际输出的内容。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与提取选项的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 图像文件不存在或无法解码。
/// * 对角线方向用于非正方形图像。
/// * 长度前缀格式下读到的长度无效。
/// * 输出文件已存在且未指定 `--force`，或无法写入。
pub fn handle_extract(args: ExtractArgs) -> Result<Extraction> {
    ensure_exists(&args.image)?;
    ensure_lossless(&args.image)?;

    let picture = open_rgb(&args.image)?;
    let sanitize_count = args.sanitize_count.unwrap_or(if args.output.is_some() {
        FILE_SANITIZE_COUNT
    } else {
        TEXT_SANITIZE_COUNT
    });

    log::info!(
        "Extracting data {} with {} format",
        args.direction,
        args.format
    );
    let bits = args
        .format
        .recover(&picture, args.direction, sanitize_count)
        .with_context(|| {
            format!(
                "Failed to extract data from {}",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    if bits.is_empty() {
        println!("{}", "No data was found.".yellow().bold());
        return Ok(Extraction::Empty);
    }

    match args.output {
        Some(output) => {
            ensure_writable(&output, args.force)?;
            let bytes = bits_to_bytes(&bits);
            write_atomic(&output, &bytes)?;
            println!(
                "Successfully extracted {} bytes to {}",
                bytes.len().to_string().green().bold(),
                output.to_string_lossy().green().bold()
            );
            Ok(Extraction::File {
                path: output,
                bytes: bytes.len(),
            })
        }
        None => {
            let text = bits_to_text(&bits);
            println!("Extracted data: {text}");
            Ok(Extraction::Text(text))
        }
    }
}

/// 嵌入结果的默认路径：输入图像所在目录下的 `embedded_<文件名>.png`。
pub fn default_embed_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    image.with_file_name(format!("{DEFAULT_OUTPUT_PREFIX}{stem}.png"))
}

fn load_payload(source: &PayloadSource) -> Result<Payload> {
    match source {
        PayloadSource::Text(text) => {
            log::info!("Embedding data: {text}");
            Ok(Payload::Text(text.clone()))
        }
        PayloadSource::File(path) => {
            ensure_exists(path)?;
            log::info!("Embedding file: {}", path.display());

            let is_text = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_FILE_EXTENSION));
            let read_error = || {
                format!(
                    "Unable to read payload file: {}",
                    path.to_string_lossy().red().bold()
                )
            };

            if is_text {
                fs::read_to_string(path).map(Payload::Text).with_context(read_error)
            } else {
                fs::read(path).map(Payload::Bytes).with_context(read_error)
            }
        }
    }
}

/// 按文件内容 (而非扩展名) 识别格式并解码为 RGB 图像，拒绝有损编码的输入。
fn open_rgb(path: &Path) -> Result<RgbImage> {
    let read_error = || {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    };

    let data = fs::read(path).with_context(read_error)?;
    let reader = ImageReader::new(Cursor::new(data.as_slice()))
        .with_guessed_format()
        .with_context(read_error)?;

    match reader.format() {
        Some(ImageFormat::Jpeg) => return Err(StegoError::LossyFormat(path.to_path_buf()).into()),
        Some(ImageFormat::WebP) if webp_is_lossy(&data) => {
            return Err(StegoError::LossyFormat(path.to_path_buf()).into());
        }
        _ => {}
    }

    let picture = reader.decode().with_context(read_error)?;
    log::debug!("Decoded {}x{} image", picture.width(), picture.height());
    Ok(picture.to_rgb8())
}

/// WebP 按 RIFF 块区分：`VP8 ` 为有损编码，`VP8L` 为无损编码。
fn webp_is_lossy(data: &[u8]) -> bool {
    let mut offset: usize = 12;
    while let Some(header) = data.get(offset..offset.saturating_add(8)) {
        match &header[..4] {
            b"VP8 " => return true,
            b"VP8L" => return false,
            _ => {}
        }
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        offset = offset.saturating_add(8 + size + (size & 1));
    }
    false
}

/// 根据目标扩展名选择编码格式，只接受能精确保留像素值的格式。
fn output_format(dest: &Path) -> Result<ImageFormat> {
    let format = match dest.extension() {
        None => ImageFormat::Png,
        Some(_) => ImageFormat::from_path(dest)
            .map_err(|_| StegoError::UnsupportedOutputFormat(dest.to_path_buf()))?,
    };

    if !LOSSLESS_OUTPUT_FORMATS.contains(&format) {
        return Err(StegoError::UnsupportedOutputFormat(dest.to_path_buf()).into());
    }
    Ok(format)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(StegoError::FileNotFound(path.to_path_buf()).into());
    }
    Ok(())
}

fn ensure_lossless(path: &Path) -> Result<()> {
    let lossy = path.extension().is_some_and(|ext| {
        LOSSY_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    });
    if lossy {
        return Err(StegoError::LossyFormat(path.to_path_buf()).into());
    }
    Ok(())
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 先写入同目录下的临时文件，再整体替换目标文件，失败时目标文件保持不变。
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = || {
        format!(
            "Unable to write to target file: {}",
            path.to_string_lossy().red().bold()
        )
    };

    let mut file = NamedTempFile::new_in(dir).with_context(write_error)?;
    file.write_all(contents).with_context(write_error)?;
    file.persist(path).map_err(|e| e.error).with_context(write_error)?;
    Ok(())
}
