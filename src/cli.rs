//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构。解析结果通过 [`Cli::into_command`]
//! 转换为显式的 [`EmbedArgs`] 或 [`ExtractArgs`]，再传递给处理函数，
//! 核心逻辑不依赖任何全局的参数状态。

use crate::addressing::Direction;
use crate::format::Format;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可按水平、垂直或对角线方向
/// 在无损格式图像 (如 PNG, BMP) 中嵌入或提取文本与文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可按水平、垂直或对角线方向在无损格式图像 (如 PNG, BMP) 中嵌入或提取文本与文件。\n提供 --text 或 --file 时进入嵌入模式，否则进入提取模式。"
)]
#[command(group(ArgGroup::new("payload").args(["text", "file"])))]
pub struct Cli {
    /// 用于嵌入或提取数据的图像文件路径。
    pub image: PathBuf,

    /// 要嵌入的文本。
    #[arg(short, long)]
    pub text: Option<String>,

    /// 要嵌入的文件 (.txt 按文本读取，其余按二进制读取)。
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 嵌入与提取时遍历像素的方向。
    #[arg(short, long, value_enum, default_value_t = Direction::Horizontal)]
    pub direction: Direction,

    /// 嵌入模式下为结果图像路径；提取模式下为保存提取数据的文件路径。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 载荷布局：不保存长度的启发式格式，或带 32 位长度前缀的格式。
    #[arg(long, value_enum, default_value_t = Format::Heuristic)]
    pub format: Format,

    /// 判定数据结束所需的连续相同字节数 (默认：写入文件时 12，打印文本时 2)。
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub sanitize_count: Option<u16>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,

    /// 输出详细的处理过程。
    #[arg(short, long)]
    pub verbose: bool,
}

/// 解析后的运行模式。
#[derive(Debug)]
pub enum Command {
    /// 将文本或文件嵌入图像。
    Embed(EmbedArgs),

    /// 从图像中提取数据。
    Extract(ExtractArgs),
}

/// 载荷来源。
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// 命令行上直接给出的文本。
    Text(String),
    /// 从文件读取。
    File(PathBuf),
}

/// 嵌入模式所需的参数。
#[derive(Debug, Clone)]
pub struct EmbedArgs {
    pub image: PathBuf,
    pub payload: PayloadSource,
    pub direction: Direction,
    pub format: Format,
    /// 结果图像路径，为空时在输入图像旁生成默认文件名。
    pub dest: Option<PathBuf>,
    pub force: bool,
}

/// 提取模式所需的参数。
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    pub image: PathBuf,
    pub direction: Direction,
    pub format: Format,
    /// 提取数据的保存路径，为空时以文本形式打印。
    pub output: Option<PathBuf>,
    /// 覆盖默认的结束判定阈值。
    pub sanitize_count: Option<usize>,
    pub force: bool,
}

impl Cli {
    /// 根据是否提供了载荷选择嵌入或提取模式。
    pub fn into_command(self) -> Command {
        let payload = match (self.text, self.file) {
            (_, Some(path)) => Some(PayloadSource::File(path)),
            (Some(text), None) => Some(PayloadSource::Text(text)),
            (None, None) => None,
        };

        match payload {
            Some(payload) => Command::Embed(EmbedArgs {
                image: self.image,
                payload,
                direction: self.direction,
                format: self.format,
                dest: self.output,
                force: self.force,
            }),
            None => Command::Extract(ExtractArgs {
                image: self.image,
                direction: self.direction,
                format: self.format,
                output: self.output,
                sanitize_count: self.sanitize_count.map(usize::from),
                force: self.force,
            }),
        }
    }
}
