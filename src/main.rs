use clap::Parser;
use log::LevelFilter;

use lsb_stego::{
    cli::{Cli, Command},
    handler::{handle_embed, handle_extract},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据是否提供了载荷
/// 将执行分派到嵌入或提取处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // `RUST_LOG` 优先于 --verbose
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match cli.into_command() {
        Command::Embed(args) => handle_embed(args),
        Command::Extract(args) => handle_extract(args).map(|_| ()),
    }
}
