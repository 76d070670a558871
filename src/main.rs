//! # uvkit - UV-Vis 光谱 Beer-Lambert 标定工具
//!
//! 读取 UV-Vis 吸收光谱，按波长范围截取，提取每个文件的最大吸收峰，
//! 对 (浓度, 吸光度) 做最小二乘线性拟合，输出图表与汇总表。
//!
//! ## 子命令
//! - `calibrate` - 单组标定（所有文件属于同一样品）
//! - `compounds` - 多化合物标定（由 CSV 清单分组）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (光谱与清单解析)
//!   │     ├── analysis/  (截取、寻峰、拟合、绘图、导出)
//!   │     ├── batch/     (文件收集与并行输出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;
use env_logger::Env;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
