//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calibrate`: 单组模式，所有文件属于同一样品（默认范围 190-320 nm）
//! - `compounds`: 多化合物模式，按 CSV 清单分组（默认范围 185-320 nm）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: calibrate, compounds

pub mod calibrate;
pub mod compounds;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// uvkit - UV-Vis 光谱与 Beer-Lambert 标定工具
#[derive(Parser)]
#[command(name = "uvkit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "UV-Vis spectrum trimming and Beer-Lambert calibration toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Calibrate a single sample from spectra at known concentrations
    Calibrate(calibrate::CalibrateArgs),

    /// Calibrate several compounds listed in a CSV manifest
    Compounds(compounds::CompoundsArgs),
}

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PlotFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl PlotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 输出参数（两个子命令共用）
// ─────────────────────────────────────────────────────────────

/// 输出相关参数
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Directory for plots and CSV tables
    #[arg(short, long, env = "UVKIT_OUTPUT_DIR", default_value = "uvkit_output")]
    pub output_dir: PathBuf,

    /// Plot image format
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: PlotFormat,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 500)]
    pub height: u32,

    /// Skip plot generation (CSV tables are still written)
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Number of parallel rendering jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,
}
