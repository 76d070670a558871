//! # calibrate 子命令 CLI 定义
//!
//! 单组模式：所有输入文件视为同一样品在不同浓度下的光谱。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calibrate.rs`

use super::RenderArgs;

use clap::Args;
use std::path::PathBuf;

/// calibrate 子命令参数
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Spectrum files (two columns: wavelength, absorbance) or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Concentrations in mol/dm³, comma-separated, in the same order as the files
    #[arg(short, long)]
    pub concentrations: String,

    /// Sample name used for titles and output file names
    #[arg(short, long, default_value = "sample")]
    pub name: String,

    /// Wavelength range in nm (e.g., "190-320"); defaults to 190-320
    #[arg(short, long)]
    pub range: Option<String>,

    /// Glob pattern for files inside directory inputs (comma-separated)
    #[arg(long, default_value = "*.txt")]
    pub pattern: String,

    /// Recurse into subdirectories of directory inputs
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    #[command(flatten)]
    pub render: RenderArgs,
}
