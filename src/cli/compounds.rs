//! # compounds 子命令 CLI 定义
//!
//! 多化合物模式：从 CSV 清单读取 `compound,file,concentration[,low,high]`。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compounds.rs`

use super::RenderArgs;

use clap::Args;
use std::path::PathBuf;

/// compounds 子命令参数
#[derive(Args, Debug)]
pub struct CompoundsArgs {
    /// CSV manifest with columns compound,file,concentration[,low,high]
    pub manifest: PathBuf,

    /// Wavelength range in nm applied to every compound (e.g., "185-320");
    /// per-file ranges in the manifest take precedence; defaults to 185-320
    #[arg(short, long)]
    pub range: Option<String>,

    #[command(flatten)]
    pub render: RenderArgs,
}
