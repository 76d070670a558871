//! # compounds 子命令实现
//!
//! 多化合物模式：读取 CSV 清单，每个化合物独立拟合。
//! 同一文件被多个化合物引用时整次运行失败，不生成任何输出。
//!
//! ## 依赖关系
//! - 使用 `cli/compounds.rs` 定义的 CompoundsArgs
//! - 使用 `parsers/manifest.rs` 读取清单
//! - 使用 `analysis/` 进行计算
//! - 使用 `commands/report.rs` 输出结果

use crate::analysis::Assembler;
use crate::cli::compounds::CompoundsArgs;
use crate::commands::report;
use crate::error::{Result, UvkitError};
use crate::models::{FilterRange, RangePreset};
use crate::parsers;
use crate::utils::output;

/// 执行多化合物标定
pub fn execute(args: CompoundsArgs) -> Result<()> {
    output::print_header("Multi-Compound Beer-Lambert Calibration");

    if !args.manifest.is_file() {
        return Err(UvkitError::FileNotFound {
            path: args.manifest.display().to_string(),
        });
    }

    let manifest = parsers::parse_manifest_file(&args.manifest)?;
    if manifest.is_empty() {
        return Err(UvkitError::InvalidArgument(format!(
            "Manifest '{}' contains no entries",
            args.manifest.display()
        )));
    }

    let file_count: usize = manifest.iter().map(|g| g.entries.len()).sum();
    output::print_info(&format!(
        "Loaded manifest: {} compounds, {} files",
        manifest.len(),
        file_count
    ));

    let range = args
        .range
        .as_deref()
        .map(str::parse::<FilterRange>)
        .transpose()?;
    output::print_info(&match range {
        Some(r) => format!("Default wavelength range: {}", r),
        None => format!(
            "Default wavelength range: {} ({} preset)",
            RangePreset::Compound.range(),
            RangePreset::Compound
        ),
    });

    let groups = parsers::load_groups(&manifest, range);
    let run = Assembler::new(RangePreset::Compound).run(&groups)?;

    report::print_run_report(&run);
    report::write_outputs(&run, &args.render)?;
    report::print_run_status(&run);

    Ok(())
}
