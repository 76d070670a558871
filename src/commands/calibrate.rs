//! # calibrate 子命令实现
//!
//! 单组模式：收集光谱文件，按顺序配对浓度，计算 Beer-Lambert 标定。
//!
//! ## 依赖关系
//! - 使用 `cli/calibrate.rs` 定义的 CalibrateArgs
//! - 使用 `batch/collector.rs` 收集输入文件
//! - 使用 `analysis/` 进行计算
//! - 使用 `commands/report.rs` 输出结果

use crate::analysis::{single_group, Assembler};
use crate::batch::FileCollector;
use crate::cli::calibrate::CalibrateArgs;
use crate::commands::report;
use crate::error::{Result, UvkitError};
use crate::models::{FilterRange, RangePreset};
use crate::parsers;
use crate::utils::output;

/// 执行单组标定
pub fn execute(args: CalibrateArgs) -> Result<()> {
    output::print_header("UV-Vis Spectrum & Beer-Lambert Calibration");

    let files = FileCollector::new(args.inputs.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        return Err(UvkitError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }
    output::print_info(&format!("Found {} spectrum files", files.len()));

    let concentrations = split_concentrations(&args.concentrations);
    if concentrations.len() != files.len() {
        return Err(UvkitError::InvalidArgument(format!(
            "Number of concentrations ({}) must match number of files ({})",
            concentrations.len(),
            files.len()
        )));
    }

    let range = args
        .range
        .as_deref()
        .map(str::parse::<FilterRange>)
        .transpose()?;
    output::print_info(&match range {
        Some(r) => format!("Wavelength range: {}", r),
        None => format!(
            "Wavelength range: {} ({} preset)",
            RangePreset::General.range(),
            RangePreset::General
        ),
    });

    let inputs = files
        .iter()
        .zip(concentrations)
        .map(|(path, concentration)| parsers::load_input(path, concentration, None))
        .collect();

    let group = single_group(&args.name, inputs, range);
    let run = Assembler::new(RangePreset::General).run(&[group])?;

    report::print_run_report(&run);
    report::write_outputs(&run, &args.render)?;
    report::print_run_status(&run);

    Ok(())
}

/// 拆分逗号分隔的浓度列表（保留原始文本，由组装器校验）
fn split_concentrations(input: &str) -> Vec<String> {
    input.split(',').map(|s| s.trim().to_string()).collect()
}
