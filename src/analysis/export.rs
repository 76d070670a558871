//! # 结果导出
//!
//! 导出峰值表、运行汇总和错误列表为 CSV。
//!
//! ## 支持格式
//! - `<group>_peaks.csv`: 来源、浓度、峰值吸光度、λmax、拟合值
//! - `summary.csv`: 每组的点数、ε、截距、R² 与状态
//! - `errors.csv`: 被标记的文件与组（仅部分失败时写出）
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/calibration.rs` 的 GroupReport, RunReport
//! - 使用 `csv` + `serde` 写入

use crate::error::{Result, UvkitError};
use crate::models::{GroupReport, RunReport};

use serde::Serialize;
use std::path::Path;

/// 汇总表的一行
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    group: &'a str,
    range_nm: String,
    points: usize,
    failed_files: usize,
    slope: Option<f64>,
    intercept: Option<f64>,
    r_squared: Option<f64>,
    status: String,
}

/// 错误表的一行
#[derive(Debug, Serialize)]
struct ErrorRow<'a> {
    group: &'a str,
    file: &'a str,
    kind: &'static str,
    message: String,
}

fn flush_writer<W: std::io::Write>(wtr: &mut csv::Writer<W>, output_path: &Path) -> Result<()> {
    wtr.flush().map_err(|e| UvkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 组级范围；有文件使用其他范围时加注
fn range_label(group: &GroupReport) -> String {
    let base = format!("{}-{}", group.range.low, group.range.high);
    if group.file_ranges {
        format!("{} (per-file overrides)", base)
    } else {
        base
    }
}

/// 导出单组峰值表（附拟合值）
pub fn peaks_to_csv(report: &GroupReport, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([
        "source",
        "concentration_mol_L",
        "absorbance",
        "lambda_max_nm",
        "fitted",
    ])?;

    for (peak, fitted) in report.annotated_rows() {
        wtr.write_record(&[
            peak.source.clone(),
            format!("{:.6e}", peak.concentration),
            format!("{:.6}", peak.absorbance),
            format!("{:.2}", peak.wavelength),
            fitted.map(|f| format!("{:.6}", f)).unwrap_or_default(),
        ])?;
    }

    flush_writer(&mut wtr, output_path)
}

/// 导出运行汇总
pub fn summary_to_csv(run: &RunReport, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for group in &run.groups {
        let (slope, intercept, r_squared, status) = match &group.fit {
            Ok(fit) => (
                Some(fit.slope),
                Some(fit.intercept),
                Some(fit.r_squared),
                "ok".to_string(),
            ),
            Err(e) => (None, None, None, e.kind().to_string()),
        };

        wtr.serialize(SummaryRow {
            group: &group.name,
            range_nm: range_label(group),
            points: group.peak_table.len(),
            failed_files: group.file_errors.len(),
            slope,
            intercept,
            r_squared,
            status,
        })?;
    }

    flush_writer(&mut wtr, output_path)
}

/// 导出所有被标记的文件与组
pub fn errors_to_csv(run: &RunReport, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for group in &run.groups {
        for (file, err) in &group.file_errors {
            wtr.serialize(ErrorRow {
                group: &group.name,
                file,
                kind: err.kind(),
                message: err.to_string(),
            })?;
        }
        if let Err(err) = &group.fit {
            wtr.serialize(ErrorRow {
                group: &group.name,
                file: "",
                kind: err.kind(),
                message: err.to_string(),
            })?;
        }
    }

    flush_writer(&mut wtr, output_path)
}
