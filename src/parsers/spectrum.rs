//! # UV-Vis 光谱文本解析器
//!
//! 解析两列数值文本（波长、吸光度），制表符或空白分隔，无表头。
//!
//! ## 格式说明
//! ```text
//! 190.0	0.8123
//! 191.0	0.8330
//! ...
//! ```
//!
//! 无法解析为两个有限数值的行会被丢弃；若没有任何有效行则报错。
//!
//! 文件标识取规范化路径，`x.txt` 与 `./x.txt` 视为同一文件。
//!
//! ## 依赖关系
//! - 被 `parsers/manifest.rs`, `analysis/assembler.rs`, `commands/` 使用
//! - 使用 `models/spectrum.rs`

use crate::analysis::FileInput;
use crate::error::AnalysisError;
use crate::models::{FilterRange, SpectrumPoint, SpectrumRecord};

use log::{debug, warn};
use std::fs;
use std::path::Path;

/// 读取光谱文件，生成组装器输入
///
/// 读取失败记录为该文件的 `UnreadableInput`，不中断其他文件。
pub fn load_input(path: &Path, concentration: String, range: Option<FilterRange>) -> FileInput {
    let id = fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();

    let content = fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|e| {
            warn!("{}: {}", id, e);
            AnalysisError::UnreadableInput {
                file: id.clone(),
                reason: e.to_string(),
            }
        });

    FileInput {
        id,
        content,
        concentration,
        range,
    }
}

/// 从字符串内容解析光谱
pub fn parse_spectrum_content(
    content: &str,
    source: &str,
) -> std::result::Result<SpectrumRecord, AnalysisError> {
    let mut points = Vec::new();
    let mut dropped = 0usize;

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(point) => points.push(point),
            None => {
                dropped += 1;
                debug!("{}: dropping line {} ({:?})", source, line_no + 1, line);
            }
        }
    }

    if points.is_empty() {
        return Err(AnalysisError::MalformedInput {
            file: source.to_string(),
        });
    }

    if dropped > 0 {
        debug!(
            "{}: parsed {} rows, dropped {} invalid rows",
            source,
            points.len(),
            dropped
        );
    }

    Ok(SpectrumRecord::new(source, points))
}

/// 解析单行：恰好两个有限数值
fn parse_row(line: &str) -> Option<SpectrumPoint> {
    let mut fields = line.split_whitespace();
    let wavelength: f64 = fields.next()?.parse().ok()?;
    let absorbance: f64 = fields.next()?.parse().ok()?;

    if fields.next().is_some() || !wavelength.is_finite() || !absorbance.is_finite() {
        return None;
    }

    Some(SpectrumPoint::new(wavelength, absorbance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_delimited() {
        let content = "200\t0.10\n210\t0.50\n220\t0.30\n";
        let record = parse_spectrum_content(content, "A.txt").unwrap();
        assert_eq!(record.source, "A.txt");
        assert_eq!(record.points.len(), 3);
        assert_eq!(record.points[1], SpectrumPoint::new(210.0, 0.5));
    }

    #[test]
    fn test_parse_mixed_whitespace_and_crlf() {
        let content = "200  0.10\r\n\r\n210\t \t0.50\r\n";
        let record = parse_spectrum_content(content, "A.txt").unwrap();
        assert_eq!(record.points.len(), 2);
        assert_eq!(record.points[0], SpectrumPoint::new(200.0, 0.1));
    }

    #[test]
    fn test_invalid_rows_dropped() {
        let content = "Wavelength\tAbs\n200\t0.10\n210\tNaN\n215\n220\t0.30\textra\n230,5\t0.2\n240\t0.40\n";
        let record = parse_spectrum_content(content, "A.txt").unwrap();
        let wavelengths: Vec<f64> = record.points.iter().map(|p| p.wavelength).collect();
        assert_eq!(wavelengths, vec![200.0, 240.0]);
    }

    #[test]
    fn test_no_valid_rows_is_malformed() {
        let err = parse_spectrum_content("header\nfoo bar\n\n", "bad.txt").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MalformedInput {
                file: "bad.txt".to_string()
            }
        );

        let err = parse_spectrum_content("", "empty.txt").unwrap_err();
        assert_eq!(err.kind(), "MalformedInputError");
    }

    #[test]
    fn test_negative_values_are_kept() {
        let record = parse_spectrum_content("200\t-0.01\n", "A.txt").unwrap();
        assert_eq!(record.points[0].absorbance, -0.01);
    }

    #[test]
    fn test_load_input_canonical_id() {
        let dir = std::env::temp_dir().join(format!("uvkit_load_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("x.txt"), "200\t0.10\n").unwrap();

        let plain = load_input(&dir.join("x.txt"), "0.1".to_string(), None);
        let dotted = load_input(&dir.join(".").join("x.txt"), "0.2".to_string(), None);
        assert_eq!(plain.id, dotted.id);
        assert_eq!(plain.content.as_deref(), Ok("200\t0.10\n"));

        let missing = load_input(&dir.join("missing.txt"), "0.1".to_string(), None);
        assert_eq!(
            missing.content.unwrap_err().kind(),
            "UnreadableInputError"
        );

        fs::remove_dir_all(&dir).ok();
    }
}
