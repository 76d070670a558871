//! # 化合物组装器
//!
//! 将文件与浓度按化合物分组，逐组执行 解析 → 截取 → 峰值提取 → 拟合。
//!
//! ## 流程
//! 1. 全局校验：同一文件不得出现两次（否则整次运行失败，不产生任何输出）
//! 2. 按组处理：浓度校验、截取范围解析、逐文件提取峰值
//! 3. 峰值按浓度升序排序后拟合
//!
//! 单个文件或组的错误只记录在该组结果中，其余组照常处理。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `parsers/spectrum.rs` 解析文件内容
//! - 使用 `analysis/filter.rs`, `analysis/peak.rs`, `analysis/fitter.rs`

use crate::analysis::{filter, fitter, peak};
use crate::error::AnalysisError;
use crate::models::{
    ConcentrationEntry, FilterRange, GroupReport, PeakObservation, RangePreset, RunReport,
    SpectrumTrace,
};
use crate::parsers::spectrum::parse_spectrum_content;

use log::{debug, info, warn};
use std::collections::BTreeMap;

/// 调用方提供的单个文件
#[derive(Debug, Clone)]
pub struct FileInput {
    /// 文件标识（全局唯一）
    pub id: String,
    /// 文件文本内容；读取失败时为该文件的错误
    pub content: Result<String, AnalysisError>,
    /// 原始浓度字符串
    pub concentration: String,
    /// 文件级截取范围
    pub range: Option<FilterRange>,
}

/// 调用方提供的化合物组
#[derive(Debug, Clone)]
pub struct GroupInput {
    pub name: String,
    pub files: Vec<FileInput>,
    /// 组级截取范围
    pub range: Option<FilterRange>,
}

/// 找出被多次分配的文件标识（排序、去重）
pub fn find_duplicate_assignments(groups: &[GroupInput]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for file in groups.iter().flat_map(|g| &g.files) {
        *counts.entry(file.id.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// 校验文件分配，存在冲突时返回 `DuplicateAssignment`
pub fn check_assignments(groups: &[GroupInput]) -> Result<(), AnalysisError> {
    let files = find_duplicate_assignments(groups);
    if files.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::DuplicateAssignment { files })
    }
}

/// 解析浓度字符串：必须为有限正数
pub fn parse_concentration(file: &str, value: &str) -> Result<f64, AnalysisError> {
    match value.trim().parse::<f64>() {
        Ok(c) if c.is_finite() && c > 0.0 => Ok(c),
        _ => Err(AnalysisError::InvalidConcentration {
            file: file.to_string(),
            value: value.to_string(),
        }),
    }
}

/// 化合物组装器
pub struct Assembler {
    /// 未指定范围时使用的预设
    preset: RangePreset,
}

impl Assembler {
    pub fn new(preset: RangePreset) -> Self {
        Self { preset }
    }

    /// 执行一次完整运行
    pub fn run(&self, groups: &[GroupInput]) -> Result<RunReport, AnalysisError> {
        check_assignments(groups)?;

        let groups = groups.iter().map(|g| self.process_group(g)).collect();
        Ok(RunReport { groups })
    }

    /// 处理单个组
    pub fn process_group(&self, group: &GroupInput) -> GroupReport {
        let group_range = group.range.unwrap_or_else(|| self.preset.range());
        info!(
            "Group '{}': {} file(s), range {}",
            group.name,
            group.files.len(),
            group_range
        );

        let mut file_errors = BTreeMap::new();
        let mut observations: Vec<(PeakObservation, SpectrumTrace)> = Vec::new();

        for file in &group.files {
            let result = self.validate_entry(file, group_range).and_then(|entry| {
                let content = file.content.as_deref().map_err(Clone::clone)?;
                process_entry(&entry, content)
            });

            match result {
                Ok(obs) => observations.push(obs),
                Err(e) => {
                    warn!("Group '{}': {}", group.name, e);
                    file_errors.insert(file.id.clone(), e);
                }
            }
        }

        // 稳定排序，浓度相同的条目保持输入顺序
        observations.sort_by(|a, b| a.0.concentration.total_cmp(&b.0.concentration));
        let (peak_table, traces): (Vec<_>, Vec<_>) = observations.into_iter().unzip();

        let fit = fitter::fit_calibration(&peak_table);
        match &fit {
            Ok(f) => info!(
                "Group '{}': ε = {:.4}, intercept = {:.6}, R² = {:.6}",
                group.name, f.slope, f.intercept, f.r_squared
            ),
            Err(e) => warn!("Group '{}': fit unavailable: {}", group.name, e),
        }

        let file_ranges = group
            .files
            .iter()
            .any(|f| f.range.is_some_and(|r| r != group_range));

        GroupReport {
            name: group.name.clone(),
            range: group_range,
            file_ranges,
            peak_table,
            fit,
            file_errors,
            traces,
        }
    }

    fn validate_entry(
        &self,
        file: &FileInput,
        group_range: FilterRange,
    ) -> Result<ConcentrationEntry, AnalysisError> {
        Ok(ConcentrationEntry {
            source: file.id.clone(),
            concentration: parse_concentration(&file.id, &file.concentration)?,
            range: file.range.unwrap_or(group_range),
        })
    }
}

/// 单个文件：解析 → 截取 → 峰值
fn process_entry(
    entry: &ConcentrationEntry,
    content: &str,
) -> Result<(PeakObservation, SpectrumTrace), AnalysisError> {
    let record = parse_spectrum_content(content, &entry.source)?;
    let trimmed = filter::apply_range(&record, entry.range)?;

    let peak = peak::extract_peak(&trimmed, entry.concentration).ok_or_else(|| {
        AnalysisError::EmptySeries {
            file: entry.source.clone(),
            low: entry.range.low,
            high: entry.range.high,
        }
    })?;
    debug!(
        "{}: λmax = {} nm, A = {}",
        entry.source, peak.wavelength, peak.absorbance
    );

    let trace = SpectrumTrace {
        source: entry.source.clone(),
        concentration: entry.concentration,
        points: trimmed.points,
    };

    Ok((peak, trace))
}

/// 单组模式：所有文件构成一个隐式组
pub fn single_group(
    name: impl Into<String>,
    files: Vec<FileInput>,
    range: Option<FilterRange>,
) -> GroupInput {
    GroupInput {
        name: name.into(),
        files,
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_A: &str = "200\t0.10\n210\t0.50\n220\t0.30\n";
    const FILE_B: &str = "200\t0.20\n210\t1.00\n220\t0.60\n";
    const FILE_C: &str = "200\t0.30\n210\t1.50\n220\t0.90\n";
    const FILE_NEGATIVE: &str = "200\t0.00\n210\t-0.05\n220\t-0.10\n";

    fn file(id: &str, content: &str, conc: &str) -> FileInput {
        FileInput {
            id: id.to_string(),
            content: Ok(content.to_string()),
            concentration: conc.to_string(),
            range: None,
        }
    }

    fn group(name: &str, files: Vec<FileInput>) -> GroupInput {
        GroupInput {
            name: name.to_string(),
            files,
            range: None,
        }
    }

    #[test]
    fn test_two_file_scenario() {
        let groups = vec![single_group(
            "sample",
            vec![file("B", FILE_B, "0.002"), file("A", FILE_A, "0.001")],
            None,
        )];
        let report = Assembler::new(RangePreset::General).run(&groups).unwrap();
        assert!(!report.is_partial_failure());

        let g = &report.groups[0];
        assert_eq!(g.range, RangePreset::General.range());
        assert_eq!(g.peak_table.len(), 2);

        // 按浓度升序
        assert_eq!(g.peak_table[0].source, "A");
        assert_eq!(g.peak_table[0].concentration, 0.001);
        assert_eq!(g.peak_table[0].absorbance, 0.50);
        assert_eq!(g.peak_table[0].wavelength, 210.0);
        assert_eq!(g.peak_table[1].absorbance, 1.00);
        assert_eq!(g.traces[0].source, "A");
        assert_eq!(g.traces[0].points.len(), 3);

        let fit = g.fit.as_ref().unwrap();
        assert!((fit.slope - 500.0).abs() < 1e-6);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_assignment_aborts_run() {
        let groups = vec![
            group("x", vec![file("A", FILE_A, "0.001"), file("B", FILE_B, "0.002")]),
            group("y", vec![file("A", FILE_A, "0.001"), file("C", FILE_C, "0.003")]),
        ];
        let err = Assembler::new(RangePreset::Compound).run(&groups).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DuplicateAssignment {
                files: vec!["A".to_string()]
            }
        );
    }

    #[test]
    fn test_duplicate_within_group_detected() {
        let groups = vec![group(
            "x",
            vec![file("B", FILE_B, "0.002"), file("B", FILE_B, "0.004")],
        )];
        assert_eq!(find_duplicate_assignments(&groups), vec!["B".to_string()]);
        assert!(check_assignments(&groups).is_err());
    }

    #[test]
    fn test_no_conflicts() {
        let groups = vec![
            group("x", vec![file("A", FILE_A, "0.001")]),
            group("y", vec![file("B", FILE_B, "0.002")]),
        ];
        assert!(find_duplicate_assignments(&groups).is_empty());
    }

    #[test]
    fn test_invalid_concentration_is_scoped_to_entry() {
        let groups = vec![
            group(
                "x",
                vec![
                    file("A", FILE_A, "0.001"),
                    file("B", FILE_B, "abc"),
                    file("C", FILE_C, "0.003"),
                ],
            ),
            group("y", vec![file("D", FILE_A, "-1"), file("E", FILE_B, "0")]),
        ];
        let report = Assembler::new(RangePreset::Compound).run(&groups).unwrap();
        assert!(report.is_partial_failure());

        let x = &report.groups[0];
        assert_eq!(x.file_errors["B"].kind(), "InvalidConcentrationError");
        assert_eq!(x.peak_table.len(), 2);
        assert!(x.fit.is_ok());

        let y = &report.groups[1];
        assert_eq!(y.file_errors.len(), 2);
        assert!(y.peak_table.is_empty());
        assert_eq!(
            y.fit,
            Err(AnalysisError::InsufficientData {
                found: 0,
                required: 2
            })
        );
        assert_eq!(report.fitted_count(), 1);
    }

    #[test]
    fn test_parse_concentration() {
        assert_eq!(parse_concentration("A", " 0.001 ").unwrap(), 0.001);
        assert_eq!(parse_concentration("A", "1e-4").unwrap(), 1e-4);
        for bad in ["", "abc", "0", "-0.1", "NaN", "inf"] {
            assert!(parse_concentration("A", bad).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn test_empty_series_with_enough_remaining() {
        let groups = vec![group(
            "x",
            vec![
                file("A", FILE_A, "0.001"),
                file("N", FILE_NEGATIVE, "0.0015"),
                file("B", FILE_B, "0.002"),
            ],
        )];
        let report = Assembler::new(RangePreset::General).run(&groups).unwrap();
        let g = &report.groups[0];
        assert_eq!(g.file_errors["N"].kind(), "EmptySeriesError");
        assert_eq!(g.peak_table.len(), 2);
        assert!(g.fit.is_ok());
        assert!(report.is_partial_failure());
    }

    #[test]
    fn test_empty_series_leaves_insufficient_data() {
        let groups = vec![
            group(
                "x",
                vec![file("A", FILE_A, "0.001"), file("N", FILE_NEGATIVE, "0.002")],
            ),
            group(
                "y",
                vec![file("B", FILE_B, "0.002"), file("C", FILE_C, "0.003")],
            ),
        ];
        let report = Assembler::new(RangePreset::Compound).run(&groups).unwrap();

        let x = &report.groups[0];
        assert_eq!(x.peak_table.len(), 1);
        assert_eq!(x.fit.as_ref().unwrap_err().kind(), "InsufficientDataError");

        // 其他组不受影响
        let y = &report.groups[1];
        assert!(y.fit.is_ok());
        assert!(y.file_errors.is_empty());
    }

    #[test]
    fn test_malformed_file_recorded() {
        let groups = vec![group(
            "x",
            vec![
                file("A", FILE_A, "0.001"),
                file("M", "not\ta spectrum\n", "0.002"),
            ],
        )];
        let report = Assembler::new(RangePreset::General).run(&groups).unwrap();
        assert_eq!(
            report.groups[0].file_errors["M"],
            AnalysisError::MalformedInput {
                file: "M".to_string()
            }
        );
    }

    #[test]
    fn test_range_resolution_order() {
        // 186 nm 处的强吸收只在 Compound 预设下保留
        let content = "186\t2.00\n210\t0.50\n";
        let mut narrow = file("F", content, "0.001");
        narrow.range = Some(FilterRange::new(200.0, 300.0).unwrap());

        let groups = vec![
            group("preset", vec![file("P", content, "0.001")]),
            GroupInput {
                name: "group-range".to_string(),
                files: vec![file("G", content, "0.001")],
                range: Some(FilterRange::new(190.0, 320.0).unwrap()),
            },
            group("file-range", vec![narrow]),
        ];

        let report = Assembler::new(RangePreset::Compound).run(&groups).unwrap();
        assert_eq!(report.groups[0].peak_table[0].wavelength, 186.0);
        assert_eq!(report.groups[1].peak_table[0].wavelength, 210.0);
        assert_eq!(report.groups[2].peak_table[0].wavelength, 210.0);
        assert_eq!(report.groups[0].range, RangePreset::Compound.range());
        assert!(!report.groups[0].file_ranges);
        assert!(!report.groups[1].file_ranges);
        assert!(report.groups[2].file_ranges);

        let report = Assembler::new(RangePreset::General)
            .run(&groups[..1])
            .unwrap();
        assert_eq!(report.groups[0].peak_table[0].wavelength, 210.0);
    }

    #[test]
    fn test_unreadable_file_scoped_to_group() {
        let mut missing = file("M", "", "0.0015");
        missing.content = Err(AnalysisError::UnreadableInput {
            file: "M".to_string(),
            reason: "file not found".to_string(),
        });

        let groups = vec![
            group(
                "x",
                vec![file("A", FILE_A, "0.001"), missing, file("B", FILE_B, "0.002")],
            ),
            group(
                "y",
                vec![file("C", FILE_C, "0.003"), file("D", FILE_A, "0.001")],
            ),
        ];
        let report = Assembler::new(RangePreset::Compound).run(&groups).unwrap();

        let x = &report.groups[0];
        assert_eq!(x.file_errors["M"].kind(), "UnreadableInputError");
        assert!(x.fit.is_ok());
        assert!(report.groups[1].fit.is_ok());
        assert!(report.is_partial_failure());
    }
}
