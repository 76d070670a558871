//! # 标定结果数据模型
//!
//! 峰值观测、Beer-Lambert 拟合结果，以及按化合物组汇总的运行报告。
//!
//! ## 依赖关系
//! - 被 `analysis/` 和 `commands/` 使用
//! - 使用 `models/spectrum.rs`, `error.rs`

use crate::error::AnalysisError;
use crate::models::spectrum::{FilterRange, SpectrumPoint};

use std::collections::BTreeMap;

/// 经过校验的浓度条目
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationEntry {
    /// 来源文件标识
    pub source: String,
    /// 浓度 (mol/L)，有限且 > 0
    pub concentration: f64,
    /// 该文件使用的截取范围
    pub range: FilterRange,
}

/// 单个文件的峰值观测
#[derive(Debug, Clone, PartialEq)]
pub struct PeakObservation {
    /// 来源文件标识
    pub source: String,
    /// 浓度 (mol/L)
    pub concentration: f64,
    /// 峰值吸光度
    pub absorbance: f64,
    /// 峰位 λmax (nm)
    pub wavelength: f64,
}

/// Beer-Lambert 线性拟合结果
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationFit {
    /// 斜率 = 摩尔吸光系数 ε (L·mol⁻¹·cm⁻¹)
    pub slope: f64,
    /// 截距
    pub intercept: f64,
    /// 决定系数 R²，位于 [0, 1]
    pub r_squared: f64,
    /// 与峰值表（按浓度升序）一一对应的拟合值
    pub fitted_values: Vec<f64>,
}

/// 截取后的光谱曲线（用于叠加绘图）
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTrace {
    pub source: String,
    pub concentration: f64,
    pub points: Vec<SpectrumPoint>,
}

/// 单个化合物组的分析结果
#[derive(Debug, Clone)]
pub struct GroupReport {
    /// 组名
    pub name: String,
    /// 组级截取范围（文件级范围可覆盖）
    pub range: FilterRange,
    /// 是否有文件使用了不同于组级的截取范围
    pub file_ranges: bool,
    /// 峰值表，按浓度升序
    pub peak_table: Vec<PeakObservation>,
    /// 拟合结果或失败原因
    pub fit: Result<CalibrationFit, AnalysisError>,
    /// 文件标识 → 错误
    pub file_errors: BTreeMap<String, AnalysisError>,
    /// 截取后的光谱，与 peak_table 顺序一致
    pub traces: Vec<SpectrumTrace>,
}

impl GroupReport {
    /// 组内是否存在任何文件错误或拟合失败
    pub fn has_errors(&self) -> bool {
        !self.file_errors.is_empty() || self.fit.is_err()
    }

    /// 峰值表与拟合值配对（拟合不可用时为 None）
    pub fn annotated_rows(&self) -> Vec<(&PeakObservation, Option<f64>)> {
        match &self.fit {
            Ok(fit) => self
                .peak_table
                .iter()
                .zip(fit.fitted_values.iter().map(|v| Some(*v)))
                .collect(),
            Err(_) => self.peak_table.iter().map(|p| (p, None)).collect(),
        }
    }
}

/// 一次运行的完整结果
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
}

impl RunReport {
    /// 是否为部分失败（有组或文件被标记错误）
    pub fn is_partial_failure(&self) -> bool {
        self.groups.iter().any(GroupReport::has_errors)
    }

    /// 成功拟合的组数
    pub fn fitted_count(&self) -> usize {
        self.groups.iter().filter(|g| g.fit.is_ok()).count()
    }
}
