//! # 光谱数据模型
//!
//! 单个文件解析出的 (波长, 吸光度) 序列，以及波长截取范围。
//!
//! ## 依赖关系
//! - 被 `parsers/spectrum.rs`, `analysis/` 使用
//! - 使用 `error.rs`

use crate::error::{Result, UvkitError};

use std::fmt;
use std::str::FromStr;

/// 光谱数据点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    /// 波长 (nm)
    pub wavelength: f64,
    /// 吸光度（无量纲）
    pub absorbance: f64,
}

impl SpectrumPoint {
    pub fn new(wavelength: f64, absorbance: f64) -> Self {
        Self {
            wavelength,
            absorbance,
        }
    }
}

/// 单个文件的光谱记录
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumRecord {
    /// 来源文件标识
    pub source: String,
    /// 数据点（按文件中的顺序）
    pub points: Vec<SpectrumPoint>,
}

impl SpectrumRecord {
    pub fn new(source: impl Into<String>, points: Vec<SpectrumPoint>) -> Self {
        Self {
            source: source.into(),
            points,
        }
    }
}

/// 波长截取范围 [low, high] (nm)，两端闭区间
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRange {
    pub low: f64,
    pub high: f64,
}

impl FilterRange {
    /// 创建范围，要求 low <= high 且均为有限值
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(UvkitError::InvalidRange(format!(
                "{}-{} (must be finite with low <= high)",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// 波长是否落在范围内
    pub fn contains(&self, wavelength: f64) -> bool {
        self.low <= wavelength && wavelength <= self.high
    }
}

impl fmt::Display for FilterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} nm", self.low, self.high)
    }
}

/// 解析 "LOW-HIGH" 格式（如 "190-320"）
impl FromStr for FilterRange {
    type Err = UvkitError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 2 {
            return Err(UvkitError::InvalidRange(s.to_string()));
        }

        let low: f64 = parts[0]
            .trim()
            .parse()
            .map_err(|_| UvkitError::InvalidRange(s.to_string()))?;
        let high: f64 = parts[1]
            .trim()
            .parse()
            .map_err(|_| UvkitError::InvalidRange(s.to_string()))?;

        FilterRange::new(low, high)
    }
}

/// 默认截取范围预设
///
/// 两个预设来自两种处理模式，数值不同（190 vs 185 nm），不可互换。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    /// 单组模式（所有文件属于一个隐式组）：190-320 nm
    General,
    /// 多化合物模式：185-320 nm
    Compound,
}

impl RangePreset {
    pub fn range(self) -> FilterRange {
        match self {
            RangePreset::General => FilterRange {
                low: 190.0,
                high: 320.0,
            },
            RangePreset::Compound => FilterRange {
                low: 185.0,
                high: 320.0,
            },
        }
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangePreset::General => write!(f, "general"),
            RangePreset::Compound => write!(f, "compound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let r: FilterRange = "190-320".parse().unwrap();
        assert_eq!(r.low, 190.0);
        assert_eq!(r.high, 320.0);

        let r: FilterRange = " 185.5 - 300 ".parse().unwrap();
        assert_eq!(r.low, 185.5);
        assert_eq!(r.high, 300.0);
    }

    #[test]
    fn test_parse_range_rejects_bad_input() {
        assert!("320-190".parse::<FilterRange>().is_err());
        assert!("abc".parse::<FilterRange>().is_err());
        assert!("190".parse::<FilterRange>().is_err());
        assert!("190-abc".parse::<FilterRange>().is_err());
    }

    #[test]
    fn test_presets_are_distinct() {
        assert_eq!(RangePreset::General.range().low, 190.0);
        assert_eq!(RangePreset::Compound.range().low, 185.0);
        assert_eq!(RangePreset::General.range().high, 320.0);
        assert_eq!(RangePreset::Compound.range().high, 320.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = FilterRange::new(190.0, 320.0).unwrap();
        assert!(r.contains(190.0));
        assert!(r.contains(320.0));
        assert!(!r.contains(189.999));
        assert!(!r.contains(f64::NAN));
    }
}
