//! # 峰值提取
//!
//! 在截取后的光谱中找到最大吸光度点 (λmax)。
//! 多个点吸光度相同时取波长最小者；NaN 不参与比较。
//!
//! ## 依赖关系
//! - 被 `analysis/assembler.rs` 调用
//! - 使用 `models/`

use crate::models::{PeakObservation, SpectrumPoint, SpectrumRecord};

/// 查找最大吸光度点
pub fn find_max_point(points: &[SpectrumPoint]) -> Option<SpectrumPoint> {
    points
        .iter()
        .filter(|p| !p.absorbance.is_nan())
        .fold(None, |best: Option<SpectrumPoint>, p| match best {
            Some(b)
                if b.absorbance > p.absorbance
                    || (b.absorbance == p.absorbance && b.wavelength <= p.wavelength) =>
            {
                Some(b)
            }
            _ => Some(*p),
        })
}

/// 提取峰值观测，空记录返回 None
pub fn extract_peak(record: &SpectrumRecord, concentration: f64) -> Option<PeakObservation> {
    find_max_point(&record.points).map(|p| PeakObservation {
        source: record.source.clone(),
        concentration,
        absorbance: p.absorbance,
        wavelength: p.wavelength,
    })
}
