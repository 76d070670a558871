//! # 波长范围截取
//!
//! 保留 `low <= λ <= high` 且吸光度严格大于 0 的数据点，顺序不变。
//!
//! ## 依赖关系
//! - 被 `analysis/assembler.rs` 调用
//! - 使用 `models/spectrum.rs`

use crate::error::AnalysisError;
use crate::models::{FilterRange, SpectrumRecord};

/// 按范围截取光谱
///
/// 截取结果为空时返回 `EmptySeries`，不向后传递空序列。
pub fn apply_range(
    record: &SpectrumRecord,
    range: FilterRange,
) -> Result<SpectrumRecord, AnalysisError> {
    let points: Vec<_> = record
        .points
        .iter()
        .filter(|p| range.contains(p.wavelength) && p.absorbance > 0.0)
        .copied()
        .collect();

    if points.is_empty() {
        return Err(AnalysisError::EmptySeries {
            file: record.source.clone(),
            low: range.low,
            high: range.high,
        });
    }

    Ok(SpectrumRecord::new(record.source.clone(), points))
}
