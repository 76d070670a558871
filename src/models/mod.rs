//! # 数据模型模块
//!
//! 定义光谱记录与标定结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `analysis/` 和 `commands/` 使用
//! - 子模块: spectrum, calibration

pub mod calibration;
pub mod spectrum;

pub use calibration::{
    CalibrationFit, ConcentrationEntry, GroupReport, PeakObservation, RunReport, SpectrumTrace,
};
pub use spectrum::{FilterRange, RangePreset, SpectrumPoint, SpectrumRecord};
