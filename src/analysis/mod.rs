//! # 光谱分析模块
//!
//! UV-Vis 光谱截取与 Beer-Lambert 标定的核心流水线。
//!
//! ## 子模块
//! - `filter`: 波长范围与正吸光度截取
//! - `peak`: λmax 峰值提取
//! - `fitter`: 最小二乘线性拟合
//! - `assembler`: 化合物分组与流程编排
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`, `parsers/spectrum.rs`

pub mod assembler;
pub mod export;
pub mod filter;
pub mod fitter;
pub mod peak;
pub mod plot;

pub use assembler::{single_group, Assembler, FileInput, GroupInput};
