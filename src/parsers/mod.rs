//! # 解析器模块
//!
//! 提供光谱文本文件和化合物清单的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: spectrum, manifest

pub mod manifest;
pub mod spectrum;

pub use manifest::{load_groups, parse_manifest_file, ManifestGroup};
pub use spectrum::load_input;
