//! # 批量处理模块
//!
//! 收集光谱输入文件，并按化合物组并行写出图表与表格。
//!
//! ## 功能
//! - 文件 / 目录输入展开，按 glob 过滤，结果有序
//! - 每组一个任务，rayon 线程池扇出
//! - 成功 / 跳过 / 失败计数汇总
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `rayon`, `walkdir`, `glob`
//! - 使用 `utils/progress.rs` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
