//! # 批量执行器
//!
//! 并行生成各化合物组的输出文件（图表、CSV）。
//! 各组之间没有共享的可写状态，可直接扇出 / 汇合。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/report.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, UvkitError};
use crate::utils::progress;

use rayon::prelude::*;

/// 单项处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如无可绘制数据）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (项目名, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 跳过原因
    pub skips: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(msg) => {
                self.skipped += 1;
                self.skips.push(msg);
            }
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = CPU 核数）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理任务列表，结果按输入顺序汇总
    pub fn run<T, F>(&self, items: &[T], processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> Vec<ProcessResult> + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Rendering");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| UvkitError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<Vec<ProcessResult>> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results.into_iter().flatten() {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts() {
        let mut result = BatchResult::default();
        result.merge(ProcessResult::Success("a".to_string()));
        result.merge(ProcessResult::Skipped("b".to_string()));
        result.merge(ProcessResult::Failed("c".to_string(), "boom".to_string()));
        assert_eq!(result.total(), 3);
        assert_eq!(result.failures, vec![("c".to_string(), "boom".to_string())]);
    }

    #[test]
    fn test_run_preserves_all_results() {
        let items: Vec<usize> = (0..20).collect();
        let result = BatchRunner::new(4)
            .run(&items, |i| {
                if i % 5 == 0 {
                    vec![ProcessResult::Failed(i.to_string(), "fail".to_string())]
                } else {
                    vec![
                        ProcessResult::Success(i.to_string()),
                        ProcessResult::Skipped(i.to_string()),
                    ]
                }
            })
            .unwrap();
        assert_eq!(result.failed, 4);
        assert_eq!(result.success, 16);
        assert_eq!(result.skipped, 16);
        assert_eq!(result.failures[0].0, "0");
    }
}
