//! # 统一错误处理模块
//!
//! 定义 uvkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! - `AnalysisError`: 核心流水线错误（按文件 / 按化合物组收集，不中断其他组）
//! - `UvkitError`: 应用层错误（I/O、参数、CSV、绘图）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 核心分析错误
///
/// 除 `DuplicateAssignment` 外，均记录在对应文件或组的结果中。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Malformed input '{file}': no valid wavelength/absorbance rows")]
    MalformedInput { file: String },

    #[error("Empty series '{file}': no rows with absorbance > 0 within {low}-{high} nm")]
    EmptySeries { file: String, low: f64, high: f64 },

    #[error("Insufficient data: {found} valid peak(s), at least {required} required for a fit")]
    InsufficientData { found: usize, required: usize },

    #[error("Degenerate fit: concentrations have zero variance")]
    DegenerateFit,

    #[error("Files assigned to more than one group: {}", .files.join(", "))]
    DuplicateAssignment { files: Vec<String> },

    #[error("Invalid concentration '{value}' for '{file}': expected a positive number")]
    InvalidConcentration { file: String, value: String },

    #[error("Unreadable input '{file}': {reason}")]
    UnreadableInput { file: String, reason: String },
}

impl AnalysisError {
    /// 错误类别名称（用于报告与 CSV 导出）
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::MalformedInput { .. } => "MalformedInputError",
            AnalysisError::EmptySeries { .. } => "EmptySeriesError",
            AnalysisError::InsufficientData { .. } => "InsufficientDataError",
            AnalysisError::DegenerateFit => "DegenerateFitError",
            AnalysisError::DuplicateAssignment { .. } => "DuplicateAssignmentError",
            AnalysisError::InvalidConcentration { .. } => "InvalidConcentrationError",
            AnalysisError::UnreadableInput { .. } => "UnreadableInputError",
        }
    }
}

/// uvkit 应用层错误类型
#[derive(Error, Debug)]
pub enum UvkitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    // ─────────────────────────────────────────────────────────────
    // CSV / 清单错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid manifest {path} (line {line}): {reason}")]
    ManifestError {
        path: String,
        line: u64,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 分析与绘图
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, UvkitError>;
