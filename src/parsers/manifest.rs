//! # 化合物清单解析器
//!
//! 解析多化合物模式的 CSV 清单，每行对应一个光谱文件。
//!
//! ## 格式说明
//! ```text
//! compound,file,concentration,low,high
//! caffeine,caf_1.txt,0.0001,,
//! caffeine,caf_2.txt,0.0002,,
//! aspirin,asp_1.txt,0.001,200,300
//! ```
//!
//! - `low`/`high` 可选，需同时给出，作为文件级截取范围
//! - 文件路径相对于清单所在目录
//! - 化合物按首次出现的顺序分组
//!
//! ## 依赖关系
//! - 被 `commands/compounds.rs` 使用
//! - 使用 `analysis/assembler.rs` 的 GroupInput
//! - 使用 `parsers/spectrum.rs` 读取光谱文件
//! - 使用 `csv` + `serde` 读取

use crate::analysis::GroupInput;
use crate::error::{Result, UvkitError};
use crate::models::FilterRange;
use crate::parsers::spectrum;

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 清单中的一行（原始字段）
#[derive(Debug, Deserialize)]
struct ManifestRow {
    compound: String,
    file: String,
    concentration: String,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
}

/// 解析后的清单条目
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub path: PathBuf,
    /// 原始浓度字符串，由组装器校验
    pub concentration: String,
    pub range: Option<FilterRange>,
}

/// 清单中的一个化合物组
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestGroup {
    pub name: String,
    pub entries: Vec<ManifestEntry>,
}

/// 读取清单文件
pub fn parse_manifest_file(path: &Path) -> Result<Vec<ManifestGroup>> {
    let file = File::open(path).map_err(|e| UvkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    parse_manifest(file, base_dir, &path.display().to_string())
}

/// 从任意读取器解析清单
pub fn parse_manifest<R: Read>(
    reader: R,
    base_dir: &Path,
    manifest_name: &str,
) -> Result<Vec<ManifestGroup>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut groups: Vec<ManifestGroup> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: ManifestRow = record.deserialize(Some(&headers))?;

        let invalid = |reason: String| UvkitError::ManifestError {
            path: manifest_name.to_string(),
            line,
            reason,
        };

        if row.compound.is_empty() {
            return Err(invalid("empty compound name".to_string()));
        }
        if row.file.is_empty() {
            return Err(invalid("empty file path".to_string()));
        }

        let range = match (row.low, row.high) {
            (Some(low), Some(high)) => Some(FilterRange::new(low, high)?),
            (None, None) => None,
            _ => {
                return Err(invalid(
                    "'low' and 'high' must be given together".to_string(),
                ))
            }
        };

        let entry = ManifestEntry {
            path: base_dir.join(&row.file),
            concentration: row.concentration,
            range,
        };

        match groups.iter_mut().find(|g| g.name == row.compound) {
            Some(group) => group.entries.push(entry),
            None => groups.push(ManifestGroup {
                name: row.compound,
                entries: vec![entry],
            }),
        }
    }

    Ok(groups)
}

/// 读取清单引用的光谱文件，生成组装器输入
///
/// 缺失或不可读的文件记录在所属组中，不影响其他组。
pub fn load_groups(groups: &[ManifestGroup], range: Option<FilterRange>) -> Vec<GroupInput> {
    groups
        .iter()
        .map(|group| GroupInput {
            name: group.name.clone(),
            files: group
                .entries
                .iter()
                .map(|entry| {
                    spectrum::load_input(&entry.path, entry.concentration.clone(), entry.range)
                })
                .collect(),
            range,
        })
        .collect()
}
