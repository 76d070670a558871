//! # 运行结果输出
//!
//! 两个子命令共用的结果展示与文件输出。
//!
//! ## 功能
//! - 终端表格：每组峰值表、拟合结果、被标记的文件
//! - 并行生成每组图表与峰值 CSV
//! - 写出运行汇总与错误列表
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs`, `commands/compounds.rs` 调用
//! - 使用 `analysis/plot.rs`, `analysis/export.rs`
//! - 使用 `batch/runner.rs` 并行输出

use crate::analysis::{export, plot};
use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::{PlotFormat, RenderArgs};
use crate::error::{Result, UvkitError};
use crate::models::{GroupReport, RunReport};
use crate::utils::output;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 峰值表的一行
#[derive(Tabled)]
struct PeakRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "c (mol/L)")]
    concentration: String,
    #[tabled(rename = "A (max)")]
    absorbance: String,
    #[tabled(rename = "λmax (nm)")]
    wavelength: String,
    #[tabled(rename = "Fitted")]
    fitted: String,
}

/// 打印每组的峰值表与拟合结果
pub fn print_run_report(run: &RunReport) {
    for group in &run.groups {
        output::print_header(&format!("Compound: {} ({})", group.name, group.range));

        let rows: Vec<PeakRow> = group
            .annotated_rows()
            .into_iter()
            .map(|(p, fitted)| PeakRow {
                source: display_name(&p.source),
                concentration: format!("{:.6}", p.concentration),
                absorbance: format!("{:.4}", p.absorbance),
                wavelength: format!("{:.1}", p.wavelength),
                fitted: fitted.map(|f| format!("{:.4}", f)).unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        if rows.is_empty() {
            output::print_warning("No valid peaks in this group");
        } else {
            println!("{}", Table::new(&rows));
        }

        match &group.fit {
            Ok(fit) => output::print_fit(fit.slope, fit.intercept, fit.r_squared),
            Err(e) => output::print_flag(&group.name, e.kind(), &e.to_string()),
        }

        for (file, err) in &group.file_errors {
            output::print_flag(&display_name(file), err.kind(), &err.to_string());
        }
    }
}

/// 打印运行状态
pub fn print_run_status(run: &RunReport) {
    output::print_separator();
    if run.is_partial_failure() {
        output::print_warning(&format!(
            "Partial failure: {} of {} groups fitted; flagged files and groups are listed above",
            run.fitted_count(),
            run.groups.len()
        ));
    } else {
        output::print_success(&format!(
            "Analysis complete: {} groups fitted",
            run.fitted_count()
        ));
    }
}

/// 单组输出配置
struct RenderConfig {
    output_dir: PathBuf,
    options: plot::PlotOptions,
    format: PlotFormat,
    no_plot: bool,
}

/// 写出全部输出文件
pub fn write_outputs(run: &RunReport, args: &RenderArgs) -> Result<()> {
    fs::create_dir_all(&args.output_dir).map_err(|e| UvkitError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let config = RenderConfig {
        output_dir: args.output_dir.clone(),
        options: plot::PlotOptions {
            width: args.width,
            height: args.height,
            use_svg: args.format == PlotFormat::Svg,
        },
        format: args.format,
        no_plot: args.no_plot,
    };

    let slugs = unique_slugs(run.groups.iter().map(|g| g.name.as_str()));
    let jobs: Vec<(&GroupReport, String)> = run.groups.iter().zip(slugs).collect();

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(&jobs, |(group, slug)| render_group(group, slug, &config))?;

    for msg in &result.skips {
        output::print_skip(msg);
    }
    for (name, err) in &result.failures {
        output::print_error(&format!("{}: {}", name, err));
    }

    let summary_path = args.output_dir.join("summary.csv");
    export::summary_to_csv(run, &summary_path)?;
    output::print_success(&format!("Summary saved to '{}'", summary_path.display()));

    if run.is_partial_failure() {
        let errors_path = args.output_dir.join("errors.csv");
        export::errors_to_csv(run, &errors_path)?;
        output::print_warning(&format!("Error list saved to '{}'", errors_path.display()));
    }

    output::print_info(&format!(
        "Wrote {} of {} outputs to '{}' ({} skipped, {} failed)",
        result.success,
        result.total(),
        args.output_dir.display(),
        result.skipped,
        result.failed
    ));

    if result.failed > 0 {
        return Err(UvkitError::Other(format!(
            "{} output file(s) could not be written",
            result.failed
        )));
    }

    Ok(())
}

/// 生成单组的图表与峰值表
fn render_group(group: &GroupReport, slug: &str, config: &RenderConfig) -> Vec<ProcessResult> {
    let ext = config.format.extension();
    let mut results = Vec::new();

    let peaks_path = config.output_dir.join(format!("{}_peaks.csv", slug));
    results.push(to_result(
        &group.name,
        &peaks_path,
        export::peaks_to_csv(group, &peaks_path),
    ));

    if config.no_plot {
        return results;
    }

    if group.traces.is_empty() {
        results.push(ProcessResult::Skipped(format!(
            "{}: no spectra to plot",
            group.name
        )));
    } else {
        let path = config.output_dir.join(format!("{}_spectra.{}", slug, ext));
        let outcome = plot::generate_spectra_plot(group, &path, config.options);
        results.push(to_result(&group.name, &path, outcome));
    }

    match &group.fit {
        Ok(fit) => {
            let path = config.output_dir.join(format!("{}_beer_lambert.{}", slug, ext));
            let outcome = plot::generate_calibration_plot(group, fit, &path, config.options);
            results.push(to_result(&group.name, &path, outcome));
        }
        Err(e) => results.push(ProcessResult::Skipped(format!(
            "{}: no Beer-Lambert plot ({})",
            group.name,
            e.kind()
        ))),
    }

    results
}

fn to_result(name: &str, path: &Path, outcome: Result<()>) -> ProcessResult {
    match outcome {
        Ok(()) => ProcessResult::Success(path.display().to_string()),
        Err(e) => ProcessResult::Failed(format!("{} ({})", name, path.display()), e.to_string()),
    }
}

/// 文件名显示（去掉目录）
fn display_name(id: &str) -> String {
    Path::new(id)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// 为每个组分配运行内唯一的文件名前缀，冲突时追加 `_2`, `_3`, ...
fn unique_slugs<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    names
        .map(|name| {
            let base = slugify(name);
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{}_{}", base, n);
                n += 1;
            }
            slug
        })
        .collect()
}

/// 将组名转换为安全的文件名前缀
fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() {
        "group".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{single_group, Assembler, FileInput};
    use crate::models::RangePreset;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Caffeine"), "caffeine");
        assert_eq!(slugify(" Vitamin B12 (aq) "), "vitamin_b12__aq_");
        assert_eq!(slugify("p-nitrophenol"), "p-nitrophenol");
        assert_eq!(slugify(""), "group");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("data/run1/A.txt"), "A.txt");
        assert_eq!(display_name("A"), "A");
    }

    #[test]
    fn test_unique_slugs() {
        let names = ["Caffeine", "caffeine", "caffeine_2", "咖啡因", "茶碱"];
        assert_eq!(
            unique_slugs(names.into_iter()),
            vec!["caffeine", "caffeine_2", "caffeine_2_2", "___", "__"]
        );
        assert_eq!(
            unique_slugs(["Vitamin B", "vitamin_b"].into_iter()),
            vec!["vitamin_b", "vitamin_b_2"]
        );
    }

    #[test]
    fn test_colliding_names_get_separate_outputs() {
        let content = "200\t0.10\n210\t0.50\n";
        let file = |id: &str, conc: &str| FileInput {
            id: id.to_string(),
            content: Ok(content.to_string()),
            concentration: conc.to_string(),
            range: None,
        };
        let groups = vec![
            single_group("Caffeine", vec![file("g1a", "0.001"), file("g1b", "0.002")], None),
            single_group("caffeine", vec![file("g2a", "0.001"), file("g2b", "0.002")], None),
        ];
        let run = Assembler::new(RangePreset::Compound).run(&groups).unwrap();

        let dir = std::env::temp_dir().join(format!("uvkit_render_{}", std::process::id()));
        let args = RenderArgs {
            output_dir: dir.clone(),
            format: PlotFormat::Png,
            width: 400,
            height: 300,
            no_plot: true,
            jobs: 2,
        };
        write_outputs(&run, &args).unwrap();

        let first = fs::read_to_string(dir.join("caffeine_peaks.csv")).unwrap();
        let second = fs::read_to_string(dir.join("caffeine_2_peaks.csv")).unwrap();
        assert!(first.contains("g1a") && !first.contains("g2a"));
        assert!(second.contains("g2a") && !second.contains("g1a"));

        fs::remove_dir_all(&dir).ok();
    }
}
