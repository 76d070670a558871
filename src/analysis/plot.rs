//! # 图表生成
//!
//! 使用 `plotters` 库生成两类图表：
//! - 截取后的 UV-Vis 光谱叠加图（每个浓度一条曲线）
//! - Beer-Lambert 标定图（实测点 + 拟合直线）
//!
//! 支持 PNG 和 SVG 输出。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/calibration.rs` 的 GroupReport, CalibrationFit
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, UvkitError};
use crate::models::{CalibrationFit, GroupReport};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 图表尺寸与格式
#[derive(Debug, Clone, Copy)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

const SINGLE_POINT_MARGIN_NM: f64 = 5.0;

fn plot_err<E: std::fmt::Debug>(e: E) -> UvkitError {
    UvkitError::PlotError(format!("{:?}", e))
}

/// 生成光谱叠加图
pub fn generate_spectra_plot(
    report: &GroupReport,
    output_path: &Path,
    options: PlotOptions,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_spectra_chart(&root, report)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_spectra_chart(&root, report)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 生成 Beer-Lambert 标定图
pub fn generate_calibration_plot(
    report: &GroupReport,
    fit: &CalibrationFit,
    output_path: &Path,
    options: PlotOptions,
) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_calibration_chart(&root, report, fit)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_calibration_chart(&root, report, fit)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 光谱图的波长轴范围
///
/// 所有点落在同一波长时以该波长为中心留出余量；无数据时用组截取范围。
fn wavelength_bounds(report: &GroupReport) -> (f64, f64) {
    let (lo, hi) = report
        .traces
        .iter()
        .flat_map(|t| t.points.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.wavelength), hi.max(p.wavelength))
        });

    if lo < hi {
        (lo, hi)
    } else if lo == hi {
        (lo - SINGLE_POINT_MARGIN_NM, hi + SINGLE_POINT_MARGIN_NM)
    } else {
        (report.range.low, report.range.high.max(report.range.low + 1.0))
    }
}

/// 绘制光谱叠加图
fn draw_spectra_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    report: &GroupReport,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (x_min, x_max) = wavelength_bounds(report);
    let y_max = report
        .traces
        .iter()
        .flat_map(|t| t.points.iter())
        .fold(0.0_f64, |y, p| y.max(p.absorbance));
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("UV-Vis Spectra: {}", report.name),
            ("sans-serif", 28).into_font(),
        )
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Absorbance")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    for (i, trace) in report.traces.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                trace.points.iter().map(|p| (p.wavelength, p.absorbance)),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(format!("{:.6} mol/L", trace.concentration))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    if !report.traces.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}

/// 绘制 Beer-Lambert 标定图
fn draw_calibration_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    report: &GroupReport,
    fit: &CalibrationFit,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let measured: Vec<(f64, f64)> = report
        .peak_table
        .iter()
        .map(|p| (p.concentration, p.absorbance))
        .collect();
    let fitted: Vec<(f64, f64)> = report
        .peak_table
        .iter()
        .zip(&fit.fitted_values)
        .map(|(p, f)| (p.concentration, *f))
        .collect();

    let x_max = measured.iter().map(|(x, _)| *x).fold(0.0_f64, f64::max) * 1.1;
    let (y_min, y_max) = measured
        .iter()
        .chain(fitted.iter())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    let y_pad = (y_max - y_min).abs().max(1e-3) * 0.1;

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Beer-Lambert Plot: {}", report.name),
            ("sans-serif", 28).into_font(),
        )
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max.max(1e-12), (y_min - y_pad)..(y_max + y_pad))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Concentration (mol/dm³)")
        .y_desc("Absorbance")
        .x_label_formatter(&|x| format!("{:.1e}", x))
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    let point_color = RGBColor(0, 102, 204);
    chart
        .draw_series(
            measured
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 5, point_color.filled())),
        )
        .map_err(plot_err)?
        .label("Measured")
        .legend(move |(x, y)| Circle::new((x + 10, y), 5, point_color.filled()));

    chart
        .draw_series(LineSeries::new(fitted, RED.stroke_width(2)))
        .map_err(plot_err)?
        .label(format!(
            "Fit: ε = {:.2} L·mol⁻¹·cm⁻¹, R² = {:.4}",
            fit.slope, fit.r_squared
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    Ok(())
}
