//! # Beer-Lambert 线性拟合
//!
//! 对峰值吸光度与浓度做普通最小二乘回归：
//!
//! ```text
//! A = ε·c + b
//! slope     = Sxy / Sxx
//! intercept = ȳ - slope·x̄
//! R²        = 1 - SSres / SStot
//! ```
//!
//! 闭式解，双精度，无正则化。
//!
//! ## 依赖关系
//! - 被 `analysis/assembler.rs` 调用
//! - 使用 `models/calibration.rs`

use crate::error::AnalysisError;
use crate::models::{CalibrationFit, PeakObservation};

/// 拟合所需的最少点数
pub const MIN_FIT_POINTS: usize = 2;

/// 简单线性回归，返回 (slope, intercept)；x 方差为零时返回 None
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.is_empty() || x.iter().all(|&xi| xi == x[0]) {
        return None;
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let (sxx, sxy) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxx + dx * dx, sxy + dx * (yi - y_mean))
        });

    let slope = sxy / sxx;
    Some((slope, y_mean - slope * x_mean))
}

/// 决定系数 R²，截断到 [0, 1]
///
/// 观测值无方差时，残差必然为零，记为 1。
pub fn r_squared(y: &[f64], fitted: &[f64]) -> f64 {
    if y.iter().all(|&yi| yi == y[0]) {
        return 1.0;
    }

    let n = y.len() as f64;
    let y_mean = y.iter().sum::<f64>() / n;

    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ss_res: f64 = y.iter().zip(fitted).map(|(yi, fi)| (yi - fi).powi(2)).sum();

    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

/// 对按浓度排序的峰值表做标定拟合
pub fn fit_calibration(peaks: &[PeakObservation]) -> Result<CalibrationFit, AnalysisError> {
    if peaks.len() < MIN_FIT_POINTS {
        return Err(AnalysisError::InsufficientData {
            found: peaks.len(),
            required: MIN_FIT_POINTS,
        });
    }

    let x: Vec<f64> = peaks.iter().map(|p| p.concentration).collect();
    let y: Vec<f64> = peaks.iter().map(|p| p.absorbance).collect();

    let (slope, intercept) = linear_regression(&x, &y).ok_or(AnalysisError::DegenerateFit)?;
    let fitted_values: Vec<f64> = x.iter().map(|xi| slope * xi + intercept).collect();
    let r_squared = r_squared(&y, &fitted_values);

    Ok(CalibrationFit {
        slope,
        intercept,
        r_squared,
        fitted_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaks(rows: &[(f64, f64)]) -> Vec<PeakObservation> {
        rows.iter()
            .enumerate()
            .map(|(i, &(c, a))| PeakObservation {
                source: format!("{}.txt", i),
                concentration: c,
                absorbance: a,
                wavelength: 210.0,
            })
            .collect()
    }

    #[test]
    fn test_simple_linear_regression() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 5.0, 4.0, 5.0];
        let (slope, intercept) = linear_regression(&x, &y).unwrap();
        assert!((slope - 0.6).abs() < 1e-9);
        assert!((intercept - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_two_point_scenario() {
        let fit = fit_calibration(&peaks(&[(0.001, 0.50), (0.002, 1.00)])).unwrap();
        assert!((fit.slope - 500.0).abs() < 1e-6);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.fitted_values.len(), 2);
        assert!((fit.fitted_values[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_noise_free_round_trip() {
        let (m, b) = (12_500.0, 0.035);
        let conc = [1e-5, 2e-5, 4e-5, 8e-5, 1.6e-4];
        let rows: Vec<(f64, f64)> = conc.iter().map(|&c| (c, m * c + b)).collect();
        let fit = fit_calibration(&peaks(&rows)).unwrap();
        assert!((fit.slope - m).abs() / m < 1e-9);
        assert!((fit.intercept - b).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        for ((_, a), f) in rows.iter().zip(&fit.fitted_values) {
            assert!((a - f).abs() < 1e-9);
        }
    }

    #[test]
    fn test_r_squared_moves_with_trend() {
        let base = fit_calibration(&peaks(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.5)])).unwrap();
        assert!(base.r_squared < 1.0);

        // 第三点更接近趋势 → R² 上升
        let closer = fit_calibration(&peaks(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.1)])).unwrap();
        assert!(closer.r_squared > base.r_squared);

        // 第三点偏离趋势 → R² 下降
        let farther = fit_calibration(&peaks(&[(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)])).unwrap();
        assert!(farther.r_squared < base.r_squared);
        assert!((0.0..=1.0).contains(&farther.r_squared));
    }

    #[test]
    fn test_insufficient_data() {
        let err = fit_calibration(&peaks(&[(0.001, 0.5)])).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                found: 1,
                required: 2
            }
        );
        assert!(fit_calibration(&[]).is_err());
    }

    #[test]
    fn test_identical_points_are_degenerate() {
        let err = fit_calibration(&peaks(&[(0.001, 0.5), (0.001, 0.5)])).unwrap_err();
        assert_eq!(err, AnalysisError::DegenerateFit);

        let err = fit_calibration(&peaks(&[(0.002, 0.5), (0.002, 0.9), (0.002, 0.7)])).unwrap_err();
        assert_eq!(err.kind(), "DegenerateFitError");
    }

    #[test]
    fn test_flat_response_is_exact_fit() {
        let fit = fit_calibration(&peaks(&[(0.001, 0.4), (0.002, 0.4)])).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 1.0);
    }
}
