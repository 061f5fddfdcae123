//! Normal-equation OLS fit with t-based intervals.

use bl_core::{Coefficient, Error, Result};
use bl_sim::Dataset;
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::report::FitReport;

/// Two-sided 95% t critical value for `df` residual degrees of freedom.
/// Panics on invalid df (cannot happen after the n > p + 1 check).
#[inline]
fn t_crit_95(df: usize) -> f64 {
    StudentsT::new(0.0, 1.0, df as f64)
        .expect("valid df for t-distribution")
        .inverse_cdf(0.975)
}

/// Fit `outcome ~ intercept + covariates` on `dataset` by OLS.
///
/// Every name must be a dataset column and `covariates` must be free of
/// duplicates, otherwise a validation error is returned. A singular design
/// or `n <= p + 1` is a degeneracy error carrying enough context (covariate
/// names, n vs p) to diagnose.
pub fn fit(dataset: &Dataset, outcome: &str, covariates: &[&str]) -> Result<FitReport> {
    let y_idx = dataset.column_index(outcome)?;
    let mut cov_idx = Vec::with_capacity(covariates.len());
    for (i, &name) in covariates.iter().enumerate() {
        if covariates[..i].contains(&name) {
            return Err(Error::Validation(format!("duplicate covariate '{}'", name)));
        }
        if name == outcome {
            return Err(Error::Validation(format!(
                "'{}' cannot be both outcome and covariate",
                name
            )));
        }
        cov_idx.push(dataset.column_index(name)?);
    }

    let n = dataset.n_rows();
    let p = covariates.len();
    if n <= p + 1 {
        return Err(Error::Degeneracy(format!(
            "insufficient degrees of freedom: n={} <= p+1={} (covariates: {})",
            n,
            p + 1,
            covariates.join(", ")
        )));
    }

    // Design matrix with a leading intercept column.
    let k = p + 1;
    let mut x_data = Vec::with_capacity(n * k);
    let mut y_data = Vec::with_capacity(n);
    for row in dataset.rows() {
        x_data.push(1.0);
        for &j in &cov_idx {
            x_data.push(row[j]);
        }
        y_data.push(row[y_idx]);
    }
    let x = DMatrix::from_row_slice(n, k, &x_data);
    let y = DVector::from_vec(y_data);

    let xtx = x.transpose() * &x;
    let xty = x.transpose() * &y;
    let xtx_inv = xtx.try_inverse().ok_or_else(|| {
        Error::Degeneracy(format!(
            "X'X is singular; covariates ({}) are collinear",
            covariates.join(", ")
        ))
    })?;

    let beta = &xtx_inv * &xty;

    // Residual variance: SSE / (n - p - 1).
    let resid = &y - &x * &beta;
    let sse: f64 = resid.iter().map(|r| r * r).sum();
    let df = n - p - 1;
    let residual_variance = sse / df as f64;

    let t_crit = t_crit_95(df);
    let mut names: Vec<String> = Vec::with_capacity(k);
    names.push("intercept".to_string());
    names.extend(covariates.iter().map(|s| s.to_string()));

    let mut coefficients = Vec::with_capacity(k);
    for (j, name) in names.into_iter().enumerate() {
        let mut var = residual_variance * xtx_inv[(j, j)];
        if var < 0.0 {
            log::warn!("negative variance diagonal for '{}'; clamping to 0", name);
            var = 0.0;
        }
        coefficients.push((name, Coefficient::from_estimate(beta[j], var.sqrt(), t_crit)));
    }

    Ok(FitReport {
        outcome: outcome.to_string(),
        coefficients,
        residual_variance,
        n_obs: n,
        df_resid: df,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn toy_dataset() -> Dataset {
        // x = 0..3, y = [1, 3, 2, 5]: slope 1.1, intercept 1.1 by hand.
        let rows = vec![
            vec![0.0, 1.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 5.0],
        ];
        Dataset::new(vec!["x".to_string(), "y".to_string()], rows).unwrap()
    }

    #[test]
    fn test_hand_computed_simple_regression() {
        let report = fit(&toy_dataset(), "y", &["x"]).unwrap();
        let b0 = report.coefficient("intercept").unwrap();
        let b1 = report.coefficient("x").unwrap();

        assert_relative_eq!(b0.estimate, 1.1, epsilon = 1e-10);
        assert_relative_eq!(b1.estimate, 1.1, epsilon = 1e-10);
        // SSE = 2.7, df = 2, s² = 1.35.
        assert_relative_eq!(report.residual_variance, 1.35, epsilon = 1e-10);
        // SE(b1) = sqrt(s² / Sxx) = sqrt(1.35 / 5).
        assert_relative_eq!(b1.std_error, (0.27_f64).sqrt(), epsilon = 1e-10);
        // SE(b0) = sqrt(s²·(1/n + x̄²/Sxx)) = sqrt(0.945).
        assert_relative_eq!(b0.std_error, (0.945_f64).sqrt(), epsilon = 1e-10);
        // CI uses t(0.975, df=2) = 4.302653.
        let t = (b1.ci_upper - b1.estimate) / b1.std_error;
        assert_relative_eq!(t, 4.302653, epsilon = 1e-5);
    }

    #[test]
    fn test_perfect_fit_has_zero_residual_variance() {
        let rows: Vec<Vec<f64>> =
            (0..6).map(|i| vec![i as f64, 2.0 * i as f64 + 1.0]).collect();
        let d = Dataset::new(vec!["x".to_string(), "y".to_string()], rows).unwrap();
        let report = fit(&d, "y", &["x"]).unwrap();
        assert_relative_eq!(report.coefficient("x").unwrap().estimate, 2.0, epsilon = 1e-9);
        assert!(report.residual_variance.abs() < 1e-18);
    }

    #[test]
    fn test_missing_column_is_validation() {
        let err = fit(&toy_dataset(), "y", &["z"]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    }

    #[test]
    fn test_duplicate_covariate_is_validation() {
        let err = fit(&toy_dataset(), "y", &["x", "x"]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    }

    #[test]
    fn test_outcome_as_covariate_is_validation() {
        let err = fit(&toy_dataset(), "y", &["y"]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    }

    #[test]
    fn test_collinear_pair_is_degeneracy() {
        let rows: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                let x = i as f64;
                vec![x, 2.0 * x, x + 1.0]
            })
            .collect();
        let d = Dataset::new(
            vec!["x1".to_string(), "x2".to_string(), "y".to_string()],
            rows,
        )
        .unwrap();
        let err = fit(&d, "y", &["x1", "x2"]).unwrap_err();
        assert!(matches!(err, Error::Degeneracy(_)), "got {:?}", err);
        assert!(err.to_string().contains("x1"));
    }

    #[test]
    fn test_too_few_rows_is_degeneracy() {
        let rows = vec![vec![0.0, 1.0, 0.5], vec![1.0, 0.0, 1.5], vec![2.0, 1.0, 2.5]];
        let d = Dataset::new(
            vec!["a".to_string(), "b".to_string(), "y".to_string()],
            rows,
        )
        .unwrap();
        // n = 3, p = 2 -> n <= p + 1.
        let err = fit(&d, "y", &["a", "b"]).unwrap_err();
        assert!(matches!(err, Error::Degeneracy(_)), "got {:?}", err);
        assert!(err.to_string().contains("n=3"));
    }
}
