//! Fit reports, plain-text rendering, and with/without comparisons.

use std::fmt::Write as _;

use bl_core::{Coefficient, Result};
use bl_sim::Dataset;
use serde::{Deserialize, Serialize};

use crate::fit::fit;

/// Result of one OLS fit: ordered coefficient reports plus fit-level
/// statistics. Immutable; produced per fit call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    /// Name of the outcome column.
    pub outcome: String,
    /// `(name, coefficient)` pairs, intercept first, then covariates in
    /// declared order.
    pub coefficients: Vec<(String, Coefficient)>,
    /// SSE / (n − p − 1).
    pub residual_variance: f64,
    /// Number of observations.
    pub n_obs: usize,
    /// Residual degrees of freedom (n − p − 1).
    pub df_resid: usize,
}

impl FitReport {
    /// Look up a coefficient by name.
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Render a plain-text table: term, estimate, SE, 95% CI bounds.
    ///
    /// Layout is presentation only; the numeric contract lives in the
    /// struct fields.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<16} {:>12} {:>12} {:>12} {:>12}",
            "term", "estimate", "std.err", "ci95.lo", "ci95.hi"
        );
        for (name, c) in &self.coefficients {
            let _ = writeln!(
                out,
                "{:<16} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                name, c.estimate, c.std_error, c.ci_lower, c.ci_upper
            );
        }
        let _ = writeln!(
            out,
            "n = {}, df = {}, residual variance = {:.4}",
            self.n_obs, self.df_resid, self.residual_variance
        );
        out
    }
}

/// A pair of fits differing by one covariate, the shape every teaching
/// scenario is exercised in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Fit without the covariate under discussion.
    pub without: FitReport,
    /// Fit with it included.
    pub with_extra: FitReport,
}

/// Fit `outcome ~ base` and `outcome ~ base + extra` on the same dataset.
pub fn compare_fits(
    dataset: &Dataset,
    outcome: &str,
    base_covariates: &[&str],
    extra_covariate: &str,
) -> Result<ScenarioComparison> {
    let without = fit(dataset, outcome, base_covariates)?;
    let mut with_names: Vec<&str> = base_covariates.to_vec();
    with_names.push(extra_covariate);
    let with_extra = fit(dataset, outcome, &with_names)?;
    Ok(ScenarioComparison { without, with_extra })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dataset() -> Dataset {
        let rows: Vec<Vec<f64>> = (0..10)
            .map(|i| {
                let x = i as f64;
                let z = (i % 2) as f64;
                vec![x, z, 2.0 * x + 3.0 * z + 1.0]
            })
            .collect();
        Dataset::new(
            vec!["x".to_string(), "z".to_string(), "y".to_string()],
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_render_table_lists_all_terms() {
        let report = fit(&toy_dataset(), "y", &["x", "z"]).unwrap();
        let table = report.render_table();
        for needle in ["term", "intercept", "x", "z", "ci95.lo"] {
            assert!(table.contains(needle), "missing '{}' in:\n{}", needle, table);
        }
    }

    #[test]
    fn test_compare_fits_shapes() {
        let cmp = compare_fits(&toy_dataset(), "y", &["x"], "z").unwrap();
        assert_eq!(cmp.without.coefficients.len(), 2);
        assert_eq!(cmp.with_extra.coefficients.len(), 3);
        assert!(cmp.with_extra.coefficient("z").is_some());
        assert!(cmp.without.coefficient("z").is_none());
    }

    #[test]
    fn test_compare_fits_duplicate_extra_fails() {
        assert!(compare_fits(&toy_dataset(), "y", &["x"], "x").is_err());
    }
}
