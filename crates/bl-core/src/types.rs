//! Common report types for BetaLab

use serde::{Deserialize, Serialize};

/// One fitted coefficient with its uncertainty and 95% interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    /// Point estimate.
    pub estimate: f64,

    /// Standard error (sqrt of the covariance diagonal entry).
    pub std_error: f64,

    /// Lower bound of the 95% confidence interval.
    pub ci_lower: f64,

    /// Upper bound of the 95% confidence interval.
    pub ci_upper: f64,
}

impl Coefficient {
    /// Create a coefficient report from estimate, SE, and a t critical value.
    pub fn from_estimate(estimate: f64, std_error: f64, t_crit: f64) -> Self {
        Self {
            estimate,
            std_error,
            ci_lower: estimate - t_crit * std_error,
            ci_upper: estimate + t_crit * std_error,
        }
    }

    /// Whether the 95% interval covers `value`.
    pub fn covers(&self, value: f64) -> bool {
        self.ci_lower <= value && value <= self.ci_upper
    }

    /// Half-width of the 95% interval.
    pub fn ci_half_width(&self) -> f64 {
        0.5 * (self.ci_upper - self.ci_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_estimate_interval() {
        let c = Coefficient::from_estimate(10.0, 2.0, 1.96);
        assert!((c.ci_lower - 6.08).abs() < 1e-12);
        assert!((c.ci_upper - 13.92).abs() < 1e-12);
        assert!(c.covers(10.0));
        assert!(c.covers(6.1));
        assert!(!c.covers(14.0));
    }

    #[test]
    fn test_ci_half_width() {
        let c = Coefficient::from_estimate(0.0, 1.0, 2.0);
        assert!((c.ci_half_width() - 2.0).abs() < 1e-12);
    }
}
