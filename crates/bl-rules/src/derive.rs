//! Symbolic derivation of marginal-effect interpretation rules.
//!
//! The engine differentiates the linear predictor with respect to the focal
//! variable's untransformed value, term by term, and folds the evaluation
//! point into the resulting coefficients-linear expression. For the
//! conventional discrete change (one unit, or 1% of the current value) it
//! additionally integrates the derivative across the step, so the caller gets
//! both the textbook first-order figure and the exact discrete one (the
//! log-covariate case being the familiar `b/100` vs `b·ln(1.01)` pair).

use bl_core::{Error, Result};

use crate::expr::SlopeExpr;
use crate::form::{CovariateTransform, EvalPoint, OutcomeTransform, RegressionForm};

/// Whether the reported change is in outcome units or in percent of the
/// outcome (log-outcome models).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// Change in outcome units.
    Additive,
    /// Percent change of the outcome (semi-elasticity, already ×100).
    Percent,
}

/// The conventional discrete change the rule is stated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeUnit {
    /// One unit of the focal variable.
    UnitIncrease,
    /// One percent of the focal variable's current value (log terms).
    OnePercentIncrease,
}

/// Marginal-effect rule for one focal covariate of a [`RegressionForm`].
///
/// `delta` is the first-order change of the linear predictor per
/// [`ChangeUnit`]; `exact_eta` the exact change of the linear predictor
/// across that discrete step. Both are linear in the model coefficients with
/// the evaluation point folded in. Use [`approx_change`](Self::approx_change)
/// and [`exact_change`](Self::exact_change) to get numbers on the reported
/// scale ([`DeltaKind`] applies the ×100 / exp mapping for log outcomes).
#[derive(Debug, Clone)]
pub struct InterpretationRule {
    /// First-order change of the linear predictor per conventional step.
    pub delta: SlopeExpr,
    /// Exact change of the linear predictor across the conventional step.
    pub exact_eta: SlopeExpr,
    /// Reporting scale.
    pub delta_kind: DeltaKind,
    /// The conventional step the rule is stated for.
    pub change_unit: ChangeUnit,
    /// Human-readable statement of the rule.
    pub summary: String,
    n_coefficients: usize,
}

impl InterpretationRule {
    fn check_coefs(&self, coefs: &[f64]) -> Result<()> {
        if coefs.len() != self.n_coefficients {
            return Err(Error::Validation(format!(
                "expected {} coefficients, got {}",
                self.n_coefficients,
                coefs.len()
            )));
        }
        Ok(())
    }

    /// First-order (textbook) change on the reported scale.
    ///
    /// Additive rules return outcome units; percent rules return percent
    /// (i.e. `100 · Δη`).
    pub fn approx_change(&self, coefs: &[f64]) -> Result<f64> {
        self.check_coefs(coefs)?;
        let d_eta = self.delta.evaluate(coefs)?;
        Ok(match self.delta_kind {
            DeltaKind::Additive => d_eta,
            DeltaKind::Percent => 100.0 * d_eta,
        })
    }

    /// Exact discrete change on the reported scale.
    ///
    /// Additive rules integrate the derivative across the step; percent
    /// rules apply the exact exp mapping `100·(exp(Δη) − 1)`.
    pub fn exact_change(&self, coefs: &[f64]) -> Result<f64> {
        self.check_coefs(coefs)?;
        let d_eta = self.exact_eta.evaluate(coefs)?;
        Ok(match self.delta_kind {
            DeltaKind::Additive => d_eta,
            DeltaKind::Percent => 100.0 * d_eta.exp_m1(),
        })
    }
}

fn require_value(at: Option<&EvalPoint>, variable: &str, why: &str) -> Result<f64> {
    let v = at
        .and_then(|p| p.get(variable))
        .ok_or_else(|| {
            Error::Validation(format!(
                "derive_rule needs an evaluation point for '{}' ({})",
                variable, why
            ))
        })?;
    if !v.is_finite() {
        return Err(Error::Validation(format!(
            "evaluation point for '{}' must be finite, got {}",
            variable, v
        )));
    }
    Ok(v)
}

/// Derive the interpretation rule for `focal` under `form`.
///
/// `at` supplies held-fixed values where the slope depends on them: the value
/// of the focal variable itself (polynomial terms of degree >= 2, or a 1%
/// step of a variable that also enters an interaction) and the values of
/// interaction partners. A missing required value is a validation error,
/// never a silent default.
pub fn derive_rule(
    form: &RegressionForm,
    focal: &str,
    at: Option<&EvalPoint>,
) -> Result<InterpretationRule> {
    let base_idx = form.base_term(focal).ok_or_else(|| {
        Error::Validation(format!("focal variable '{}' is not declared in the form", focal))
    })?;

    let change_unit = match form.terms()[base_idx].transform {
        CovariateTransform::Log => ChangeUnit::OnePercentIncrease,
        _ => ChangeUnit::UnitIncrease,
    };

    // Discrete step of the focal variable's raw value. One unit, or 1% of
    // the current value when the base term is logarithmic.
    let dx_for_linear_terms = |at: Option<&EvalPoint>| -> Result<f64> {
        match change_unit {
            ChangeUnit::UnitIncrease => Ok(1.0),
            ChangeUnit::OnePercentIncrease => {
                let x1 = require_value(at, focal, "1% step of a variable with interactions")?;
                Ok(0.01 * x1)
            }
        }
    };

    let mut delta = SlopeExpr::new();
    let mut exact = SlopeExpr::new();

    for (idx, term) in form.terms().iter().enumerate() {
        let offset = form.coef_offset(idx);
        match &term.transform {
            CovariateTransform::Linear if term.variable == focal => {
                let dx = dx_for_linear_terms(at)?;
                delta.push_coef(dx, offset);
                exact.push_coef(dx, offset);
            }
            CovariateTransform::Log if term.variable == focal => {
                // d/dx [b·log(x)] = b/x; over a 1% step the first-order
                // figure is 0.01·b, the integral exactly b·ln(1.01).
                delta.push_coef(0.01, offset);
                exact.push_coef(1.01_f64.ln(), offset);
            }
            CovariateTransform::Polynomial { degree } if term.variable == focal => {
                let d = *degree;
                let x = if d >= 2 {
                    require_value(at, focal, "slope of a polynomial term")?
                } else {
                    0.0 // unused for degree 1
                };
                for k in 1..=d {
                    let slot = offset + (k as usize) - 1;
                    let (approx_scale, exact_scale) = if k == 1 {
                        (1.0, 1.0)
                    } else {
                        (
                            f64::from(k) * x.powi(k as i32 - 1),
                            (x + 1.0).powi(k as i32) - x.powi(k as i32),
                        )
                    };
                    delta.push_coef(approx_scale, slot);
                    exact.push_coef(exact_scale, slot);
                }
            }
            CovariateTransform::InteractionWith(partner) if term.variable == focal => {
                let z = require_value(at, partner, "held-fixed interaction partner")?;
                let dx = dx_for_linear_terms(at)?;
                delta.push_coef(z * dx, offset);
                exact.push_coef(z * dx, offset);
            }
            CovariateTransform::InteractionWith(partner) if partner == focal => {
                let w = require_value(at, &term.variable, "held-fixed interaction partner")?;
                let dx = dx_for_linear_terms(at)?;
                delta.push_coef(w * dx, offset);
                exact.push_coef(w * dx, offset);
            }
            _ => {}
        }
    }

    let delta_kind = match form.outcome_transform() {
        OutcomeTransform::Identity => DeltaKind::Additive,
        OutcomeTransform::Log => DeltaKind::Percent,
    };

    let change_phrase = match change_unit {
        ChangeUnit::UnitIncrease => format!("a one-unit increase in {}", focal),
        ChangeUnit::OnePercentIncrease => format!("a 1% increase in {}", focal),
    };
    let summary = match delta_kind {
        DeltaKind::Additive if delta == exact => {
            format!("{} is associated with a change of {} in the outcome", change_phrase, delta)
        }
        DeltaKind::Additive => format!(
            "{} is associated with a change of approximately {} in the outcome (exact: {})",
            change_phrase, delta, exact
        ),
        DeltaKind::Percent => format!(
            "{} is associated with an approximate 100·({}) percent change in the outcome \
             (exact: 100·(exp({}) − 1) percent)",
            change_phrase, delta, exact
        ),
    };

    Ok(InterpretationRule {
        delta,
        exact_eta: exact,
        delta_kind,
        change_unit,
        summary,
        n_coefficients: form.n_coefficients(),
    })
}
