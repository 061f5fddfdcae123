//! Declarative regression functional forms.
//!
//! A [`RegressionForm`] is the input to the rule engine: which transform the
//! outcome carries, and an ordered list of covariate terms. Validation happens
//! at construction so the derivation code can assume a well-formed model.

use std::collections::HashMap;

use bl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Transform applied to the outcome variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeTransform {
    /// Outcome modeled on its natural scale.
    Identity,
    /// Outcome modeled as log(y); coefficients are semi-elasticities.
    Log,
}

/// Transform applied to one covariate term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CovariateTransform {
    /// The variable enters untransformed with a single coefficient.
    Linear,
    /// The variable enters as log(x) with a single coefficient.
    Log,
    /// The variable enters as x, x², ..., x^degree (one coefficient each).
    Polynomial {
        /// Highest power included; must be in `1..=MAX_POLY_DEGREE`.
        degree: u32,
    },
    /// Product term x·z with a single coefficient; `z` must be a variable
    /// already declared by an earlier base term.
    InteractionWith(String),
}

/// Highest polynomial degree a form may declare. Slopes of higher-degree
/// terms have no interpretive value, and the bound keeps the power
/// arithmetic in the derivation comfortably inside `i32`.
pub const MAX_POLY_DEGREE: u32 = 16;

/// One term of the linear predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovariateTerm {
    /// Variable the term belongs to.
    pub variable: String,
    /// How the variable enters the model.
    pub transform: CovariateTransform,
}

impl CovariateTerm {
    /// Shorthand constructor.
    pub fn new(variable: impl Into<String>, transform: CovariateTransform) -> Self {
        Self { variable: variable.into(), transform }
    }

    /// Number of coefficients the term owns.
    pub(crate) fn width(&self) -> usize {
        match &self.transform {
            CovariateTransform::Polynomial { degree } => *degree as usize,
            _ => 1,
        }
    }

    fn is_base(&self) -> bool {
        !matches!(self.transform, CovariateTransform::InteractionWith(_))
    }
}

/// A regression functional form: outcome transform plus ordered covariate
/// terms. Coefficients are indexed `b0` (intercept), then left to right over
/// the terms, a polynomial term of degree d owning d consecutive slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionForm {
    outcome_transform: OutcomeTransform,
    terms: Vec<CovariateTerm>,
}

impl RegressionForm {
    /// Build and validate a form.
    ///
    /// Rules enforced:
    /// - at least one term;
    /// - polynomial degree in `1..=MAX_POLY_DEGREE`;
    /// - at most one base (non-interaction) term per variable;
    /// - interaction terms reference two distinct, previously declared
    ///   base variables, with no repeated pair.
    pub fn new(outcome_transform: OutcomeTransform, terms: Vec<CovariateTerm>) -> Result<Self> {
        if terms.is_empty() {
            return Err(Error::Validation("form must declare at least one term".to_string()));
        }

        let mut declared: Vec<&str> = Vec::with_capacity(terms.len());
        let mut pairs: Vec<(String, String)> = Vec::new();

        for term in &terms {
            match &term.transform {
                CovariateTransform::Polynomial { degree }
                    if !(1..=MAX_POLY_DEGREE).contains(degree) =>
                {
                    return Err(Error::Validation(format!(
                        "polynomial degree must be in 1..={} for '{}', got {}",
                        MAX_POLY_DEGREE, term.variable, degree
                    )));
                }
                CovariateTransform::InteractionWith(partner) => {
                    if *partner == term.variable {
                        return Err(Error::Validation(format!(
                            "interaction on '{}' must reference a different variable",
                            term.variable
                        )));
                    }
                    for v in [term.variable.as_str(), partner.as_str()] {
                        if !declared.contains(&v) {
                            return Err(Error::Validation(format!(
                                "interaction references '{}' before it is declared",
                                v
                            )));
                        }
                    }
                    let mut pair = (term.variable.clone(), partner.clone());
                    if pair.0 > pair.1 {
                        std::mem::swap(&mut pair.0, &mut pair.1);
                    }
                    if pairs.contains(&pair) {
                        return Err(Error::Validation(format!(
                            "duplicate interaction between '{}' and '{}'",
                            pair.0, pair.1
                        )));
                    }
                    pairs.push(pair);
                }
                _ => {}
            }

            if term.is_base() {
                if declared.contains(&term.variable.as_str()) {
                    return Err(Error::Validation(format!(
                        "variable '{}' declares more than one transform",
                        term.variable
                    )));
                }
                declared.push(term.variable.as_str());
            }
        }

        Ok(Self { outcome_transform, terms })
    }

    /// Outcome transform of the form.
    pub fn outcome_transform(&self) -> OutcomeTransform {
        self.outcome_transform
    }

    /// Declared terms, in order.
    pub fn terms(&self) -> &[CovariateTerm] {
        &self.terms
    }

    /// Total number of coefficients, intercept included.
    pub fn n_coefficients(&self) -> usize {
        1 + self.terms.iter().map(|t| t.width()).sum::<usize>()
    }

    /// Coefficient slot of the first coefficient owned by term `index`.
    pub(crate) fn coef_offset(&self, index: usize) -> usize {
        1 + self.terms[..index].iter().map(|t| t.width()).sum::<usize>()
    }

    /// Index of the base (non-interaction) term for `variable`, if any.
    pub(crate) fn base_term(&self, variable: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.is_base() && t.variable == variable)
    }

    /// Names `b0..b{k-1}` for display.
    pub fn coefficient_names(&self) -> Vec<String> {
        (0..self.n_coefficients()).map(|i| format!("b{}", i)).collect()
    }
}

/// Held-fixed values of variables needed to evaluate a rule (the interaction
/// partner's value, or the point a polynomial slope is taken at).
#[derive(Debug, Clone, Default)]
pub struct EvalPoint {
    values: HashMap<String, f64>,
}

impl EvalPoint {
    /// Empty evaluation point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable's held-fixed value (builder style).
    pub fn with(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.values.insert(variable.into(), value);
        self
    }

    /// Look up a variable's value.
    pub fn get(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(v: &str, t: CovariateTransform) -> CovariateTerm {
        CovariateTerm::new(v, t)
    }

    #[test]
    fn test_valid_form_coefficient_layout() {
        let form = RegressionForm::new(
            OutcomeTransform::Identity,
            vec![
                term("x", CovariateTransform::Polynomial { degree: 2 }),
                term("z", CovariateTransform::Linear),
                term("x", CovariateTransform::InteractionWith("z".to_string())),
            ],
        )
        .unwrap();
        // b0 intercept, b1/b2 for x and x², b3 for z, b4 for x·z.
        assert_eq!(form.n_coefficients(), 5);
        assert_eq!(form.coef_offset(0), 1);
        assert_eq!(form.coef_offset(1), 3);
        assert_eq!(form.coef_offset(2), 4);
        assert_eq!(form.coefficient_names()[4], "b4");
    }

    #[test]
    fn test_rejects_degree_out_of_range() {
        for degree in [0, MAX_POLY_DEGREE + 1, u32::MAX] {
            let err = RegressionForm::new(
                OutcomeTransform::Identity,
                vec![term("x", CovariateTransform::Polynomial { degree })],
            );
            assert!(err.is_err(), "degree {} accepted", degree);
        }
        assert!(RegressionForm::new(
            OutcomeTransform::Identity,
            vec![term("x", CovariateTransform::Polynomial { degree: MAX_POLY_DEGREE })],
        )
        .is_ok());
    }

    #[test]
    fn test_rejects_duplicate_base_transform() {
        let err = RegressionForm::new(
            OutcomeTransform::Identity,
            vec![
                term("x", CovariateTransform::Linear),
                term("x", CovariateTransform::Log),
            ],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_interaction_with_undeclared() {
        let err = RegressionForm::new(
            OutcomeTransform::Identity,
            vec![
                term("x", CovariateTransform::Linear),
                term("x", CovariateTransform::InteractionWith("z".to_string())),
            ],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_self_interaction_and_duplicate_pair() {
        assert!(RegressionForm::new(
            OutcomeTransform::Identity,
            vec![
                term("x", CovariateTransform::Linear),
                term("x", CovariateTransform::InteractionWith("x".to_string())),
            ],
        )
        .is_err());

        assert!(RegressionForm::new(
            OutcomeTransform::Identity,
            vec![
                term("x", CovariateTransform::Linear),
                term("z", CovariateTransform::Linear),
                term("x", CovariateTransform::InteractionWith("z".to_string())),
                term("z", CovariateTransform::InteractionWith("x".to_string())),
            ],
        )
        .is_err());
    }

    #[test]
    fn test_eval_point_lookup() {
        let at = EvalPoint::new().with("z", 2.5);
        assert_eq!(at.get("z"), Some(2.5));
        assert_eq!(at.get("x"), None);
    }
}
