//! # bl-rules
//!
//! Marginal-effect interpretation rules for linear-regression functional
//! forms.
//!
//! Given a declarative [`RegressionForm`] (identity or log outcome; linear,
//! log, polynomial, and interaction covariate terms) and a focal covariate,
//! [`derive_rule`] differentiates the linear predictor symbolically and
//! returns an [`InterpretationRule`]: the familiar "a one-unit increase in x
//! is associated with a `b1 + 2·b2·x` change in y" statements, with both the
//! first-order figure and the exact discrete change (obtained by integrating
//! the derivative across the conventional 1-unit or 1% step).
//!
//! # References
//!
//! - Wooldridge, *Introductory Econometrics*, Ch. 2 and 6 (functional form
//!   and interpretation of logarithmic/quadratic models).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod derive;
pub mod expr;
pub mod form;

pub use derive::{derive_rule, ChangeUnit, DeltaKind, InterpretationRule};
pub use expr::SlopeExpr;
pub use form::{
    CovariateTerm, CovariateTransform, EvalPoint, OutcomeTransform, RegressionForm,
    MAX_POLY_DEGREE,
};
