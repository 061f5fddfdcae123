//! # bl-ols
//!
//! Ordinary-least-squares fitting and reporting over `bl-sim` datasets.
//!
//! [`fit`] solves the normal equations for a declared outcome and covariate
//! set, returning point estimates, standard errors, and t-based 95%
//! confidence intervals in a [`FitReport`]. [`compare_fits`] runs the
//! with/without-covariate pairing the causal teaching scenarios are built
//! around.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fit;
pub mod report;

pub use fit::fit;
pub use report::{compare_fits, FitReport, ScenarioComparison};
