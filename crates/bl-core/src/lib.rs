//! # bl-core
//!
//! Shared foundation for BetaLab: the error taxonomy and the report
//! types that flow between the rule engine, the scenario generators,
//! and the OLS fitter.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::Coefficient;
