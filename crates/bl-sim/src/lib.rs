//! # bl-sim
//!
//! Seeded synthetic-data generators for the four canonical causal structures
//! used to teach control-variable decisions: confounder, downstream mediator,
//! collider, and the precision trade-off.
//!
//! Generation is deterministic given `(spec, seed)`; two identical calls
//! produce bit-identical datasets. Pair the output with `bl-ols` to fit the
//! with/without-covariate models each scenario is built to contrast.
//!
//! # References
//!
//! - Angrist & Pischke, *Mostly Harmless Econometrics*, Ch. 3 (omitted
//!   variables and bad controls).
//! - Cinelli, Forney & Pearl (2022), "A crash course in good and bad
//!   controls." *Sociological Methods & Research*.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod generate;
pub mod scenario;

pub use dataset::Dataset;
pub use generate::generate;
pub use scenario::{AuxParams, ScenarioKind, ScenarioSpec};
