//! Scenario specifications.

use std::str::FromStr;

use bl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// The four canonical causal structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// A common cause of treatment and outcome; omitting it biases the
    /// treatment-effect estimate.
    Confounder,
    /// A variable on the causal path from treatment to outcome; including
    /// it blocks the path and zeroes out the measured effect.
    DownstreamMediator,
    /// A common effect of treatment and outcome; including it manufactures
    /// a spurious association.
    Collider,
    /// Two harmless-looking extra covariates: one predicts the outcome
    /// (tightens the estimate), one predicts only treatment (loosens it).
    PrecisionTradeoff,
}

impl ScenarioKind {
    /// Column names of the dataset this scenario produces, in order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ScenarioKind::Confounder => &["confounder", "treatment", "outcome"],
            ScenarioKind::DownstreamMediator => &["treatment", "mediator", "outcome"],
            ScenarioKind::Collider => &["treatment", "outcome", "collider"],
            ScenarioKind::PrecisionTradeoff => {
                &["aux_predictor", "ad_exposure", "treatment", "outcome"]
            }
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = Error;

    /// Parse a kind name. Unknown names are a validation error; there is
    /// deliberately no default scenario to fall back to.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "confounder" => Ok(ScenarioKind::Confounder),
            "downstream_mediator" => Ok(ScenarioKind::DownstreamMediator),
            "collider" => Ok(ScenarioKind::Collider),
            "precision_tradeoff" => Ok(ScenarioKind::PrecisionTradeoff),
            other => Err(Error::Validation(format!("unknown scenario kind '{}'", other))),
        }
    }
}

/// Scenario-specific shape parameters, with the conventional teaching
/// defaults. All fields are overridable for sensitivity exercises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuxParams {
    /// Outcome slope on the confounder.
    pub confounder_slope: f64,
    /// Baseline outcome level added in every scenario.
    pub outcome_intercept: f64,
    /// P(treatment = 1) when the upstream driver is high (confounder > 0,
    /// or ad exposure = 1).
    pub treat_prob_high: f64,
    /// P(treatment = 1) when the upstream driver is low.
    pub treat_prob_low: f64,
    /// Mediator baseline mean.
    pub mediator_mean: f64,
    /// Mediator standard deviation.
    pub mediator_sd: f64,
    /// Additive mediator shift under treatment.
    pub mediator_uplift: f64,
    /// Treatment shift entering the collider.
    pub collider_treat_shift: f64,
    /// Mean of the outcome-predicting auxiliary variable.
    pub aux_mean: f64,
    /// Standard deviation of the auxiliary variable.
    pub aux_sd: f64,
}

impl Default for AuxParams {
    fn default() -> Self {
        Self {
            confounder_slope: 100.0,
            outcome_intercept: 50.0,
            treat_prob_high: 0.8,
            treat_prob_low: 0.2,
            mediator_mean: 0.5,
            mediator_sd: 0.1,
            mediator_uplift: 0.1,
            collider_treat_shift: 10.0,
            aux_mean: 100.0,
            aux_sd: 10.0,
        }
    }
}

impl AuxParams {
    fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("treat_prob_high", self.treat_prob_high),
            ("treat_prob_low", self.treat_prob_low),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(Error::Validation(format!(
                    "{} must be in [0, 1], got {}",
                    name, p
                )));
            }
        }
        for (name, sd) in [("mediator_sd", self.mediator_sd), ("aux_sd", self.aux_sd)] {
            if !sd.is_finite() || sd <= 0.0 {
                return Err(Error::Validation(format!("{} must be > 0, got {}", name, sd)));
            }
        }
        Ok(())
    }
}

/// Full configuration of one synthetic-data scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Which causal structure to generate.
    pub kind: ScenarioKind,
    /// Number of simulated units.
    pub sample_size: usize,
    /// Standard deviation of every Normal noise draw.
    pub noise_sd: f64,
    /// The true causal effect of treatment on outcome.
    pub true_effect: f64,
    /// Scenario-specific shape parameters.
    pub aux: AuxParams,
}

impl ScenarioSpec {
    /// Build a spec with default [`AuxParams`], validating sizes.
    pub fn new(kind: ScenarioKind, sample_size: usize, noise_sd: f64, true_effect: f64) -> Result<Self> {
        Self::with_aux(kind, sample_size, noise_sd, true_effect, AuxParams::default())
    }

    /// Build a spec with explicit [`AuxParams`].
    pub fn with_aux(
        kind: ScenarioKind,
        sample_size: usize,
        noise_sd: f64,
        true_effect: f64,
        aux: AuxParams,
    ) -> Result<Self> {
        let spec = Self { kind, sample_size, noise_sd, true_effect, aux };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the spec's numeric constraints. Fields are public, so the
    /// generator re-checks before sampling.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size < 1 {
            return Err(Error::Validation("sample_size must be >= 1".to_string()));
        }
        if !self.noise_sd.is_finite() || self.noise_sd <= 0.0 {
            return Err(Error::Validation(format!(
                "noise_sd must be finite and > 0, got {}",
                self.noise_sd
            )));
        }
        if !self.true_effect.is_finite() {
            return Err(Error::Validation(format!(
                "true_effect must be finite, got {}",
                self.true_effect
            )));
        }
        self.aux.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_known_names() {
        assert_eq!("confounder".parse::<ScenarioKind>().unwrap(), ScenarioKind::Confounder);
        assert_eq!(
            "precision_tradeoff".parse::<ScenarioKind>().unwrap(),
            ScenarioKind::PrecisionTradeoff
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected_not_defaulted() {
        let err = "mediator?".parse::<ScenarioKind>().unwrap_err();
        assert!(err.to_string().contains("mediator?"));
    }

    #[test]
    fn test_spec_validation() {
        assert!(ScenarioSpec::new(ScenarioKind::Collider, 0, 1.0, 0.0).is_err());
        assert!(ScenarioSpec::new(ScenarioKind::Collider, 10, 0.0, 0.0).is_err());
        assert!(ScenarioSpec::new(ScenarioKind::Collider, 10, -2.0, 0.0).is_err());
        assert!(ScenarioSpec::new(ScenarioKind::Collider, 10, 1.0, f64::NAN).is_err());
        assert!(ScenarioSpec::new(ScenarioKind::Collider, 10, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_aux_params_validation() {
        let aux = AuxParams { treat_prob_high: 1.2, ..AuxParams::default() };
        assert!(ScenarioSpec::with_aux(ScenarioKind::Confounder, 10, 1.0, 5.0, aux).is_err());

        let aux = AuxParams { mediator_sd: 0.0, ..AuxParams::default() };
        assert!(ScenarioSpec::with_aux(ScenarioKind::DownstreamMediator, 10, 1.0, 5.0, aux).is_err());
    }
}
