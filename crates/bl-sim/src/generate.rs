//! Scenario data generation.
//!
//! Each unit is drawn independently, with a fixed per-unit sampling order so
//! that identical `(spec, seed)` pairs reproduce bit-identical datasets.

use bl_core::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution, Normal};

use crate::dataset::Dataset;
use crate::scenario::{ScenarioKind, ScenarioSpec};

#[inline]
fn as_indicator(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Generate one dataset realizing `spec`'s causal structure.
///
/// Deterministic given `seed`; the caller owns seed policy (the core never
/// reads unseeded global randomness).
pub fn generate(spec: &ScenarioSpec, seed: u64) -> Result<Dataset> {
    spec.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let aux = &spec.aux;
    // Validated by `spec.validate()` above, so these cannot fail.
    let noise = Normal::new(0.0, spec.noise_sd).expect("noise_sd validated > 0");
    let coin_high = Bernoulli::new(aux.treat_prob_high).expect("treat_prob_high validated");
    let coin_low = Bernoulli::new(aux.treat_prob_low).expect("treat_prob_low validated");
    let fair_coin = Bernoulli::new(0.5).expect("0.5 is a valid probability");

    let n = spec.sample_size;
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);

    match spec.kind {
        ScenarioKind::Confounder => {
            for _ in 0..n {
                let confounder = noise.sample(&mut rng);
                let coin = if confounder > 0.0 { &coin_high } else { &coin_low };
                let treatment = as_indicator(coin.sample(&mut rng));
                let outcome = aux.confounder_slope * confounder
                    + spec.true_effect * treatment
                    + aux.outcome_intercept
                    + noise.sample(&mut rng);
                rows.push(vec![confounder, treatment, outcome]);
            }
        }
        ScenarioKind::DownstreamMediator => {
            let mediator_base =
                Normal::new(aux.mediator_mean, aux.mediator_sd).expect("mediator_sd validated > 0");
            for _ in 0..n {
                let treatment = as_indicator(fair_coin.sample(&mut rng));
                let mediator = mediator_base.sample(&mut rng) + aux.mediator_uplift * treatment;
                // Outcome depends on treatment only through the mediator.
                let outcome = aux.outcome_intercept
                    + 10.0 * spec.true_effect * mediator
                    + noise.sample(&mut rng);
                rows.push(vec![treatment, mediator, outcome]);
            }
        }
        ScenarioKind::Collider => {
            for _ in 0..n {
                let treatment = as_indicator(fair_coin.sample(&mut rng));
                // true_effect = 0 gives the textbook null-effect collider case.
                let outcome = aux.outcome_intercept
                    + spec.true_effect * treatment
                    + noise.sample(&mut rng);
                let collider =
                    outcome + aux.collider_treat_shift * treatment + noise.sample(&mut rng);
                rows.push(vec![treatment, outcome, collider]);
            }
        }
        ScenarioKind::PrecisionTradeoff => {
            let aux_pred = Normal::new(aux.aux_mean, aux.aux_sd).expect("aux_sd validated > 0");
            for _ in 0..n {
                let aux_predictor = aux_pred.sample(&mut rng);
                let ad_exposure = as_indicator(fair_coin.sample(&mut rng));
                let coin = if ad_exposure == 1.0 { &coin_high } else { &coin_low };
                let treatment = as_indicator(coin.sample(&mut rng));
                let outcome = aux.outcome_intercept
                    + noise.sample(&mut rng)
                    + spec.true_effect * treatment
                    + aux_predictor;
                rows.push(vec![aux_predictor, ad_exposure, treatment, outcome]);
            }
        }
    }

    let columns = spec.kind.columns().iter().map(|s| s.to_string()).collect();
    Dataset::new(columns, rows)
}
