//! Symbolic slope expressions.
//!
//! All marginal-effect derivatives produced by the engine are linear in the
//! model coefficients once the evaluation point is folded in, so an
//! expression is just a sum of scaled coefficient references (plus optional
//! constants). That keeps evaluation trivial and rendering readable.

use std::fmt;

use bl_core::{Error, Result};

/// One addend of a [`SlopeExpr`]: `scale · b{coef}`, or a bare constant.
#[derive(Debug, Clone, PartialEq)]
pub struct SlopeTerm {
    /// Multiplier in front of the coefficient (or the constant itself).
    pub scale: f64,
    /// Coefficient slot, `None` for a constant addend.
    pub coef: Option<usize>,
}

/// A sum of scaled coefficient references, e.g. `b1 + 2·b2·x` with the point
/// `x` already folded into the scales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlopeExpr {
    terms: Vec<SlopeTerm>,
}

impl SlopeExpr {
    /// Empty expression (evaluates to zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `scale · b{coef}`.
    pub fn push_coef(&mut self, scale: f64, coef: usize) {
        self.terms.push(SlopeTerm { scale, coef: Some(coef) });
    }

    /// Append a bare constant.
    pub fn push_const(&mut self, scale: f64) {
        self.terms.push(SlopeTerm { scale, coef: None });
    }

    /// Addends of the sum.
    pub fn terms(&self) -> &[SlopeTerm] {
        &self.terms
    }

    /// Highest coefficient slot referenced, if any.
    pub fn max_coef(&self) -> Option<usize> {
        self.terms.iter().filter_map(|t| t.coef).max()
    }

    /// Evaluate against a concrete coefficient vector (`coefs[i]` = `b{i}`).
    pub fn evaluate(&self, coefs: &[f64]) -> Result<f64> {
        if let Some(max) = self.max_coef() {
            if max >= coefs.len() {
                return Err(Error::Validation(format!(
                    "expression references b{} but only {} coefficients were supplied",
                    max,
                    coefs.len()
                )));
            }
        }
        Ok(self
            .terms
            .iter()
            .map(|t| match t.coef {
                Some(i) => t.scale * coefs[i],
                None => t.scale,
            })
            .sum())
    }
}

/// Render a scale factor compactly: integers without decimals, everything
/// else with up to six significant decimals, trailing zeros trimmed.
fn fmt_scale(scale: f64) -> String {
    if (scale - scale.round()).abs() < 1e-12 && scale.abs() < 1e12 {
        format!("{}", scale.round() as i64)
    } else {
        let s = format!("{:.6}", scale);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        s.to_string()
    }
}

impl fmt::Display for SlopeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, t) in self.terms.iter().enumerate() {
            let (sign, mag) = if t.scale < 0.0 { ("-", -t.scale) } else { ("+", t.scale) };
            if i == 0 {
                if sign == "-" {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", sign)?;
            }
            match t.coef {
                Some(c) if (mag - 1.0).abs() < 1e-12 => write!(f, "b{}", c)?,
                Some(c) => write!(f, "{}·b{}", fmt_scale(mag), c)?,
                None => write!(f, "{}", fmt_scale(mag))?,
            }
        }
        Ok(())
    }
}
