//! Error types for BetaLab

use thiserror::Error;

/// BetaLab error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: bad functional form, missing evaluation point,
    /// unknown scenario kind, non-existent column, non-positive sizes.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Degenerate fit: singular design matrix or insufficient degrees
    /// of freedom. The message names the covariates / n vs p involved.
    #[error("Degeneracy error: {0}")]
    Degeneracy(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_context() {
        let e = Error::Degeneracy("n=3 <= p+1=4".to_string());
        assert!(e.to_string().contains("n=3"));
        let e = Error::Validation("unknown column 'z'".to_string());
        assert!(e.to_string().starts_with("Validation"));
    }
}
