//! Run configuration: operator parameters and the alias table.

mod aliases;

pub use aliases::{normalize_email, AliasTable};

use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors. All of these are fatal and are
/// reported before any repository is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tau must be a positive number of days (got {0})")]
    NonPositiveTau(f64),

    #[error("bonus-per-repo cannot be negative (got {0})")]
    NegativeBonus(f64),

    #[error("no repositories given; pass at least one local repository path")]
    NoRepositories,
}

/// Operator-supplied scoring parameters, validated before processing.
#[derive(Debug, Clone)]
pub struct RankParams {
    /// Temporal decay constant in days
    pub tau: f64,
    /// Multiplicative bonus rate per repository beyond the first
    pub bonus_per_repo: f64,
    /// Maximum number of owners to return (0 means return nothing)
    pub limit: usize,
}

impl RankParams {
    pub fn validate(&self, repos: &[PathBuf]) -> Result<(), ConfigError> {
        if !(self.tau > 0.0) {
            return Err(ConfigError::NonPositiveTau(self.tau));
        }
        if self.bonus_per_repo < 0.0 {
            return Err(ConfigError::NegativeBonus(self.bonus_per_repo));
        }
        if repos.is_empty() {
            return Err(ConfigError::NoRepositories);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tau: f64, bonus: f64) -> RankParams {
        RankParams {
            tau,
            bonus_per_repo: bonus,
            limit: 10,
        }
    }

    #[test]
    fn test_valid_params() {
        let repos = vec![PathBuf::from(".")];
        assert!(params(365.0, 0.1).validate(&repos).is_ok());
        assert!(params(1.0, 0.0).validate(&repos).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_tau() {
        let repos = vec![PathBuf::from(".")];
        assert!(matches!(
            params(0.0, 0.1).validate(&repos),
            Err(ConfigError::NonPositiveTau(_))
        ));
        assert!(matches!(
            params(-3.0, 0.1).validate(&repos),
            Err(ConfigError::NonPositiveTau(_))
        ));
        // NaN is not a valid decay constant either
        assert!(params(f64::NAN, 0.1).validate(&repos).is_err());
    }

    #[test]
    fn test_rejects_negative_bonus() {
        let repos = vec![PathBuf::from(".")];
        assert!(matches!(
            params(365.0, -0.1).validate(&repos),
            Err(ConfigError::NegativeBonus(_))
        ));
    }

    #[test]
    fn test_rejects_empty_repo_list() {
        assert!(matches!(
            params(365.0, 0.1).validate(&[]),
            Err(ConfigError::NoRepositories)
        ));
    }
}
