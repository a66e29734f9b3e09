use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{AdvisorErr, Result};

const DEFAULT_MAX_ITERS: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Parameters of the logistic fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// L2 penalty strength on the standardized coefficients. `0` is the plain
    /// maximum-likelihood fit.
    pub penalty: f64,
    /// Cap on Newton iterations.
    pub max_iters: NonZeroUsize,
    /// The fit stops once no parameter moves by more than this.
    pub tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            penalty: 1.0,
            max_iters: DEFAULT_MAX_ITERS,
            tolerance: 1e-9,
        }
    }
}

impl FitConfig {
    /// # Errors
    /// `InvalidConfig` if the penalty is negative or the tolerance isn't positive.
    pub fn validate(&self) -> Result<()> {
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(AdvisorErr::InvalidConfig(format!(
                "penalty must be a finite, non-negative number, got {}",
                self.penalty
            )));
        }

        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(AdvisorErr::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

/// How the observations are split into a training and a hold-out part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of observations held out for evaluation, in `[0, 1)`.
    pub test_fraction: f64,
    /// Shuffle seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: Some(0),
        }
    }
}

impl SplitConfig {
    /// # Errors
    /// `InvalidConfig` if `test_fraction` is outside `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(AdvisorErr::InvalidConfig(format!(
                "test_fraction must be in [0, 1), got {}",
                self.test_fraction
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FitConfig::default().validate().is_ok());
        assert!(SplitConfig::default().validate().is_ok());
        assert_eq!(FitConfig::default().max_iters.get(), 100);
    }

    #[test]
    fn rejects_bad_values() {
        let fit = FitConfig {
            penalty: -1.0,
            ..Default::default()
        };
        assert!(fit.validate().is_err());

        let fit = FitConfig {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(fit.validate().is_err());

        let split = SplitConfig {
            test_fraction: 1.0,
            seed: None,
        };
        assert!(split.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let fit: FitConfig = serde_json::from_str(r#"{ "penalty": 0.5 }"#).unwrap();
        assert_eq!(fit.penalty, 0.5);
        assert_eq!(fit.tolerance, FitConfig::default().tolerance);

        let split: SplitConfig = serde_json::from_str(r#"{ "seed": null }"#).unwrap();
        assert_eq!(split.seed, None);
        assert_eq!(split.test_fraction, 0.2);
    }
}
