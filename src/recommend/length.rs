use std::num::NonZeroUsize;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{AdvisorErr, Result, arch::ErrorModel};

const DEFAULT_MAX_STEPS: NonZeroUsize = NonZeroUsize::new(60).unwrap();

/// The grid walked by [`recommend_max_length`]: `step, 2 * step, ..., max_steps * step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthSearch {
    /// Highest tolerated error probability, in `(0, 1)`.
    pub threshold: f64,
    /// Distance between tested lengths, in meters.
    pub step: f64,
    pub max_steps: NonZeroUsize,
}

impl Default for LengthSearch {
    fn default() -> Self {
        Self {
            threshold: 0.01,
            step: 0.5,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl LengthSearch {
    /// # Errors
    /// `InvalidInput` if `threshold` is outside `(0, 1)`, `step` isn't a
    /// positive finite number, or the last grid point overflows.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(AdvisorErr::invalid_input(
                "threshold",
                format!("{} is outside (0, 1)", self.threshold),
            ));
        }

        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(AdvisorErr::invalid_input(
                "step",
                format!("{} is not a positive length", self.step),
            ));
        }

        let last = self.length_at(self.max_steps.get());
        if !last.is_finite() {
            return Err(AdvisorErr::invalid_input(
                "step",
                format!(
                    "{} steps of {} m overflow the grid",
                    self.max_steps, self.step
                ),
            ));
        }

        Ok(())
    }

    /// The `i`-th tested length, 1-based.
    fn length_at(&self, i: usize) -> f64 {
        i as f64 * self.step
    }
}

/// Finds the longest cable that stays below the error threshold at `baudrate`.
///
/// Lengths are tested in ascending order and the walk stops at the first one
/// whose probability reaches the threshold. This assumes the error probability
/// doesn't decrease with length at a fixed baud rate; a model that dips back
/// below the threshold further out is not searched past the first breach.
///
/// # Returns
/// The last tested length below the threshold, or `0.0` if even the first one
/// breaches it.
///
/// # Errors
/// `InvalidInput` for a zero `baudrate` or an invalid `search`.
pub fn recommend_max_length<M>(model: &M, baudrate: u32, search: &LengthSearch) -> Result<f64>
where
    M: ErrorModel + ?Sized,
{
    if baudrate == 0 {
        return Err(AdvisorErr::invalid_input("baudrate", "must be positive"));
    }
    search.validate()?;

    let mut best = 0.0;
    for i in 1..=search.max_steps.get() {
        let length = search.length_at(i);
        let p = model.predict_probability(length, baudrate)?;
        debug!("length {length} m at {baudrate} bps: error probability {p:.6}");

        if p >= search.threshold {
            break;
        }
        best = length;
    }

    Ok(best)
}
