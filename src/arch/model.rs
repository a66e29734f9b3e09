use crate::{AdvisorErr, Result};

/// A model of the probability that a transmission fails.
///
/// The recommendation searches only ever query a model through this trait, so
/// any probability surface over `(length, baudrate)` can be searched.
pub trait ErrorModel {
    /// Returns the error probability for already validated inputs.
    fn probability(&self, length: f64, baudrate: u32) -> f64;

    /// Returns the probability in `[0, 1]` that a transmission over `length`
    /// meters at `baudrate` bits per second fails.
    ///
    /// # Errors
    /// `InvalidInput` if `length` is negative or non-finite, or `baudrate` is zero.
    fn predict_probability(&self, length: f64, baudrate: u32) -> Result<f64> {
        validate_query(length, baudrate)?;
        Ok(self.probability(length, baudrate))
    }
}

impl<M: ErrorModel + ?Sized> ErrorModel for &M {
    fn probability(&self, length: f64, baudrate: u32) -> f64 {
        (**self).probability(length, baudrate)
    }
}

fn validate_query(length: f64, baudrate: u32) -> Result<()> {
    if !length.is_finite() {
        return Err(AdvisorErr::invalid_input(
            "length",
            format!("{length} is not finite"),
        ));
    }

    if length < 0.0 {
        return Err(AdvisorErr::invalid_input(
            "length",
            format!("{length} is negative"),
        ));
    }

    if baudrate == 0 {
        return Err(AdvisorErr::invalid_input("baudrate", "must be positive"));
    }

    Ok(())
}
