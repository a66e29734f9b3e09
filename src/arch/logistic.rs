use super::{ErrorModel, Sigmoid};
use crate::{AdvisorErr, Result};

/// A fitted linear logistic model over `(length, baudrate)`:
/// `P(error) = sigmoid(w1 * length + w2 * baudrate + b)`.
///
/// Parameters are fixed once the model exists; refitting produces a new model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainedModel {
    weights: [f64; 2],
    bias: f64,
}

impl TrainedModel {
    /// Creates a model from known raw-scale parameters.
    ///
    /// # Arguments
    /// * `weights` - The length and baud rate coefficients, in that order.
    /// * `bias` - The intercept.
    ///
    /// # Errors
    /// `InvalidInput` if any parameter is NaN or infinite.
    pub fn from_params(weights: [f64; 2], bias: f64) -> Result<Self> {
        if let Some(w) = weights.iter().find(|w| !w.is_finite()) {
            return Err(AdvisorErr::invalid_input(
                "weights",
                format!("{w} is not finite"),
            ));
        }

        if !bias.is_finite() {
            return Err(AdvisorErr::invalid_input(
                "bias",
                format!("{bias} is not finite"),
            ));
        }

        Ok(Self { weights, bias })
    }

    pub fn weights(&self) -> [f64; 2] {
        self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// The linear score `w1 * length + w2 * baudrate + b` before the sigmoid.
    pub fn logit(&self, length: f64, baudrate: u32) -> f64 {
        let [w_len, w_baud] = self.weights;
        w_len * length + w_baud * baudrate as f64 + self.bias
    }
}

impl ErrorModel for TrainedModel {
    fn probability(&self, length: f64, baudrate: u32) -> f64 {
        Sigmoid::new().f(self.logit(length, baudrate))
    }
}
