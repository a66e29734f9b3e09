use log::info;
use ndarray::{Array1, Array2, Axis};
use serde::Serialize;

use super::{Evaluation, FitConfig, SplitConfig, newton::Newton};
use crate::{
    Result,
    arch::TrainedModel,
    dataset::{NUM_FEATURES, TrainingSet},
};

/// Statistics of a single fit.
///
/// Fields stay private so the solver's bookkeeping can change without
/// breaking callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitStats {
    iterations: usize,
    converged: bool,
    objective: f64,
}

impl FitStats {
    /// Returns the number of Newton iterations run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns whether the solver met its tolerance before the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns the penalized negative log-likelihood at the returned parameters.
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// The outcome of fitting on a split training set.
#[derive(Debug, Clone, Copy)]
pub struct Training {
    pub model: TrainedModel,
    pub stats: FitStats,
    /// Evaluation on the held-out part, `None` if nothing was held out.
    pub holdout: Option<Evaluation>,
}

/// Fits `TrainedModel`s by penalized maximum likelihood.
///
/// Features are standardized before the Newton solve and the parameters are
/// mapped back to the raw `(length, baudrate)` scale afterwards, so the
/// returned model is queried with raw values.
#[derive(Debug, Clone, Default)]
pub struct LogisticTrainer {
    config: FitConfig,
}

impl LogisticTrainer {
    /// Creates a new `LogisticTrainer`.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` doesn't validate.
    pub fn new(config: FitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fits a new model on `set`.
    ///
    /// # Errors
    /// `DegenerateTrainingSet` if `set` lacks either label class.
    pub fn fit(&self, set: &TrainingSet) -> Result<TrainedModel> {
        self.fit_with_stats(set).map(|(model, _)| model)
    }

    /// Fits a new model on `set` and reports how the solver went.
    ///
    /// # Errors
    /// `DegenerateTrainingSet` if `set` lacks either label class, `InvalidInput`
    /// if the fitted parameters aren't finite.
    pub fn fit_with_stats(&self, set: &TrainingSet) -> Result<(TrainedModel, FitStats)> {
        let counts = set.ensure_both_classes()?;

        let x = set.features();
        let n = set.len() as f64;
        let mean = x.sum_axis(Axis(0)) / n;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        let design = Array2::from_shape_fn((set.len(), NUM_FEATURES + 1), |(i, j)| {
            if j < NUM_FEATURES {
                (x[[i, j]] - mean[j]) / scale[j]
            } else {
                1.0
            }
        });

        let FitConfig {
            penalty,
            max_iters,
            tolerance,
        } = self.config;

        let outcome =
            Newton::new(penalty, max_iters.get(), tolerance).minimize(design.view(), set.labels());

        let model = to_raw_scale(&outcome.params, &mean, &scale)?;
        let stats = FitStats {
            iterations: outcome.iterations,
            converged: outcome.converged,
            objective: outcome.objective,
        };

        info!(
            ok = counts.ok, err = counts.err, iterations = stats.iterations, converged = stats.converged;
            "fitted error model: weights {:?}, bias {}",
            model.weights(),
            model.bias()
        );

        Ok((model, stats))
    }

    /// Splits `set`, fits on the training part and evaluates on the held-out part.
    ///
    /// # Errors
    /// `InvalidInput` for an out of range split, `DegenerateTrainingSet` if the
    /// training part lacks either label class.
    pub fn fit_split(&self, set: &TrainingSet, split: &SplitConfig) -> Result<Training> {
        let (train, test) = set.split(split.test_fraction, split.seed)?;
        info!(
            "training on {} observations, holding out {}",
            train.len(),
            test.len()
        );

        let (model, stats) = self.fit_with_stats(&train)?;
        let holdout = Evaluation::of(&model, &test);

        if let Some(eval) = holdout {
            info!(
                "hold-out accuracy {:.4}, log loss {:.4} over {} observations",
                eval.accuracy, eval.log_loss, eval.samples
            );
        }

        Ok(Training {
            model,
            stats,
            holdout,
        })
    }
}

/// Maps parameters fitted on standardized features back to the raw scale.
///
/// With `x_std = (x - mean) / scale`: `w_raw = w / scale` and
/// `b_raw = b - sum(w * mean / scale)`.
fn to_raw_scale(
    params: &Array1<f64>,
    mean: &Array1<f64>,
    scale: &Array1<f64>,
) -> Result<TrainedModel> {
    let mut weights = [0.0; NUM_FEATURES];
    let mut bias = params[NUM_FEATURES];

    for j in 0..NUM_FEATURES {
        weights[j] = params[j] / scale[j];
        bias -= weights[j] * mean[j];
    }

    TrainedModel::from_params(weights, bias)
}
