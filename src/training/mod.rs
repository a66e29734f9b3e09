mod config;
mod metrics;
mod newton;
mod trainer;

pub use config::{FitConfig, SplitConfig};
pub use metrics::Evaluation;
pub use newton::{Newton, NewtonOutcome};
pub use trainer::{FitStats, LogisticTrainer, Training};

use crate::{Result, arch::TrainedModel, dataset::TrainingSet};

/// Fits a new model on `set` with the default `FitConfig`.
///
/// # Errors
/// `DegenerateTrainingSet` if `set` lacks either label class.
pub fn fit(set: &TrainingSet) -> Result<TrainedModel> {
    LogisticTrainer::default().fit(set)
}
