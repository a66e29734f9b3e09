use serde::Serialize;

use crate::{
    arch::{ErrorModel, TrainedModel, softplus},
    dataset::TrainingSet,
};

/// Quality of a model on a set of labeled observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub samples: usize,
    /// Share of observations whose label matches the model's decision at `p = 0.5`.
    pub accuracy: f64,
    /// Mean negative log-likelihood of the labels.
    pub log_loss: f64,
}

impl Evaluation {
    /// Evaluates `model` on `set`.
    ///
    /// # Returns
    /// `None` if `set` is empty.
    pub fn of(model: &TrainedModel, set: &TrainingSet) -> Option<Self> {
        if set.is_empty() {
            return None;
        }

        let (hits, loss) = set
            .features()
            .rows()
            .into_iter()
            .zip(set.labels())
            .fold((0usize, 0.0), |(hits, loss), (row, &y)| {
                let (length, baudrate) = (row[0], row[1] as u32);
                let p = model.probability(length, baudrate);
                let z = model.logit(length, baudrate);

                let predicted = if p >= 0.5 { 1.0 } else { 0.0 };
                let hit = usize::from(predicted == y);

                (hits + hit, loss + softplus(z) - y * z)
            });

        let n = set.len() as f64;
        Some(Self {
            samples: set.len(),
            accuracy: hits as f64 / n,
            log_loss: loss / n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Observation, Status};

    fn set() -> TrainingSet {
        let observations = [
            Observation::new(1.0, 9600, Status::Ok).unwrap(),
            Observation::new(2.0, 9600, Status::Ok).unwrap(),
            Observation::new(20.0, 9600, Status::Err).unwrap(),
            Observation::new(3.0, 9600, Status::Err).unwrap(),
        ];
        TrainingSet::from_observations(&observations)
    }

    #[test]
    fn counts_decisions_at_one_half() {
        // p crosses 0.5 at 10 m regardless of baud rate.
        let model = TrainedModel::from_params([1.0, 0.0], -10.0).unwrap();
        let eval = Evaluation::of(&model, &set()).unwrap();

        assert_eq!(eval.samples, 4);
        assert_eq!(eval.accuracy, 0.75);
    }

    #[test]
    fn an_uninformative_model_has_log_two_loss() {
        let model = TrainedModel::from_params([0.0, 0.0], 0.0).unwrap();
        let eval = Evaluation::of(&model, &set()).unwrap();
        assert!((eval.log_loss - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn empty_sets_have_no_evaluation() {
        let model = TrainedModel::from_params([0.0, 0.0], 0.0).unwrap();
        assert!(Evaluation::of(&model, &TrainingSet::from_observations(&[])).is_none());
    }
}
