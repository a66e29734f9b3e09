use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{Observation, StatusCounts};
use crate::{AdvisorErr, Result};

/// Number of features per observation: cable length and baud rate.
pub const NUM_FEATURES: usize = 2;

/// The fitting view of a sequence of observations.
///
/// Row `i` of `x` is `[length_i, baudrate_i]` and `y[i]` is its error label.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl TrainingSet {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let x = Array2::from_shape_fn((observations.len(), NUM_FEATURES), |(i, j)| {
            let obs = &observations[i];
            match j {
                0 => obs.length(),
                _ => obs.baudrate() as f64,
            }
        });
        let y = observations.iter().map(Observation::label).collect();

        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// The `n x 2` feature matrix.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    pub fn counts(&self) -> StatusCounts {
        let err = self.y.iter().filter(|&&y| y == 1.0).count();
        StatusCounts {
            ok: self.len() - err,
            err,
        }
    }

    /// Checks that both label classes are present.
    ///
    /// # Errors
    /// `DegenerateTrainingSet` if either class is missing.
    pub fn ensure_both_classes(&self) -> Result<StatusCounts> {
        let counts = self.counts();
        if counts.ok == 0 || counts.err == 0 {
            return Err(AdvisorErr::DegenerateTrainingSet {
                ok: counts.ok,
                err: counts.err,
            });
        }

        Ok(counts)
    }

    /// Shuffles the rows and splits them into a training and a test part.
    ///
    /// The test part takes `ceil(test_fraction * len)` rows.
    ///
    /// # Arguments
    /// * `test_fraction` - The share of rows held out, in `[0, 1)`.
    /// * `seed` - Seed for the shuffle, `None` uses OS entropy.
    ///
    /// # Returns
    /// A `(train, test)` tuple.
    ///
    /// # Errors
    /// `InvalidInput` if `test_fraction` is out of range.
    pub fn split(&self, test_fraction: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(AdvisorErr::invalid_input(
                "test fraction",
                format!("{test_fraction} is outside [0, 1)"),
            ));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(&mut rng);

        let n_test = (test_fraction * self.len() as f64).ceil() as usize;
        let (test_idx, train_idx) = indices.split_at(n_test);

        Ok((self.select(train_idx), self.select(test_idx)))
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
        }
    }
}
