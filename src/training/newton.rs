use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::arch::{Sigmoid, softplus};

/// Diagonal jitter that keeps the Hessian invertible when the unpenalized
/// bias has no curvature left.
const JITTER: f64 = 1e-10;
/// Smallest step fraction tried by the backtracking line search.
const MIN_STEP: f64 = 1e-10;

/// Newton-Raphson minimizer of the L2-penalized logistic negative log-likelihood.
///
/// The last column of the design matrix is the intercept column and its
/// parameter is never penalized.
#[derive(Debug, Clone, Copy)]
pub struct Newton {
    penalty: f64,
    max_iters: usize,
    tolerance: f64,
}

/// The result of a Newton run.
#[derive(Debug, Clone)]
pub struct NewtonOutcome {
    pub params: Array1<f64>,
    pub iterations: usize,
    pub converged: bool,
    pub objective: f64,
}

impl Newton {
    /// Returns a new `Newton`.
    ///
    /// # Arguments
    /// * `penalty` - L2 strength applied to every parameter but the intercept.
    /// * `max_iters` - Iteration cap.
    /// * `tolerance` - Convergence threshold on the largest parameter update.
    pub fn new(penalty: f64, max_iters: usize, tolerance: f64) -> Self {
        Self {
            penalty,
            max_iters,
            tolerance,
        }
    }

    /// Minimizes the objective starting from the zero vector.
    ///
    /// # Arguments
    /// * `design` - The `n x k` design matrix, intercept column last.
    /// * `y` - The `n` binary labels.
    pub fn minimize(&self, design: ArrayView2<f64>, y: ArrayView1<f64>) -> NewtonOutcome {
        let k = design.ncols();
        let sigmoid = Sigmoid::new();

        let mut params = Array1::<f64>::zeros(k);
        let mut objective = self.objective(design, y, params.view());
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.max_iters {
            iterations += 1;

            let z = design.dot(&params);
            let residual = z.mapv(|z| sigmoid.f(z)) - &y;
            let curvature = z.mapv(|z| sigmoid.df(z));

            let mut grad = design.t().dot(&residual);
            let weighted = &design * &curvature.view().insert_axis(Axis(1));
            let mut hessian = design.t().dot(&weighted);

            for j in 0..k {
                if j + 1 < k {
                    grad[j] += self.penalty * params[j];
                    hessian[[j, j]] += self.penalty;
                }
                hessian[[j, j]] += JITTER;
            }

            let Some(direction) = solve(hessian, grad) else {
                warn!("singular Hessian at iteration {iterations}, keeping current parameters");
                break;
            };

            // Backtrack until the objective stops increasing.
            let mut t = 1.0;
            let accepted = loop {
                let candidate = &params - &(&direction * t);
                let candidate_objective = self.objective(design, y, candidate.view());

                if candidate_objective.is_finite() && candidate_objective <= objective {
                    break Some((candidate, candidate_objective));
                }

                t *= 0.5;
                if t < MIN_STEP {
                    break None;
                }
            };

            let Some((candidate, candidate_objective)) = accepted else {
                // No descent left at floating point resolution.
                debug!("line search exhausted at iteration {iterations}");
                converged = true;
                break;
            };

            let step = direction
                .iter()
                .fold(0.0_f64, |acc, d| acc.max((d * t).abs()));

            params = candidate;
            objective = candidate_objective;
            debug!("newton iteration {iterations}: objective {objective:.6e}, step {step:.3e}");

            if step < self.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "logistic fit stopped after {iterations} iterations without converging (objective {objective:.6e})"
            );
        }

        NewtonOutcome {
            params,
            iterations,
            converged,
            objective,
        }
    }

    /// `sum(softplus(z_i) - y_i * z_i) + penalty / 2 * |w|^2` with `z = design . params`.
    fn objective(
        &self,
        design: ArrayView2<f64>,
        y: ArrayView1<f64>,
        params: ArrayView1<f64>,
    ) -> f64 {
        let z = design.dot(&params);
        let nll: f64 = z
            .iter()
            .zip(y)
            .map(|(&z, &y)| softplus(z) - y * z)
            .sum();

        let k = params.len();
        let reg: f64 = params.iter().take(k.saturating_sub(1)).map(|w| w * w).sum();

        nll + 0.5 * self.penalty * reg
    }
}

/// Solves `a . x = b` by Gaussian elimination with partial pivoting.
///
/// # Returns
/// `None` if `a` is singular to working precision.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
        let magnitude = a[[pivot, col]].abs();
        if magnitude.is_nan() || magnitude < f64::MIN_POSITIVE {
            return None;
        }

        if pivot != col {
            for j in 0..n {
                a.swap([col, j], [pivot, j]);
            }
            b.swap(col, pivot);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            for j in col..n {
                a[[row, j]] -= factor * a[[col, j]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|j| a[[row, j]] * x[j]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }

    x.iter().all(|v| v.is_finite()).then_some(x)
}
