/// The logistic function `1 / (1 + e^-z)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the sigmoid at `z`.
    ///
    /// Negative inputs go through `e^z / (1 + e^z)` so large magnitudes don't overflow.
    pub fn f(&self, z: f64) -> f64 {
        if z >= 0.0 {
            1. / (1. + (-z).exp())
        } else {
            let e = z.exp();
            e / (1. + e)
        }
    }

    /// Derivative of the sigmoid at `z`.
    pub fn df(&self, z: f64) -> f64 {
        let s = self.f(z);
        s * (1. - s)
    }
}

/// `ln(1 + e^z)`, the log-partition term of the logistic likelihood.
pub fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}
