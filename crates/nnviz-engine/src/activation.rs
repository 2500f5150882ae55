//! Toy activation functions shown in the theory panel and used by the mock
//! forward pass.

use nnviz_model::Activation;

/// Slope of the negative half of leaky ReLU.
pub const LEAKY_SLOPE: f64 = 0.01;

/// Scalar activation and its derivative.
pub trait ActivationFn {
    fn f(&self, x: f64) -> f64;
    fn df(&self, x: f64) -> f64;

    /// Applies the activation to a whole layer.
    fn apply(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.f(x)).collect()
    }
}

impl ActivationFn for Activation {
    fn f(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Relu => x.max(0.0),
            Self::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    LEAKY_SLOPE * x
                }
            }
            Self::Sigmoid => sigmoid(x),
            Self::Tanh => x.tanh(),
            // Per-element view of softmax over a single logit.
            Self::Softmax => sigmoid(x),
        }
    }

    fn df(&self, x: f64) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::LeakyRelu => {
                if x > 0.0 {
                    1.0
                } else {
                    LEAKY_SLOPE
                }
            }
            Self::Sigmoid | Self::Softmax => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Self::Tanh => 1.0 - x.tanh().powi(2),
        }
    }

    fn apply(&self, xs: &[f64]) -> Vec<f64> {
        match self {
            Self::Softmax => softmax(xs),
            _ => xs.iter().map(|&x| self.f(x)).collect(),
        }
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Numerically stable softmax. Empty input yields an empty vector.
pub fn softmax(xs: &[f64]) -> Vec<f64> {
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = xs.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
