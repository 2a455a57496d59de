use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::Float;

pub fn sigmoid(val: Float) -> Float {
    1.0 / (1.0 + (-val).exp())
}

/// Takes the pre-activation value, not the sigmoid output
pub fn sigmoid_deriv(val: Float) -> Float {
    let s = sigmoid(val);
    s * (1.0 - s)
}

pub fn raw(val: Float) -> Float {
    val
}

pub fn raw_deriv(_val: Float) -> Float {
    1.0
}

/// Per-neuron activation function.
///
/// Both `at` and `derivative_at` are evaluated at the neuron input value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Identity,
    Sigmoid,
}

impl Activation {
    pub fn at(&self, x: Float) -> Float {
        match self {
            Activation::Identity => raw(x),
            Activation::Sigmoid => sigmoid(x),
        }
    }

    pub fn derivative_at(&self, x: Float) -> Float {
        match self {
            Activation::Identity => raw_deriv(x),
            Activation::Sigmoid => sigmoid_deriv(x),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Activation::Identity => "identity",
            Activation::Sigmoid => "sigmoid",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity() {
        for x in [-3.5, 0.0, 1e-9, 42.0] {
            assert_eq!(Activation::Identity.at(x), x);
            assert_eq!(Activation::Identity.derivative_at(x), 1.0);
        }
    }

    #[test]
    fn test_sigmoid_bounds_and_midpoint() {
        assert_eq!(Activation::Sigmoid.at(0.0), 0.5);
        assert_eq!(Activation::Sigmoid.derivative_at(0.0), 0.25);

        for x in [-30.0, -5.0, -0.1, 0.1, 5.0, 30.0] {
            let y = Activation::Sigmoid.at(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({}) = {}", x, y);

            let d = Activation::Sigmoid.derivative_at(x);
            assert_abs_diff_eq!(d, y * (1.0 - y), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_sigmoid_extreme_negative_underflows() {
        // e^1000 overflows to inf, 1 / inf == 0
        assert_eq!(Activation::Sigmoid.at(-1000.0), 0.0);
        assert_eq!(Activation::Sigmoid.derivative_at(-1000.0), 0.0);
    }
}
