use crate::activation::Activation;
use crate::util::Float;

/// Single unit of a layer.
///
/// `output_value` and `error_in` are derived state: they are recomputed
/// inside `set_input_value` and `set_error_out` and cannot be written
/// directly. Both always match the current input, error and activation.
#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    activation: Activation,
    input_value: Float,
    output_value: Float,
    error_out: Float,
    error_in: Float,
}

impl Neuron {
    pub fn new(activation: Activation) -> Self {
        Self::with_input(activation, 0.0)
    }

    pub fn with_input(activation: Activation, input_value: Float) -> Self {
        let mut neu = Self {
            activation,
            input_value: 0.0,
            output_value: 0.0,
            error_out: 0.0,
            error_in: 0.0,
        };
        neu.set_input_value(input_value);
        neu
    }

    pub fn set_input_value(&mut self, val: Float) {
        self.input_value = val;
        self.output_value = self.activation.at(val);
        self.error_in = self.error_out * self.activation.derivative_at(val);
    }

    /// Sets ∂E/∂output, ∂E/∂input follows through the activation derivative
    pub fn set_error_out(&mut self, val: Float) {
        self.error_out = val;
        self.error_in = val * self.activation.derivative_at(self.input_value);
    }

    pub fn input_value(&self) -> Float {
        self.input_value
    }

    pub fn output_value(&self) -> Float {
        self.output_value
    }

    pub fn error_out(&self) -> Float {
        self.error_out
    }

    pub fn error_in(&self) -> Float {
        self.error_in
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }
}
