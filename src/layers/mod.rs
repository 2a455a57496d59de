mod neuron;
mod layer;
mod layer_weighting;

pub use neuron::*;
pub use layer::*;
pub use layer_weighting::*;
