use ndarray::Array;

use crate::util::{DataVec, Float};

/// Input vector paired with the output the network should produce for it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabeledEntry {
    pub input: DataVec,
    pub expected: DataVec,
}

impl LabeledEntry {
    pub fn new(input: Vec<Float>, expected: Vec<Float>) -> Self {
        Self {
            input: Array::from_vec(input),
            expected: Array::from_vec(expected),
        }
    }
}
