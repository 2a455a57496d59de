use std::fmt;
use std::ops::Index;

use ndarray::{ArrayView1, AsArray};

use super::neuron::Neuron;
use crate::activation::Activation;
use crate::err::{check_dim, NetResult};
use crate::util::{DataVec, Float};

/// Ordered, fixed-length group of neurons sharing one activation function.
///
/// The aggregate vectors are read from and written through the neurons,
/// the layer keeps no separate value store.
#[derive(Clone, Debug)]
pub struct Layer {
    neurons: Vec<Neuron>,
    activation: Activation,
}

impl Layer {
    pub fn new(activation: Activation, length: usize) -> Self {
        Self {
            neurons: vec![Neuron::new(activation); length],
            activation,
        }
    }

    /// Copies every given neuron, each keeping its own activation, input and
    /// error state. The layer activation is taken from the first neuron.
    pub fn from_neurons<'a, I>(neurons: I) -> Self
    where
        I: IntoIterator<Item = &'a Neuron>,
    {
        let neurons: Vec<Neuron> = neurons.into_iter().cloned().collect();
        let activation = neurons
            .first()
            .map(|n| n.activation())
            .unwrap_or(Activation::Identity);

        Self {
            neurons,
            activation,
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron(&self, idx: usize) -> Option<&Neuron> {
        self.neurons.get(idx)
    }

    /// Writes every neuron input positionally.
    /// Fails without touching any neuron when the length differs.
    pub fn set_input_values<'a, V>(&mut self, vals: V) -> NetResult<()>
    where
        V: AsArray<'a, Float>,
    {
        let vals: ArrayView1<Float> = vals.into();
        check_dim("Layer::set_input_values", self.len(), vals.len())?;

        for (neu, val) in self.neurons.iter_mut().zip(vals.iter()) {
            neu.set_input_value(*val);
        }

        Ok(())
    }

    pub fn set_error_out_values<'a, V>(&mut self, vals: V) -> NetResult<()>
    where
        V: AsArray<'a, Float>,
    {
        let vals: ArrayView1<Float> = vals.into();
        check_dim("Layer::set_error_out_values", self.len(), vals.len())?;

        for (neu, val) in self.neurons.iter_mut().zip(vals.iter()) {
            neu.set_error_out(*val);
        }

        Ok(())
    }

    pub fn output_vector(&self) -> DataVec {
        self.collect_vec(Neuron::output_value)
    }

    pub fn input_vector(&self) -> DataVec {
        self.collect_vec(Neuron::input_value)
    }

    pub fn error_out_vector(&self) -> DataVec {
        self.collect_vec(Neuron::error_out)
    }

    pub fn error_in_vector(&self) -> DataVec {
        self.collect_vec(Neuron::error_in)
    }

    fn collect_vec<F: Fn(&Neuron) -> Float>(&self, f: F) -> DataVec {
        self.neurons.iter().map(f).collect()
    }
}

impl Index<usize> for Layer {
    type Output = Neuron;

    fn index(&self, idx: usize) -> &Neuron {
        &self.neurons[idx]
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.activation, self.len())
    }
}
