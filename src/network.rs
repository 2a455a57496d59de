use std::fmt;

use log::{debug, info, warn};

use ndarray::{ArrayView1, AsArray};
use ndarray_rand::rand::Rng;
use serde::{Deserialize, Serialize};

use crate::err::{check_dim, NetError, NetResult};
use crate::error_function::{ErrorFunction, SquaredError};
use crate::layers::{Layer, LayerWeighting};
use crate::layers_storage::LayersStorage;
use crate::util::{DataVec, Float};

/// Range the initial weights are sampled from, `[min, max)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: Float,
    pub max: Float,
}

impl WeightRange {
    pub fn new(min: Float, max: Float) -> NetResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> NetResult<()> {
        if !self.min.is_finite()
            || !self.max.is_finite()
            || self.min > self.max
            || !(self.max - self.min).is_finite()
        {
            return Err(NetError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }

        Ok(())
    }
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            min: -0.1,
            max: 0.1,
        }
    }
}

/// Where the network is within one training step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetState {
    Idle,
    InputSet,
    Fired,
    Learned,
}

/// Feed-forward neural network.
///
/// `weightings[i]` connects `layers[i]` to `layers[i + 1]`. The topology is
/// fixed at construction, training only mutates neuron state and weights.
#[derive(Clone)]
pub struct Network<E = SquaredError>
where
    E: ErrorFunction,
{
    ls: LayersStorage,
    weightings: Vec<LayerWeighting>,
    err_fn: E,
    state: NetState,
}

impl Network<SquaredError> {
    /// Setup the network with [0] - input size, [...] - hidden neurons, [N] - output size.
    /// Weights are drawn from the default range `[-0.1, 0.1)`.
    pub fn new<R>(rng: &mut R, sizes: &[usize]) -> NetResult<Self>
    where
        R: Rng + ?Sized,
    {
        Self::with_weight_range(rng, sizes, WeightRange::default())
    }

    pub fn with_weight_range<R>(rng: &mut R, sizes: &[usize], range: WeightRange) -> NetResult<Self>
    where
        R: Rng + ?Sized,
    {
        Network::with_error_function(rng, sizes, range, SquaredError)
    }
}

impl<E> Network<E>
where
    E: ErrorFunction,
{
    pub fn with_error_function<R>(
        rng: &mut R,
        sizes: &[usize],
        range: WeightRange,
        err_fn: E,
    ) -> NetResult<Self>
    where
        R: Rng + ?Sized,
    {
        range.validate()?;

        let ls = LayersStorage::new_simple_network(sizes)?;

        let mut weightings = Vec::with_capacity(ls.len() - 1);

        for idx in 0..ls.len() - 1 {
            let mut lw = LayerWeighting::new(ls.at(idx).len(), ls.at(idx + 1).len());
            lw.randomize_all_weights(rng, range.min, range.max)?;
            weightings.push(lw);
        }

        info!(
            "Created network {} , weights in [{}, {}) , error function {}",
            ls,
            range.min,
            range.max,
            err_fn.name()
        );

        Ok(Self {
            ls,
            weightings,
            err_fn,
            state: NetState::Idle,
        })
    }

    /// Number of layers including input and output
    pub fn depth(&self) -> usize {
        self.ls.len()
    }

    pub fn layers(&self) -> &LayersStorage {
        &self.ls
    }

    pub fn layer(&self, id: usize) -> Option<&Layer> {
        self.ls.get(id)
    }

    pub fn weightings(&self) -> &[LayerWeighting] {
        &self.weightings
    }

    pub fn weighting(&self, id: usize) -> Option<&LayerWeighting> {
        self.weightings.get(id)
    }

    pub fn weighting_mut(&mut self, id: usize) -> Option<&mut LayerWeighting> {
        self.weightings.get_mut(id)
    }

    pub fn error_function(&self) -> &E {
        &self.err_fn
    }

    pub fn state(&self) -> NetState {
        self.state
    }

    pub fn set_input<'a, V>(&mut self, vals: V) -> NetResult<()>
    where
        V: AsArray<'a, Float>,
    {
        self.ls.first_mut().set_input_values(vals)?;
        self.state = NetState::InputSet;
        Ok(())
    }

    /// Forward pass, strictly from the input side to the output side
    pub fn fire(&mut self) -> NetResult<()> {
        for (idx, lw) in self.weightings.iter().enumerate() {
            let (alpha, beta) = self.ls.pair_mut(idx);
            lw.forward_propagate(alpha, beta)?;
        }

        self.state = NetState::Fired;

        debug!("[ok] Network fire()");

        Ok(())
    }

    /// Backward pass: seeds the output error from `expected`, then walks the
    /// weightings from the output side back to the input side.
    pub fn learn<'a, V>(&mut self, learning_rate: Float, expected: V) -> NetResult<()>
    where
        V: AsArray<'a, Float>,
    {
        let expected: ArrayView1<Float> = expected.into();
        let out_layer = self.ls.last();

        check_dim("Network::learn expected", out_layer.len(), expected.len())?;

        if self.state != NetState::Fired {
            warn!("learn() called in state {:?}, output may be stale", self.state);
        }

        let out_err = self
            .err_fn
            .derivative_error_vec(out_layer.output_vector().view(), expected)?;
        self.ls.last_mut().set_error_out_values(&out_err)?;

        for idx in (0..self.weightings.len()).rev() {
            let (alpha, beta) = self.ls.pair_mut(idx);
            self.weightings[idx].backward_propagate(alpha, beta, learning_rate)?;
        }

        self.state = NetState::Learned;

        debug!("[ok] Network learn()");

        Ok(())
    }

    /// One full iteration `set_input; fire; learn`.
    /// Returns the total error of the output produced by this step's forward pass.
    pub fn train_step<'a, 'b, V, W>(
        &mut self,
        input: V,
        expected: W,
        learning_rate: Float,
    ) -> NetResult<Float>
    where
        V: AsArray<'a, Float>,
        W: AsArray<'b, Float>,
    {
        let expected: ArrayView1<Float> = expected.into();

        self.set_input(input)?;
        self.fire()?;
        let err = self.total_error(expected)?;
        self.learn(learning_rate, expected)?;

        Ok(err)
    }

    /// Output of the input layer, equal to its input
    pub fn input_layer_values(&self) -> DataVec {
        self.ls.first().output_vector()
    }

    pub fn output_layer_values(&self) -> DataVec {
        self.ls.last().output_vector()
    }

    pub fn element_errors<'a, V>(&self, expected: V) -> NetResult<DataVec>
    where
        V: AsArray<'a, Float>,
    {
        self.err_fn
            .error_vec(self.output_layer_values().view(), expected.into())
    }

    pub fn total_error<'a, V>(&self, expected: V) -> NetResult<Float>
    where
        V: AsArray<'a, Float>,
    {
        self.err_fn
            .total_error(self.output_layer_values().view(), expected.into())
    }
}

impl<E> fmt::Display for Network<E>
where
    E: ErrorFunction,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Network {}", self.ls)?;

        for (idx, lw) in self.weightings.iter().enumerate() {
            write!(f, "\n[{} -> {}] {}", idx, idx + 1, lw)?;
        }

        Ok(())
    }
}
