use std::fmt;

use log::debug;

use ndarray::{Array1, Array2};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use super::layer::Layer;
use crate::err::{check_dim, NetError, NetResult};
use crate::util::array_helpers::{self, outer};
use crate::util::{DataVec, Float, WsMat};

/// Value every weight holds before randomization
pub const INIT_WEIGHT: Float = 1.0;

/// Output of the implicit bias unit
pub const BIAS_OUTPUT: Float = 1.0;

/// Weights from an alpha (source) layer to a beta (destination) layer.
///
/// `ws[[a, b]]` weights alpha neuron `a` into beta neuron `b`, `bias[b]` is
/// the weight of the constant bias unit into beta neuron `b`. The layers
/// themselves are owned by the network and lent to each propagation call.
#[derive(Clone, Debug)]
pub struct LayerWeighting {
    ws: WsMat,
    bias: DataVec,
}

impl LayerWeighting {
    pub fn new(alpha_len: usize, beta_len: usize) -> Self {
        Self {
            ws: Array2::from_elem((alpha_len, beta_len), INIT_WEIGHT),
            bias: Array1::from_elem(beta_len, INIT_WEIGHT),
        }
    }

    pub fn alpha_len(&self) -> usize {
        self.ws.nrows()
    }

    pub fn beta_len(&self) -> usize {
        self.ws.ncols()
    }

    pub fn weights(&self) -> &WsMat {
        &self.ws
    }

    pub fn bias(&self) -> &DataVec {
        &self.bias
    }

    pub fn set_weights(&mut self, ws: WsMat) -> NetResult<()> {
        check_dim("LayerWeighting::set_weights rows", self.alpha_len(), ws.nrows())?;
        check_dim("LayerWeighting::set_weights cols", self.beta_len(), ws.ncols())?;
        self.ws = ws;
        Ok(())
    }

    pub fn set_bias(&mut self, bias: DataVec) -> NetResult<()> {
        check_dim("LayerWeighting::set_bias", self.beta_len(), bias.len())?;
        self.bias = bias;
        Ok(())
    }

    /// Overwrites every weight and bias with an independent uniform sample
    /// from `[min, max)`. `min == max` writes that constant, a range wider
    /// than `Float` can represent is rejected.
    pub fn randomize_all_weights<R>(&mut self, rng: &mut R, min: Float, max: Float) -> NetResult<()>
    where
        R: Rng + ?Sized,
    {
        if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
            return Err(NetError::InvalidRange { min, max });
        }

        if min == max {
            self.ws.fill(min);
            self.bias.fill(min);
            return Ok(());
        }

        self.ws = Array2::random_using(self.ws.raw_dim(), Uniform::new(min, max), rng);
        self.bias = Array1::random_using(self.bias.raw_dim(), Uniform::new(min, max), rng);

        Ok(())
    }

    /// `beta.input = ws^T · alpha.output + bias`
    pub fn forward_propagate(&self, alpha: &Layer, beta: &mut Layer) -> NetResult<()> {
        self.check_layers(alpha, beta)?;

        let alpha_out = alpha.output_vector();
        let weighted = array_helpers::mat_vec(self.ws.t(), alpha_out.view())?;
        let beta_in = weighted + &self.bias * BIAS_OUTPUT;

        beta.set_input_values(&beta_in)?;

        debug!("[ok] LayerWeighting forward_propagate() {}x{}", self.alpha_len(), self.beta_len());

        Ok(())
    }

    /// Pushes the beta error back into the alpha layer, then descends the
    /// weights and bias along it.
    ///
    /// The alpha error is computed from the weights as they were before this
    /// call, and both phases read the same snapshot of `beta.error_in`.
    pub fn backward_propagate(
        &mut self,
        alpha: &mut Layer,
        beta: &Layer,
        learning_rate: Float,
    ) -> NetResult<()> {
        self.check_layers(alpha, beta)?;

        let beta_err_in = beta.error_in_vector();
        let alpha_out = alpha.output_vector();

        self.propagate_alpha_error(alpha, &beta_err_in)?;
        self.update_weights(&alpha_out, &beta_err_in, learning_rate);

        debug!("[ok] LayerWeighting backward_propagate() {}x{}", self.alpha_len(), self.beta_len());

        Ok(())
    }

    // alpha.error_out[a] = Σ_b beta_err_in[b] * ws[a, b]
    fn propagate_alpha_error(&self, alpha: &mut Layer, beta_err_in: &DataVec) -> NetResult<()> {
        let alpha_err_out = array_helpers::mat_vec(self.ws.view(), beta_err_in.view())?;
        alpha.set_error_out_values(&alpha_err_out)
    }

    fn update_weights(&mut self, alpha_out: &DataVec, beta_err_in: &DataVec, learning_rate: Float) {
        let ws_grad = outer(alpha_out.view(), beta_err_in.view());

        self.ws.scaled_add(-learning_rate, &ws_grad);
        self.bias.scaled_add(-learning_rate * BIAS_OUTPUT, beta_err_in);
    }

    fn check_layers(&self, alpha: &Layer, beta: &Layer) -> NetResult<()> {
        check_dim("LayerWeighting alpha", self.alpha_len(), alpha.len())?;
        check_dim("LayerWeighting beta", self.beta_len(), beta.len())
    }
}

impl fmt::Display for LayerWeighting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "weights {}x{} in [{:.5}, {:.5}]",
            self.alpha_len(),
            self.beta_len(),
            array_helpers::min(&self.ws),
            array_helpers::max(&self.ws)
        )?;

        for row in self.ws.rows() {
            let cells: Vec<String> = row.iter().map(|w| format!("{:>9.5}", w)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }

        let cells: Vec<String> = self.bias.iter().map(|w| format!("{:>9.5}", w)).collect();
        write!(f, "bias\n{}", cells.join(" "))
    }
}
