use std::fs::File;
use std::io::Write;

use log::info;

use serde::{Deserialize, Serialize};

use crate::err::{NetError, NetResult};
use crate::network::WeightRange;
use crate::util::Float;

/// Everything needed for one training run, loadable from yaml
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainCfg {
    pub layers: Vec<usize>,
    pub trials: usize,
    pub learning_rate: Float,
    pub weight_range: WeightRange,
    pub seed: u64,
    pub input: Vec<Float>,
    pub expected: Vec<Float>,
}

impl Default for TrainCfg {
    fn default() -> Self {
        Self {
            layers: vec![9, 4, 9],
            trials: 100,
            learning_rate: 0.4,
            weight_range: WeightRange::default(),
            seed: 1,
            input: (1..=9).map(|v| v as Float).collect(),
            expected: vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
        }
    }
}

impl TrainCfg {
    pub fn from_file(filepath: &str) -> NetResult<Self> {
        let cfg_file = File::open(filepath)?;
        let cfg: TrainCfg = serde_yaml::from_reader(cfg_file)?;
        cfg.validate()?;

        info!("Loaded train configuration from {}", filepath);

        Ok(cfg)
    }

    pub fn to_file(&self, filepath: &str) -> NetResult<()> {
        let yaml_str = serde_yaml::to_string(self)?;

        let mut output = File::create(filepath)?;
        output.write_all(yaml_str.as_bytes())?;

        Ok(())
    }

    pub fn validate(&self) -> NetResult<()> {
        if self.layers.len() < 2 || self.layers.contains(&0) {
            return Err(NetError::InvalidTopology(format!(
                "layers must hold at least 2 positive sizes, got {:?}",
                self.layers
            )));
        }

        if self.trials == 0 {
            return Err(NetError::InvalidCfg("trials must be positive".to_owned()));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetError::InvalidCfg(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }

        self.weight_range.validate()?;

        if self.input.len() != self.layers[0] {
            return Err(NetError::InvalidCfg(format!(
                "input has {} values, input layer has {} neurons",
                self.input.len(),
                self.layers[0]
            )));
        }

        let out_size = self.layers[self.layers.len() - 1];
        if self.expected.len() != out_size {
            return Err(NetError::InvalidCfg(format!(
                "expected has {} values, output layer has {} neurons",
                self.expected.len(),
                out_size
            )));
        }

        Ok(())
    }
}
