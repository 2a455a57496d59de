use thiserror::Error;

use crate::util::Float;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("{op}: dimensions do not match (expected {expected}, got {actual})")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid topology : {0}")]
    InvalidTopology(String),

    #[error("Invalid weight range [{min}, {max})")]
    InvalidRange { min: Float, max: Float },

    #[error("Invalid configuration : {0}")]
    InvalidCfg(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type NetResult<T> = Result<T, NetError>;

impl NetError {
    pub(crate) fn dim(op: &'static str, expected: usize, actual: usize) -> Self {
        NetError::DimensionMismatch {
            op,
            expected,
            actual,
        }
    }
}

/// Fails with `DimensionMismatch` when `actual != expected`
pub(crate) fn check_dim(op: &'static str, expected: usize, actual: usize) -> NetResult<()> {
    if expected != actual {
        return Err(NetError::dim(op, expected, actual));
    }

    Ok(())
}
