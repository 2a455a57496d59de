/// Folder
pub mod layers;
pub mod util;
pub mod dataloader;

/// Files
pub mod activation;
pub mod error_function;
pub mod layers_storage;
pub mod network;
pub mod orchestra;
pub mod train_cfg;
pub mod err;

pub mod prelude {
    pub use crate::activation::Activation;
    pub use crate::dataloader::{DataLoader, LabeledEntry, SimpleDataLoader};
    pub use crate::err::{NetError, NetResult};
    pub use crate::error_function::{ErrorFunction, SquaredError};
    pub use crate::layers::{Layer, LayerWeighting, Neuron};
    pub use crate::network::{NetState, Network, WeightRange};
    pub use crate::orchestra::{CallbackReturnAction, Orchestra};
    pub use crate::train_cfg::TrainCfg;
    pub use crate::util::{DataVec, Float, WsMat};
}
