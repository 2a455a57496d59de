pub mod databatch;
pub mod dataloader;

pub mod simple;

pub use databatch::*;
pub use dataloader::*;
pub use simple::*;
