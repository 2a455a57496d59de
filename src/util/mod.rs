mod util;
pub mod array_helpers;

pub use util::*;
