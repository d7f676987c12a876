//! Catalog types: home models and configurator options.

mod model;
mod option;

pub use model::{HomeModel, ModelStatus};
pub use option::{ModelOption, OptionCategory};
