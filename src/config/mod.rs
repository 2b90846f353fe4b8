//! Configuration module
//!
//! This module contains the resolved run options and the optional YAML
//! defaults file.

mod loader;
mod model;

pub use loader::{
    Defaults, default_config_path, expand_path, load_defaults, parse_defaults, resolve_defaults,
};
pub use model::{
    ExclusionSet, Options, OptionsBuilder, TransferMode, TypeFilter, normalize_extension,
};
