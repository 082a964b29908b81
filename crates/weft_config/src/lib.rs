//! Parsing and validation of `weft.toml` generation configuration files.
//!
//! This crate reads the generation configuration file and produces a
//! strongly-typed [`GenerationConfig`] covering the target device and the
//! fabric-generation options (configuration-memory organization, compact
//! module hierarchy).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{DeviceSection, FabricSection, GenerationConfig};
