//! Configuration module for romseek
//!
//! Handles loading settings from YAML files and environment variables, and
//! defines the static collection table.

mod settings;

pub use settings::*;
