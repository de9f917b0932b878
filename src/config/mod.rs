//! Configuration module for noxcomb
//!
//! Provides XDG-compliant layered configuration loading for run defaults
//! and tool selection.

pub mod loader;
pub mod model;

pub use loader::{config_paths, find_config_files, load_config};
pub use model::*;
