//! Configuration model for noxcomb
//!
//! Defines the structure for XDG-compliant layered configuration. Every
//! value here is a default that CLI flags override.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Default settings for a combine run
    #[serde(default)]
    pub defaults: Defaults,

    /// Tool selection defaults
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Default settings for a combine run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    /// Noxfile to rewrite and execute
    #[serde(default = "default_nox_file")]
    pub nox_file: String,

    /// File the combined report is written to
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Command used to invoke nox
    #[serde(default = "default_nox_command")]
    pub nox_command: String,

    /// Directory temp report files are placed under
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
}

fn default_nox_file() -> String {
    "noxfile.py".to_string()
}

fn default_output_file() -> String {
    "lint_report".to_string()
}

fn default_nox_command() -> String {
    "nox".to_string()
}

fn default_work_dir() -> String {
    ".nox".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            nox_file: default_nox_file(),
            output_file: default_output_file(),
            nox_command: default_nox_command(),
            work_dir: default_work_dir(),
        }
    }
}

/// Tool selection defaults
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ToolsConfig {
    /// Tool names excluded from the combined report by default.
    /// The CLI's --enabled_output overrides this entirely.
    #[serde(default)]
    pub disabled: Vec<String>,
}
