//! noxcomb - Combined lint report wrapper for nox
//!
//! Runs nox with rewritten linter output destinations and concatenates all
//! tool output into a single report:
//! - **pytest / mypy** - captured straight from nox's output stream
//! - **pylint / flake8** - redirected to temp files and read back afterwards
//!
//! ## Features
//!
//! - Regex-based rewrite of noxfile output declarations
//! - Line-by-line subprocess capture with a per-tool recorder
//! - Tool selection via `--disabled_output` / `--enabled_output`
//! - XDG-compliant layered configuration for run defaults

pub mod cli;
pub mod config;
pub mod error;
pub mod noxfile;
pub mod report;
pub mod runner;
pub mod session;
pub mod tools;

pub use cli::Cli;
pub use config::{load_config, Config};
pub use error::{suggest_fix, CombineError, CombineResult};
pub use noxfile::{find_output_path, rewrite, RewrittenNoxfile, TempFileMap, TempFileRecord};
pub use report::{combine, write_report};
pub use runner::{run_nox, InlineCapture, InlineOutput};
pub use session::{RunConfiguration, Session};
pub use tools::{strip_ansi, Tool};
