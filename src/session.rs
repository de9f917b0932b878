//! Per-run orchestration
//!
//! A session owns the resolved run configuration and every temp file the
//! rewrite step produced, and guarantees those files are removed however
//! the run ends. One session is one run; nothing is shared across runs.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{CombineError, CombineResult};
use crate::noxfile::{self, TempFileMap};
use crate::report;
use crate::runner;
use crate::tools::Tool;

/// Name of the rewritten noxfile placed in the current working directory
const TEMP_NOXFILE: &str = ".temp_nox.py";

/// Resolved settings for one combine run
///
/// Immutable after construction: CLI flags override layered config values,
/// which override built-in defaults.
#[derive(Debug, Clone)]
pub struct RunConfiguration {
    /// Noxfile to rewrite and execute
    pub nox_file: PathBuf,
    /// File the combined report is written to
    pub output_file: PathBuf,
    /// Command used to invoke nox
    pub nox_command: String,
    /// Directory temp report files are placed under
    pub work_dir: PathBuf,
    /// Tools excluded from capture and the report
    pub disabled: HashSet<Tool>,
    /// Arguments forwarded to nox verbatim
    pub passthrough: Vec<String>,
}

impl RunConfiguration {
    /// Merge CLI flags over layered config values
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let defaults = &config.defaults;
        Self {
            nox_file: PathBuf::from(
                cli.nox_file
                    .clone()
                    .unwrap_or_else(|| defaults.nox_file.clone()),
            ),
            output_file: PathBuf::from(
                cli.output_file
                    .clone()
                    .unwrap_or_else(|| defaults.output_file.clone()),
            ),
            nox_command: defaults.nox_command.clone(),
            work_dir: PathBuf::from(defaults.work_dir.clone()),
            disabled: cli.disabled_tools(&config.tools.disabled),
            passthrough: cli.args.clone(),
        }
    }
}

/// One combine run: rewrite, execute, combine, clean up
pub struct Session {
    config: RunConfiguration,
    temp_noxfile: PathBuf,
    temp_files: TempFileMap,
}

impl Session {
    /// Create a session for a resolved run configuration
    pub fn new(config: RunConfiguration) -> Self {
        Self {
            config,
            temp_noxfile: PathBuf::from(TEMP_NOXFILE),
            temp_files: TempFileMap::new(),
        }
    }

    /// Place the rewritten noxfile somewhere other than the current directory
    pub fn with_temp_noxfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_noxfile = path.into();
        self
    }

    /// Execute nox with redirected file output and compile all tool output
    /// into the report file
    ///
    /// Cleanup runs whether or not the run succeeds. A non-zero nox exit is
    /// not an error; a missing or incomplete report is its only symptom.
    ///
    /// # Errors
    /// * `CombineError::NoxfileNotFound` - if the nox file does not exist
    /// * `CombineError::SpawnFailed` - if nox could not be started
    /// * `CombineError::Io` - if the rewritten noxfile or report cannot be written
    pub async fn run(&mut self) -> CombineResult<()> {
        if !self.config.nox_file.exists() {
            return Err(CombineError::NoxfileNotFound {
                path: self.config.nox_file.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(&self.config.nox_file)?;

        let result = self.run_inner(&contents).await;
        self.cleanup();
        result
    }

    async fn run_inner(&mut self, contents: &str) -> CombineResult<()> {
        let rewritten = noxfile::rewrite(contents, &self.config.disabled, &self.config.work_dir)?;
        self.temp_files = rewritten.temp_files;

        std::fs::write(&self.temp_noxfile, &rewritten.contents)?;
        tracing::debug!("Generated temp nox file at {}", self.temp_noxfile.display());

        let inline = runner::run_nox(
            &self.config.nox_command,
            &self.temp_noxfile,
            &self.config.passthrough,
            &self.config.disabled,
        )
        .await?;

        let report_bytes = report::combine(&inline, &self.temp_files);
        report::write_report(&self.config.output_file, &report_bytes)
    }

    /// Remove the rewritten noxfile and every temp file, best-effort
    fn cleanup(&self) {
        if let Err(e) = std::fs::remove_file(&self.temp_noxfile) {
            tracing::debug!(
                "Could not remove {}: {}",
                self.temp_noxfile.display(),
                e
            );
        }
        for records in self.temp_files.values() {
            for record in records {
                if let Err(e) = std::fs::remove_file(&record.path) {
                    tracing::debug!("Could not remove {}: {}", record.path.display(), e);
                }
            }
        }
    }
}
