//! nox subprocess execution
//!
//! Spawns nox against the rewritten noxfile with color forced, pumps its
//! stdout and stderr line-by-line through a single channel, and feeds every
//! line to the inline recorders while echoing it to the console.
//!
//! No timeout is applied: a hung nox run hangs the whole combine. A non-zero
//! exit is logged, not surfaced; the report is written from whatever output
//! was produced.

pub mod capture;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::error::{suggest_fix, CombineError, CombineResult};
use crate::tools::Tool;

pub use capture::InlineCapture;

/// Captured inline tool output, one buffer per inline tool
#[derive(Debug, Default)]
pub struct InlineOutput {
    /// Lines captured for the pytest session
    pub pytest: String,
    /// Lines captured for the mypy session
    pub mypy: String,
}

/// Run nox against the rewritten noxfile and capture inline tool output
///
/// Disabled inline tools are never fed into their recorder: their output is
/// echoed but not captured.
///
/// # Errors
/// * `CombineError::SpawnFailed` - if the nox process could not be started
pub async fn run_nox(
    nox_command: &str,
    temp_noxfile: &Path,
    passthrough: &[String],
    disabled: &HashSet<Tool>,
) -> CombineResult<InlineOutput> {
    // Resolve via PATH; fall back to the raw name and let spawn report it
    let program = which::which(nox_command).unwrap_or_else(|_| PathBuf::from(nox_command));

    let command_str = format!(
        "{} -f {} --forcecolor {}",
        nox_command,
        temp_noxfile.display(),
        passthrough.join(" ")
    );
    tracing::debug!("Executing cmd {}", command_str.trim_end());

    let mut cmd = Command::new(&program);
    cmd.arg("-f").arg(temp_noxfile).arg("--forcecolor");
    cmd.args(passthrough);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| CombineError::SpawnFailed {
        command: command_str.trim_end().to_string(),
        error: e.to_string(),
        suggestion: suggest_fix(nox_command, &e.to_string()),
    })?;

    // Merge both pipes into one ordered stream of lines
    let (line_tx, mut line_rx) = mpsc::channel::<String>(1024);
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_task = tokio::spawn(pump_lines(stdout, line_tx.clone()));
    let err_task = tokio::spawn(pump_lines(stderr, line_tx));

    let mut pytest = InlineCapture::new(Tool::Pytest);
    let mut mypy = InlineCapture::new(Tool::Mypy);
    let capture_pytest = !disabled.contains(&Tool::Pytest);
    let capture_mypy = !disabled.contains(&Tool::Mypy);

    while let Some(line) = line_rx.recv().await {
        if capture_pytest {
            pytest.feed(&line);
        }
        if capture_mypy {
            mypy.feed(&line);
        }
        println!("{}", line.trim_end_matches(['\n', '\r']));
    }

    let _ = out_task.await;
    let _ = err_task.await;

    match child.wait().await {
        Ok(status) if status.success() => tracing::debug!("nox exited successfully"),
        Ok(status) => tracing::warn!("nox exited with status {}", status),
        Err(e) => tracing::warn!("Failed to wait for nox: {}", e),
    }

    Ok(InlineOutput {
        pytest: pytest.into_output(),
        mypy: mypy.into_output(),
    })
}

/// Forward lines from a child pipe into the shared channel
///
/// Read errors end the pump: partial output is still combined.
async fn pump_lines<R>(reader: Option<R>, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(reader) = reader else {
        return;
    };
    let mut buf_reader = BufReader::new(reader);
    let mut line = String::with_capacity(4096);
    loop {
        line.clear();
        match buf_reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(line.clone()).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Error reading output: {}", e);
                break;
            }
        }
    }
}
