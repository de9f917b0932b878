//! Combined report assembly
//!
//! Concatenates inline-captured output and redirected report files into the
//! final report, each section introduced by a `#` banner naming the tool.
//! Pure concatenation: findings are never merged, sorted, or deduplicated.

use std::path::Path;

use crate::error::CombineResult;
use crate::noxfile::TempFileMap;
use crate::runner::InlineOutput;
use crate::tools::{strip_ansi, Tool};

/// Width of the `#` banner introducing each section
const BANNER_WIDTH: usize = 30;

/// Section header: 30 `#` characters, a space, the tool name, two newlines
fn banner(name: &str) -> String {
    format!("{} {}\n\n", "#".repeat(BANNER_WIDTH), name)
}

/// Assemble the report bytes
///
/// Inline sections come first in fixed order (pytest, mypy), ANSI-stripped,
/// each followed by two newlines. File sections follow in the order their
/// declarations were registered during rewriting; a temp file that cannot be
/// read is logged and skipped. Empty inline buffers contribute nothing, not
/// even a banner.
pub fn combine(inline: &InlineOutput, temp_files: &TempFileMap) -> Vec<u8> {
    let mut contents: Vec<u8> = Vec::new();

    for (tool, output) in [(Tool::Pytest, &inline.pytest), (Tool::Mypy, &inline.mypy)] {
        if output.is_empty() {
            continue;
        }
        // get rid of color
        let stripped = strip_ansi(output);
        contents.extend_from_slice(banner(tool.name()).as_bytes());
        contents.extend_from_slice(stripped.as_bytes());
        contents.extend_from_slice(b"\n\n");
    }

    for records in temp_files.values() {
        for record in records {
            match std::fs::read(&record.path) {
                Ok(bytes) => {
                    contents.extend_from_slice(banner(record.tool.name()).as_bytes());
                    contents.extend_from_slice(&bytes);
                }
                Err(e) => {
                    tracing::debug!(
                        "Could not write contents from file {}: {}",
                        record.path.display(),
                        e
                    );
                }
            }
        }
    }

    contents
}

/// Write the combined report, truncating any existing file
///
/// # Errors
/// * `CombineError::Io` - if the output file cannot be written
pub fn write_report(path: &Path, contents: &[u8]) -> CombineResult<()> {
    std::fs::write(path, contents)?;
    tracing::info!("Wrote contents to {}", path.display());
    Ok(())
}
