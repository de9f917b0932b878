//! Noxfile rewriting
//!
//! Locates each file-based tool's declared output path in the noxfile text
//! and redirects it into a randomly suffixed temp file under the work
//! directory, so the combined report can pick the contents up after the run.
//!
//! The rewrite is a literal textual replacement: every occurrence of the
//! declared path is swapped for the temp path, with forward slashes
//! normalized so the result stays valid on Windows.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::CombineResult;
use crate::tools::Tool;

/// Length of the random suffix appended to temp file names
const SUFFIX_LEN: usize = 10;

/// A tool's redirected output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempFileRecord {
    /// Tool whose output was redirected
    pub tool: Tool,
    /// Temp file the tool will write to instead
    pub path: PathBuf,
}

/// Map from original declared filename to its redirected temp files.
///
/// Keyed in first-seen order. A declared filename may not be unique across
/// the noxfile, hence the `Vec`.
pub type TempFileMap = IndexMap<String, Vec<TempFileRecord>>;

/// Noxfile contents with output declarations redirected into the work dir
#[derive(Debug)]
pub struct RewrittenNoxfile {
    /// Modified noxfile text, ready to be written and executed
    pub contents: String,
    /// Records for every redirected output file
    pub temp_files: TempFileMap,
}

/// Find the declared output path for a file-based tool
///
/// Returns `None` when the tool has no output declaration, the declaration
/// is absent, or the text is degenerate (near-empty). No side effects.
pub fn find_output_path(contents: &str, tool: Tool) -> Option<String> {
    let pattern = tool.output_pattern()?;
    if contents.len() < 2 {
        return None;
    }
    pattern.captures(contents).map(|caps| caps[1].to_string())
}

/// Rewrite output declarations for every enabled file-based tool
///
/// Tools not mentioned in the noxfile or explicitly disabled are skipped
/// entirely. A declaration that doesn't match is logged and skipped, not an
/// error. Creates the work directory on first use.
///
/// # Errors
/// * `CombineError::Io` - if the work directory cannot be created
pub fn rewrite(
    contents: &str,
    disabled: &HashSet<Tool>,
    work_dir: &Path,
) -> CombineResult<RewrittenNoxfile> {
    // process tools in the order they first appear, so the report sections
    // follow the noxfile's declaration order
    let lowered = contents.to_lowercase();
    let mut present: Vec<(usize, Tool)> = Tool::FILE_BASED
        .into_iter()
        .filter_map(|tool| lowered.find(tool.name()).map(|pos| (pos, tool)))
        .collect();
    present.sort_by_key(|(pos, _)| *pos);

    let mut contents = contents.to_string();
    let mut temp_files = TempFileMap::new();

    for (_, tool) in present {
        if disabled.contains(&tool) {
            tracing::debug!(
                "Not including {} into combined output, skipping...",
                tool
            );
            continue;
        }
        let Some(out_file) = find_output_path(&contents, tool) else {
            tracing::debug!("Could not find output file for {}", tool);
            continue;
        };
        tracing::debug!("Found output file {} for {}", out_file, tool);

        std::fs::create_dir_all(work_dir)?;
        let temp_path = work_dir.join(format!("{}_temp_{}", out_file, random_suffix()));
        tracing::debug!("Generated temp file {} for {}", temp_path.display(), tool);

        let replacement = temp_path.to_string_lossy().replace('\\', "/");
        contents = contents.replace(&out_file, &replacement);
        temp_files
            .entry(out_file)
            .or_default()
            .push(TempFileRecord {
                tool,
                path: temp_path,
            });
    }

    Ok(RewrittenNoxfile {
        contents,
        temp_files,
    })
}

/// Random alphanumeric suffix for temp file names
fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}
