//! CLI argument definitions using clap
//!
//! The argument surface mirrors the nox invocation it wraps: after the
//! recognized flags, everything else is forwarded to nox untouched.

use std::collections::HashSet;

use clap::Parser;

use crate::tools::Tool;

/// Wrapper for nox that combines linter and test output into one report.
///
/// Rewrites the noxfile so file-based linters write into temp files, runs
/// nox, captures pytest/mypy output from the stream, and concatenates
/// everything into a single report file.
#[derive(Parser, Debug)]
#[command(name = "noxcomb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Location of nox file
    #[arg(long = "nox_file")]
    pub nox_file: Option<String>,

    /// Output file to write report to
    #[arg(long = "output_file")]
    pub output_file: Option<String>,

    /// Ignore reporting for specific tools (comma-separated)
    #[arg(long = "disabled_output", default_value = "")]
    pub disabled_output: String,

    /// Enable reporting for specific tools only, overrides disabled_output
    #[arg(long = "enabled_output", default_value = "")]
    pub enabled_output: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path (overrides default search paths)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Arguments forwarded to nox verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Resolve the effective disabled tool set
    ///
    /// A non-empty enabled list wins: every recognized tool is disabled
    /// except those explicitly enabled, and both the disabled flag and the
    /// config's disabled list are ignored. Otherwise the flag and config
    /// lists are merged. Unrecognized names are dropped.
    pub fn disabled_tools(&self, config_disabled: &[String]) -> HashSet<Tool> {
        let enabled = split_list(&self.enabled_output);
        if !enabled.is_empty() {
            let enabled_tools: HashSet<Tool> =
                enabled.iter().filter_map(|n| Tool::from_name(n)).collect();
            return Tool::ALL
                .into_iter()
                .filter(|t| !enabled_tools.contains(t))
                .collect();
        }

        split_list(&self.disabled_output)
            .iter()
            .chain(config_disabled)
            .filter_map(|n| Tool::from_name(n))
            .collect()
    }
}

/// Split a comma-separated tool list, lowercased, empty entries dropped
fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["noxcomb"]);

        assert!(cli.nox_file.is_none());
        assert!(cli.output_file.is_none());
        assert!(cli.disabled_output.is_empty());
        assert!(cli.enabled_output.is_empty());
        assert!(cli.args.is_empty());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_files() {
        let cli = Cli::parse_from([
            "noxcomb",
            "--nox_file",
            "other_noxfile.py",
            "--output_file",
            "combined.txt",
        ]);

        assert_eq!(cli.nox_file, Some("other_noxfile.py".to_string()));
        assert_eq!(cli.output_file, Some("combined.txt".to_string()));
    }

    #[test]
    fn test_cli_passthrough_args() {
        let cli = Cli::parse_from(["noxcomb", "--output_file", "out", "-v", "--test_args", "-flag"]);

        // -v before positionals is ours; everything after passes through
        assert!(cli.verbose);
        assert_eq!(cli.args, vec!["--test_args", "-flag"]);
    }

    #[test]
    fn test_disabled_tools_from_flag() {
        let cli = Cli::parse_from(["noxcomb", "--disabled_output", "pylint,flake8"]);

        let disabled = cli.disabled_tools(&[]);
        assert_eq!(
            disabled,
            [Tool::Pylint, Tool::Flake8].into_iter().collect()
        );
    }

    #[test]
    fn test_disabled_tools_case_insensitive() {
        let cli = Cli::parse_from(["noxcomb", "--disabled_output", "PyLint, MYPY"]);

        let disabled = cli.disabled_tools(&[]);
        assert_eq!(disabled, [Tool::Pylint, Tool::Mypy].into_iter().collect());
    }

    #[test]
    fn test_enabled_overrides_disabled() {
        // pylint re-enabled, everything else disabled
        let cli = Cli::parse_from([
            "noxcomb",
            "--disabled_output",
            "pylint,pytest",
            "--enabled_output",
            "pylint",
        ]);

        let disabled = cli.disabled_tools(&[]);
        assert_eq!(
            disabled,
            [Tool::Pytest, Tool::Mypy, Tool::Flake8].into_iter().collect()
        );
    }

    #[test]
    fn test_enabled_overrides_config_disabled() {
        let cli = Cli::parse_from(["noxcomb", "--enabled_output", "mypy"]);

        let disabled = cli.disabled_tools(&["mypy".to_string()]);
        assert!(!disabled.contains(&Tool::Mypy));
        assert_eq!(disabled.len(), 3);
    }

    #[test]
    fn test_config_disabled_merged_with_flag() {
        let cli = Cli::parse_from(["noxcomb", "--disabled_output", "pytest"]);

        let disabled = cli.disabled_tools(&["pylint".to_string()]);
        assert_eq!(disabled, [Tool::Pytest, Tool::Pylint].into_iter().collect());
    }

    #[test]
    fn test_unrecognized_names_dropped() {
        let cli = Cli::parse_from(["noxcomb", "--disabled_output", "eslint,,pytest,"]);

        let disabled = cli.disabled_tools(&[]);
        assert_eq!(disabled, [Tool::Pytest].into_iter().collect());
    }

    #[test]
    fn test_cli_verify() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }
}
