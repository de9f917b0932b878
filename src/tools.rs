//! The recognized linter and test tools
//!
//! nox sessions fall into two groups: tools whose findings appear directly
//! in nox's output stream (pytest, mypy) and tools that write their own
//! report file (pylint, flake8). File-based tools carry a regex locating
//! their output declaration inside the noxfile.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

// Static regex patterns - compiled once at first use
/// Matches a pylint invocation's `--output` argument in a noxfile
static PYLINT_OUTPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"['"]pylint['"],[^)]*['"]--output['"],\s{0,3}['"](\S*)['"]"#).unwrap()
});

/// Matches a flake8 invocation's `--output-file` argument in a noxfile
static FLAKE8_OUTPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"['"]flake8['"],[^)]*['"]--output-file['"],\s{0,3}['"](\S*)['"]"#).unwrap()
});

/// Matches ANSI escape sequences (color codes, cursor movement)
static ANSI_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").unwrap());

/// A tool recognized in the combined report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Pylint,
    Flake8,
    Pytest,
    Mypy,
}

impl Tool {
    /// All recognized tools
    pub const ALL: [Tool; 4] = [Tool::Pylint, Tool::Flake8, Tool::Pytest, Tool::Mypy];

    /// Tools captured from nox's output stream, in report order
    pub const INLINE: [Tool; 2] = [Tool::Pytest, Tool::Mypy];

    /// Tools that write their own report file
    pub const FILE_BASED: [Tool; 2] = [Tool::Pylint, Tool::Flake8];

    /// Lowercase tool name as it appears in noxfiles and nox output
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pylint => "pylint",
            Tool::Flake8 => "flake8",
            Tool::Pytest => "pytest",
            Tool::Mypy => "mypy",
        }
    }

    /// Case-insensitive name lookup
    pub fn from_name(name: &str) -> Option<Tool> {
        match name.to_lowercase().as_str() {
            "pylint" => Some(Tool::Pylint),
            "flake8" => Some(Tool::Flake8),
            "pytest" => Some(Tool::Pytest),
            "mypy" => Some(Tool::Mypy),
            _ => None,
        }
    }

    /// Regex locating this tool's declared output file in a noxfile
    ///
    /// Inline tools have no output declaration and return `None`.
    pub fn output_pattern(&self) -> Option<&'static Regex> {
        match self {
            Tool::Pylint => Some(&PYLINT_OUTPUT_RE),
            Tool::Flake8 => Some(&FLAKE8_OUTPUT_RE),
            Tool::Pytest | Tool::Mypy => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Strip ANSI escape sequences from a string
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE_RE.replace_all(text, "").into_owned()
}
