//! Inline output capture
//!
//! pytest and mypy print their findings straight into nox's output stream
//! rather than a file. Each inline tool gets a small recorder fed one line
//! at a time: it starts recording on the first line mentioning the tool and
//! stops once nox reports the tool's command as done.

use crate::tools::{strip_ansi, Tool};

/// Line recorder for a single inline tool
///
/// Lines are appended verbatim, including the trigger line and the
/// terminating sentinel line. The recorder only ever arms once: a non-empty
/// buffer suppresses re-triggering.
#[derive(Debug)]
pub struct InlineCapture {
    tool: Tool,
    sentinel: String,
    buffer: String,
    recording: bool,
}

impl InlineCapture {
    /// Create an idle recorder for an inline tool
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            sentinel: format!("nox > command {}", tool.name()),
            buffer: String::new(),
            recording: false,
        }
    }

    /// Tool this recorder tracks
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether the recorder is currently accumulating lines
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Feed one line of nox output, trailing newline included if present
    pub fn feed(&mut self, line: &str) {
        if line.contains(self.tool.name()) && self.buffer.is_empty() {
            self.recording = true;
        }
        if self.recording {
            let plain = strip_ansi(line).to_lowercase();
            if plain.contains(&self.sentinel) {
                self.recording = false;
            }
            // terminating line is still part of the section
            self.buffer.push_str(line);
        }
    }

    /// Consume the recorder, returning the captured text
    pub fn into_output(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_tool_mentioned() {
        let mut capture = InlineCapture::new(Tool::Mypy);

        capture.feed("nox > Running session flake8\n");
        capture.feed("some unrelated line\n");

        assert!(!capture.is_recording());
        assert!(capture.into_output().is_empty());
    }

    #[test]
    fn test_records_between_trigger_and_sentinel() {
        let mut capture = InlineCapture::new(Tool::Mypy);

        capture.feed("running mypy\n");
        capture.feed("...findings...\n");
        capture.feed("nox > command mypy finished\n");

        assert!(!capture.is_recording());
        assert_eq!(
            capture.into_output(),
            "running mypy\n...findings...\nnox > command mypy finished\n"
        );
    }

    #[test]
    fn test_sentinel_case_insensitive() {
        let mut capture = InlineCapture::new(Tool::Pytest);

        capture.feed("running pytest\n");
        capture.feed("nox > Command PYTEST finished\n");

        assert!(!capture.is_recording());
    }

    #[test]
    fn test_sentinel_detected_through_ansi_codes() {
        let mut capture = InlineCapture::new(Tool::Pytest);

        capture.feed("running pytest\n");
        capture.feed("\x1b[36mnox > Command pytest finished\x1b[0m\n");

        assert!(!capture.is_recording());
        // the raw line, escapes included, is still appended
        assert!(capture.into_output().contains("\x1b[36m"));
    }

    #[test]
    fn test_no_retrigger_after_buffer_has_content() {
        let mut capture = InlineCapture::new(Tool::Mypy);

        capture.feed("running mypy\n");
        capture.feed("nox > command mypy finished\n");
        capture.feed("mypy mentioned again\n");

        assert!(!capture.is_recording());
        assert_eq!(
            capture.into_output(),
            "running mypy\nnox > command mypy finished\n"
        );
    }

    #[test]
    fn test_left_recording_at_end_of_stream() {
        let mut capture = InlineCapture::new(Tool::Pytest);

        capture.feed("running pytest\n");
        capture.feed("still going\n");

        // no forced flush: the recorder simply stays armed
        assert!(capture.is_recording());
        assert_eq!(capture.into_output(), "running pytest\nstill going\n");
    }

    #[test]
    fn test_two_recorders_share_a_line() {
        let mut pytest = InlineCapture::new(Tool::Pytest);
        let mut mypy = InlineCapture::new(Tool::Mypy);

        let line = "running pytest and mypy checks\n";
        pytest.feed(line);
        mypy.feed(line);

        assert!(pytest.is_recording());
        assert!(mypy.is_recording());
        assert_eq!(pytest.into_output(), line);
        assert_eq!(mypy.into_output(), line);
    }
}
