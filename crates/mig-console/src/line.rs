//! Line suppliers for interactive sessions.
//!
//! A session only needs two things from the terminal: the next line (or
//! end of input) and a place to record history. [`EditorLines`] provides
//! them with `rustyline`; [`ScriptedLines`] replays a fixed script.

use std::collections::VecDeque;
use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::{ConsoleError, Result};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct LineError(pub String);

pub trait LineSource {
    /// Next line of input, `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> std::result::Result<Option<String>, LineError>;

    fn add_history(&mut self, line: &str);
}

/// Script replay when `script` is given, otherwise the terminal editor.
pub fn open_lines(script: Option<&Path>) -> Result<Box<dyn LineSource>> {
    match script {
        Some(path) => Ok(Box::new(ScriptedLines::from_file(path)?)),
        None => Ok(Box::new(EditorLines::new()?)),
    }
}

/// Terminal line editor with in-memory history
pub struct EditorLines {
    editor: DefaultEditor,
}

impl EditorLines {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| ConsoleError::LineEditor(e.to_string()))?;
        Ok(EditorLines { editor })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, prompt: &str) -> std::result::Result<Option<String>, LineError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            // ctrl+c drops the current line
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(LineError(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::debug!(error = %e, "failed to record history entry");
        }
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    pending: VecDeque<String>,
    history: Vec<String>,
    failure: Option<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedLines {
            pending: lines.into_iter().map(Into::into).collect(),
            history: Vec::new(),
            failure: None,
        }
    }

    /// Lines of a script file; blank lines and `#` comments are dropped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_string),
        ))
    }

    /// Fail with `message` once the script runs out instead of ending cleanly.
    pub fn failing_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, _prompt: &str) -> std::result::Result<Option<String>, LineError> {
        match self.pending.pop_front() {
            Some(line) => Ok(Some(line)),
            None => match self.failure.take() {
                Some(message) => Err(LineError(message)),
                None => Ok(None),
            },
        }
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_lines_end_with_none() {
        let mut lines = ScriptedLines::new(["meta", "exit"]);
        assert_eq!(lines.read_line("> ").unwrap().as_deref(), Some("meta"));
        assert_eq!(lines.read_line("> ").unwrap().as_deref(), Some("exit"));
        assert_eq!(lines.read_line("> ").unwrap(), None);
        assert_eq!(lines.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_scripted_lines_failure_after_script() {
        let mut lines = ScriptedLines::new(["meta"]).failing_with("terminal went away");
        assert!(lines.read_line("> ").unwrap().is_some());
        let err = lines.read_line("> ").unwrap_err();
        assert_eq!(err.to_string(), "terminal went away");
    }

    #[test]
    fn test_history_records_in_order() {
        let mut lines = ScriptedLines::default();
        lines.add_history("counters");
        lines.add_history("frobnicate");
        assert_eq!(lines.history(), ["counters", "frobnicate"]);
    }

    #[test]
    fn test_from_file_skips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.txt");
        std::fs::write(&path, "# inspect\ncounters\n\n  times  \nexit\n").unwrap();

        let lines = ScriptedLines::from_file(&path).unwrap();

        assert_eq!(lines.remaining(), 3);
    }

    #[test]
    fn test_open_lines_prefers_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.txt");
        std::fs::write(&path, "counters
exit
").unwrap();

        let mut lines = open_lines(Some(path.as_path())).unwrap();

        assert_eq!(lines.read_line("> ").unwrap().as_deref(), Some("counters"));
        assert_eq!(lines.read_line("> ").unwrap().as_deref(), Some("exit"));
        assert_eq!(lines.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_open_lines_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");
        assert!(matches!(open_lines(Some(missing.as_path())), Err(ConsoleError::Io(_))));
    }
}
