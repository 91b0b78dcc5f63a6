use crate::command::Command;
use crate::error::Result;
use crate::parser::CommandParser;
use std::fs;
use std::path::Path;

/// An ordered sequence of raw command lines.
///
/// Scripts are read once and never mutated; blank lines and `#`-comments are
/// carried verbatim so converters can preserve them.
#[derive(Debug, Clone, Default)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Script> {
        let text = fs::read_to_string(path)?;
        Ok(Script::from_text(&text))
    }

    pub fn from_text(text: &str) -> Script {
        Script {
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Script
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Script {
            lines: lines.into_iter().map(|l| l.into()).collect(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Best-effort command iteration: blanks, comments, and unparseable
    /// lines are skipped rather than surfaced.
    pub fn commands<'a>(&'a self, parser: &'a CommandParser) -> impl Iterator<Item = Command> + 'a {
        self.lines
            .iter()
            .filter_map(move |line| parser.parse_lenient(line))
    }
}
