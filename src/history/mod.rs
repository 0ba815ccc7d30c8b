pub mod transcript;

use crate::commands::{CommandOutput, Output};
use chrono::{DateTime, Utc};

pub use transcript::TranscriptWriter;

/// One past submission and its outcome. Never changed once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    success: bool,
    input: String,
    output: Output,
    label: String,
    completed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(input: impl Into<String>, result: CommandOutput) -> Self {
        Self {
            success: result.success,
            input: input.into(),
            output: result.output,
            label: result.label,
            completed_at: Utc::now(),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// The input exactly as the user typed it.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Accessible name of the echoed command.
    pub fn command_label(&self) -> String {
        format!("Command: {}", self.input)
    }

    /// Accessible name of the output part, prefixed by its outcome.
    pub fn output_label(&self) -> String {
        let prefix = if self.success { "Output" } else { "Error" };
        format!("{}: {}", prefix, self.label)
    }
}

/// Append-only, ordered log of entries. Insertion order is display order.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
