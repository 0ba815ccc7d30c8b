use crate::history::History;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a session's history as a markdown transcript.
pub struct TranscriptWriter {
    path: PathBuf,
    session_id: String,
}

impl TranscriptWriter {
    pub fn new(path: impl Into<PathBuf>, session_id: String) -> Self {
        Self {
            path: path.into(),
            session_id,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, history: &History) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, self.generate_markdown(history))?;
        Ok(())
    }

    pub fn generate_markdown(&self, history: &History) -> String {
        let mut markdown = String::new();

        markdown.push_str("# Relay REPL Transcript\n\n");
        markdown.push_str(&format!("**Session ID:** `{}`\n", self.session_id));
        markdown.push_str(&format!("**Generated:** {}\n\n", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")));
        markdown.push_str("---\n\n");

        for (i, entry) in history.iter().enumerate() {
            let status_icon = if entry.success() { "✅" } else { "❌" };
            markdown.push_str(&format!("## {} {}\n", i + 1, status_icon));
            markdown.push_str(&format!("**Time:** {}\n\n", entry.completed_at().format("%H:%M:%S")));
            markdown.push_str(&format!("```\n{}\n```\n\n", entry.input()));
            markdown.push_str(&format!("{}\n\n", entry.output_label()));
        }

        markdown
    }
}
