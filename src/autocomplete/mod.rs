use crate::commands::CommandRegistry;
use inquire::autocompletion::Replacement;
use inquire::{Autocomplete, CustomUserError};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub full_path: String,
    pub is_directory: bool,
}

/// Filesystem suggestions relative to a working directory.
#[derive(Debug, Clone)]
pub struct FileSuggester {
    working_dir: String,
}

impl FileSuggester {
    pub fn new(working_dir: String) -> Self {
        Self { working_dir }
    }

    pub fn get_file_suggestions(&self, partial_path: &str) -> Vec<FileEntry> {
        if partial_path.is_empty() {
            return self.list_directory(".");
        }

        let (dir_path, file_prefix) = match partial_path.rfind('/') {
            Some(0) => ("/".to_string(), partial_path[1..].to_string()),
            Some(idx) => (partial_path[..idx].to_string(), partial_path[idx + 1..].to_string()),
            None => (".".to_string(), partial_path.to_string()),
        };

        self.list_directory(&dir_path)
            .into_iter()
            .filter(|entry| entry.name.starts_with(&file_prefix))
            .collect()
    }

    fn list_directory(&self, relative_path: &str) -> Vec<FileEntry> {
        let full_path = Path::new(&self.working_dir).join(relative_path);
        let mut entries = Vec::new();

        if let Ok(dir_entries) = fs::read_dir(&full_path) {
            for entry in dir_entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    let name = entry.file_name().to_string_lossy().to_string();

                    // Skip hidden files unless specifically requested
                    if name.starts_with('.') && !relative_path.contains("/.") {
                        continue;
                    }

                    let entry_path = match relative_path {
                        "." => name.clone(),
                        "/" => format!("/{}", name),
                        _ => format!("{}/{}", relative_path.trim_end_matches('/'), name),
                    };

                    entries.push(FileEntry {
                        name,
                        full_path: entry_path,
                        is_directory: metadata.is_dir(),
                    });
                }
            }
        }

        // Sort: directories first, then files, both alphabetically
        entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });

        entries
    }
}

/// Tab completion for the REPL prompt: command names for the first word,
/// file paths for the argument of `get`.
#[derive(Clone)]
pub struct CommandAutocomplete {
    registry: Arc<CommandRegistry>,
    files: FileSuggester,
}

impl CommandAutocomplete {
    pub fn new(registry: Arc<CommandRegistry>, working_dir: String) -> Self {
        Self {
            registry,
            files: FileSuggester::new(working_dir),
        }
    }

    pub fn suggestions(&self, input: &str) -> Vec<String> {
        match input.split_once(' ') {
            None => self.registry.get_matching_commands(input),
            Some(("get", partial)) if !partial.contains(' ') => self
                .files
                .get_file_suggestions(partial)
                .into_iter()
                .map(|entry| {
                    let suffix = if entry.is_directory { "/" } else { "" };
                    format!("get {}{}", entry.full_path, suffix)
                })
                .collect(),
            Some(_) => Vec::new(),
        }
    }
}

impl Autocomplete for CommandAutocomplete {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(self.suggestions(input))
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(match highlighted_suggestion {
            Some(suggestion) => Replacement::Some(suggestion),
            None => Replacement::None,
        })
    }
}
