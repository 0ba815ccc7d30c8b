/// Visual tone of one piece of output text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Coloured by Pokémon type name, e.g. `fire`.
    PokemonType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Plain }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }
}

/// Rendered body of a command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Spans(Vec<Span>),
    Table(Vec<Vec<String>>),
}

impl Output {
    /// The output with all styling dropped.
    pub fn plain_text(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Spans(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            Output::Table(rows) => rows
                .iter()
                .map(|row| row.join(","))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// What a handler hands back: success flag, rendered output and its plain-text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub output: Output,
    pub label: String,
}

impl CommandOutput {
    pub fn new(success: bool, output: Output, label: impl Into<String>) -> Self {
        Self { success, output, label: label.into() }
    }

    /// Plain message whose text doubles as its label.
    pub fn message(success: bool, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success,
            output: Output::Text(message.clone()),
            label: message,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::message(false, message)
    }
}
