use crate::commands::{Output, Span, Tone};
use crate::history::{History, HistoryEntry};
use crossterm::{
    cursor, execute,
    style::{Color, Stylize},
    terminal::{Clear, ClearType},
};
use is_terminal::IsTerminal;
use std::io::{self, stdout, Write};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    /// Print the accessible labels instead of the styled output.
    pub accessible: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            accessible: false,
        }
    }
}

impl RenderOptions {
    /// Colour only when asked for and stdout is a real terminal.
    pub fn detect(color: bool, accessible: bool) -> Self {
        Self {
            color: color && stdout().is_terminal(),
            accessible,
        }
    }
}

/// Colour for a Pokémon type, following the games' type palette.
pub fn type_color(type_name: &str) -> Color {
    let (r, g, b) = match type_name {
        "normal" => (168, 168, 120),
        "fire" => (240, 128, 48),
        "water" => (104, 144, 240),
        "grass" => (120, 200, 80),
        "electric" => (248, 208, 48),
        "ice" => (152, 216, 216),
        "fighting" => (192, 48, 40),
        "poison" => (160, 64, 160),
        "ground" => (224, 192, 104),
        "flying" => (168, 144, 240),
        "psychic" => (248, 88, 136),
        "bug" => (168, 184, 32),
        "rock" => (184, 160, 56),
        "ghost" => (112, 88, 152),
        "dragon" => (112, 56, 248),
        "dark" => (112, 88, 72),
        "steel" => (184, 184, 208),
        "fairy" => (238, 153, 172),
        _ => return Color::Reset,
    };
    Color::Rgb { r, g, b }
}

fn paint_span(span: &Span, options: RenderOptions) -> String {
    if !options.color {
        return span.text.clone();
    }
    match &span.tone {
        Tone::Plain => span.text.clone(),
        Tone::PokemonType(name) => span.text.as_str().with(type_color(name)).bold().to_string(),
    }
}

/// Rows padded so every column lines up by display width.
pub fn format_table(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i] - UnicodeWidthStr::width(cell.as_str());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect();
            format!("│ {} │", cells.join(" │ "))
        })
        .collect()
}

fn output_lines(output: &Output, options: RenderOptions) -> Vec<String> {
    match output {
        Output::Text(text) => text.lines().map(str::to_string).collect(),
        Output::Spans(spans) => vec![spans.iter().map(|s| paint_span(s, options)).collect()],
        Output::Table(rows) => format_table(rows),
    }
}

/// Lines for one entry: the echoed command, then its output.
pub fn render_entry(entry: &HistoryEntry, options: RenderOptions) -> Vec<String> {
    if options.accessible {
        return vec![entry.command_label(), entry.output_label()];
    }

    let (command_tag, output_tag) = if options.color {
        ("Command:".bold().to_string(), "Output:".bold().to_string())
    } else {
        ("Command:".to_string(), "Output:".to_string())
    };

    let mut lines = vec![format!("{} {}", command_tag, entry.input())];

    let mut body = output_lines(entry.output(), options);
    if options.color && !entry.success() {
        body = body.into_iter().map(|line| line.red().to_string()).collect();
    }

    match (entry.output(), body.len()) {
        (Output::Table(_), _) | (_, 2..) => {
            lines.push(output_tag);
            lines.extend(body.into_iter().map(|line| format!("  {}", line)));
        }
        (_, 1) => lines.push(format!("{} {}", output_tag, body[0])),
        (_, _) => lines.push(output_tag),
    }
    lines
}

/// All entries, oldest first, separated by blank lines.
pub fn render_history(history: &History, options: RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in history.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(render_entry(entry, options));
    }
    lines
}

/// Redraws the whole history on every change. The newest entry always ends
/// at the bottom of the screen.
pub struct TerminalView<W: Write> {
    out: W,
    options: RenderOptions,
    header: Vec<String>,
    clear_screen: bool,
}

impl TerminalView<io::Stdout> {
    /// View on stdout; the screen is only cleared when stdout is a terminal.
    pub fn stdout(options: RenderOptions) -> Self {
        let mut view = Self::new(stdout(), options);
        view.clear_screen = stdout().is_terminal();
        view
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self {
            out,
            options,
            header: Vec::new(),
            clear_screen: false,
        }
    }

    /// Lines printed above the history on every redraw.
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }

    pub fn redraw(&mut self, history: &History) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.out, Clear(ClearType::All), Clear(ClearType::Purge), cursor::MoveTo(0, 0))?;
        }
        for line in &self.header {
            writeln!(self.out, "{}", line)?;
        }
        for line in render_history(history, self.options) {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
