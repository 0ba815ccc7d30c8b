use clap::Parser;
use inquire::{InquireError, Text};
use log::{debug, warn};
use relay_cli::autocomplete::CommandAutocomplete;
use relay_cli::cli::{Cli, Commands, ConfigCommand};
use relay_cli::commands::{init_command_registry, CommandRegistry, Dispatcher};
use relay_cli::config::{Config, ConfigManager};
use relay_cli::history::TranscriptWriter;
use relay_cli::repl::Repl;
use relay_cli::terminal::{render_history, RenderOptions, TerminalView};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// How long the prompt waits for a command before showing it as still running.
const SETTLE_TIME: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();

    match cli.command.take() {
        Some(Commands::Config { config_command }) => {
            init_logging(cli.verbose);
            match config_command {
                ConfigCommand::Init => {
                    ConfigManager::init_config()?;
                }
                ConfigCommand::Get => {
                    let config = ConfigManager::load_config()?;
                    let toml_string = toml::to_string_pretty(&config)?;
                    println!("Current configuration:\n{}", toml_string);
                }
                ConfigCommand::Set { key, value } => {
                    ConfigManager::set_config_value(&key, &value)?;
                }
                ConfigCommand::Validate => {
                    ConfigManager::validate_config()?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Run { lines }) => {
            let config = load_settings(&cli)?;
            run_lines(&cli, &config, lines).await
        }
        None => {
            let config = load_settings(&cli)?;
            start_repl(&cli, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Config file + environment, then command-line overrides.
fn load_settings(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = ConfigManager::load_config()?;

    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
    }
    if cli.verbose {
        config.preferences.verbose = true;
    }
    if cli.accessible {
        config.preferences.accessible = true;
    }
    if cli.no_color {
        config.preferences.color = false;
    }

    init_logging(config.preferences.verbose);
    debug!("backend: {}, pokeapi: {}", config.backend.base_url, config.pokeapi.base_url);
    Ok(config)
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions::detect(config.preferences.color, config.preferences.accessible)
}

fn write_transcript(cli: &Cli, session_id: &str, repl: &Repl) {
    let Some(path) = &cli.transcript else {
        return;
    };
    let writer = TranscriptWriter::new(path, session_id.to_string());
    match writer.write(repl.history()) {
        Ok(()) => println!("📝 Transcript saved to {}", writer.path().display()),
        Err(e) => eprintln!("Warning: Failed to write transcript: {}", e),
    }
}

/// Execute each line in order, print the resulting history and exit.
/// Exits non-zero when any line failed.
async fn run_lines(cli: &Cli, config: &Config, lines: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut repl = Repl::new(Dispatcher::new(Arc::new(init_command_registry(config))));

    for line in lines {
        repl.run_line(line).await;
    }

    for line in render_history(repl.history(), render_options(config)) {
        println!("{}", line);
    }
    write_transcript(cli, &Uuid::new_v4().to_string(), &repl);

    let all_succeeded = repl.history().iter().all(|entry| entry.success());
    Ok(if all_succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn banner(registry: &CommandRegistry, config: &Config, session_id: &str) -> Vec<String> {
    let mut lines = vec![
        "🚀 Relay REPL".to_string(),
        format!("🆔 Session ID: {}", session_id),
        format!("🔗 Backend: {}", config.backend.base_url),
        "💡 Commands:".to_string(),
    ];
    for (name, description) in registry.get_command_descriptions() {
        lines.push(format!("   • {:<8} {}", name, description));
    }
    lines.push("   Press Ctrl+C three times to exit".to_string());
    lines.push(String::new());
    lines
}

async fn start_repl(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let working_dir = fs::canonicalize(".")?.to_string_lossy().to_string();
    let registry = Arc::new(init_command_registry(config));
    let mut repl = Repl::new(Dispatcher::new(Arc::clone(&registry)));
    let session_id = Uuid::new_v4().to_string();

    let mut view = TerminalView::stdout(render_options(config))
        .with_header(banner(&registry, config, &session_id));
    view.redraw(repl.history())?;

    let mut exit_attempts = 0;

    loop {
        let help = match repl.pending() {
            0 => "Type a command (Tab to complete, Ctrl+C 3x to exit)".to_string(),
            n => format!("{} command(s) still running (Tab to complete, Ctrl+C 3x to exit)", n),
        };
        let completer = CommandAutocomplete::new(Arc::clone(&registry), working_dir.clone());
        // Commands already in flight keep running while the prompt blocks.
        let user_input = tokio::task::spawn_blocking(move || {
            Text::new("›").with_help_message(&help).with_autocomplete(completer).prompt()
        })
        .await?;

        match user_input {
            Ok(line) => {
                exit_attempts = 0;
                // Blank lines are submitted too; they come back as an invalid command.
                repl.submit(line);
                repl.collect_finished(SETTLE_TIME).await;
                view.redraw(repl.history())?;
            }
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                exit_attempts += 1;
                if exit_attempts >= 3 {
                    println!("\n👋 Goodbye!");
                    break;
                } else {
                    println!("\n⚠️ Press Ctrl+C {} more time(s) to exit", 3 - exit_attempts);
                    continue;
                }
            }
            Err(e) => {
                warn!("input error: {}", e);
                println!("❌ Input error: {}", e);
                if matches!(e, InquireError::NotTTY) {
                    break;
                }
                exit_attempts = 0;
                continue;
            }
        }
    }

    if repl.pending() > 0 {
        debug!("waiting on {} running command(s) before exit", repl.pending());
        repl.collect_finished(SETTLE_TIME * 10).await;
    }
    write_transcript(cli, &session_id, &repl);
    Ok(())
}
