use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Command-line REPL for CSV, weather and Pokémon lookups backed by web services")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the CSV/weather server URL from config
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Print accessible labels instead of styled output
    #[arg(long, global = true)]
    pub accessible: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Write a markdown transcript of the session to this file on exit
    #[arg(long, global = true)]
    pub transcript: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run command lines in order, print the history and exit")]
    Run {
        #[arg(help = "Command lines, e.g. \"get data/abc.csv\" stats", required = true)]
        lines: Vec<String>,
    },
    #[command(about = "Manage relay configuration")]
    Config {
        #[command(subcommand)]
        config_command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    #[command(about = "Initialize configuration with defaults")]
    Init,
    #[command(about = "Display current configuration")]
    Get,
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (e.g., 'backend.base_url')")]
        key: String,
        #[arg(help = "Configuration value")]
        value: String,
    },
    #[command(about = "Validate current configuration")]
    Validate,
}
