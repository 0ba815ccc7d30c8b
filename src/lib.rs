pub mod autocomplete;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod history;
pub mod repl;
pub mod terminal;

// Re-export commonly used items
pub use commands::{init_command_registry, CommandHandler, CommandOutput, CommandRegistry, Dispatcher};
pub use history::{History, HistoryEntry};
pub use repl::Repl;
