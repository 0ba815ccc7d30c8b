pub mod csv;
pub mod dispatcher;
pub mod output;
pub mod pokemon;
pub mod registry;
pub mod weather;

use crate::backend::{BackendClient, PokeApiClient};
use crate::config::Config;
use std::sync::Arc;

pub use dispatcher::{parse_input, Dispatcher, INVALID_COMMAND_MESSAGE};
pub use output::{CommandOutput, Output, Span, Tone};
pub use registry::{handler_fn, CommandHandler, CommandInfo, CommandRegistry};

pub const SERVER_DOWN_MESSAGE: &str = "The API server is down! Please try again later.";
pub const UNEXPECTED_REPLY_MESSAGE: &str = "The API server returned an unexpected response.";

/// Registry holding the built-in commands, wired to the configured services.
pub fn init_command_registry(config: &Config) -> CommandRegistry {
    let registry = CommandRegistry::new();
    register_builtin_commands(&registry, BackendClient::from_config(config), PokeApiClient::from_config(config));
    registry
}

pub fn register_builtin_commands(registry: &CommandRegistry, backend: BackendClient, pokeapi: PokeApiClient) {
    registry.register(
        "weather",
        "Current temperature: weather <lat> <lon>",
        weather::WeatherCommand::new(backend.clone()),
    );
    registry.register(
        "get",
        "Load a CSV on the server and show it: get <filepath>",
        csv::GetCommand::new(backend.clone()),
    );
    registry.register(
        "stats",
        "Row and column counts of the loaded CSV",
        csv::StatsCommand::new(backend),
    );
    registry.register(
        "pokemon",
        "Types and base stats: pokemon <name>",
        pokemon::PokemonCommand::new(pokeapi),
    );
}

/// Dispatcher over the built-in commands.
pub fn default_dispatcher(config: &Config) -> Dispatcher {
    Dispatcher::new(Arc::new(init_command_registry(config)))
}
