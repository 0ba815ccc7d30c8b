use crate::backend::{BackendError, PokeApiClient, PokemonReply};
use crate::commands::output::{CommandOutput, Output, Span, Tone};
use crate::commands::registry::CommandHandler;
use crate::commands::UNEXPECTED_REPLY_MESSAGE;
use async_trait::async_trait;
use log::debug;

pub const USAGE: &str = "'pokemon' should have 1 argument: the name of the pokemon";
pub const POKEAPI_DOWN_MESSAGE: &str = "The PokeAPI server is down! Please try again later.";
pub const NOT_FOUND_MESSAGE: &str = "PokeAPI couldn't find this Pokemon. Check your spelling!";

/// Base stat labels in PokeAPI's stat order.
pub const STAT_NAMES: [&str; 6] = ["HP", "Atk", "Def", "SpAtk", "SpDef", "Spd"];

/// `pokemon <name>`: types and base stats of a Pokémon.
pub struct PokemonCommand {
    client: PokeApiClient,
}

impl PokemonCommand {
    pub fn new(client: PokeApiClient) -> Self {
        Self { client }
    }
}

/// Build the output for a decoded reply. `None` if PokeAPI sent fewer than six stats.
pub fn describe(reply: &PokemonReply) -> Option<CommandOutput> {
    if reply.stats.len() < STAT_NAMES.len() {
        return None;
    }

    let type_names: Vec<&str> = reply.types.iter().map(|slot| slot.kind.name.as_str()).collect();
    let stats = STAT_NAMES
        .iter()
        .zip(&reply.stats)
        .map(|(name, stat)| format!("{} - {}", name, stat.base_stat))
        .collect::<Vec<_>>()
        .join(", ");

    let mut spans = vec![Span::plain("Types: ")];
    for (i, name) in type_names.iter().enumerate() {
        if i > 0 {
            spans.push(Span::plain(", "));
        }
        spans.push(Span::styled(*name, Tone::PokemonType(name.to_string())));
    }
    spans.push(Span::plain(format!(". Base stats: {}.", stats)));

    let label = format!("Types: {}. Base stats: {}", type_names.join(","), stats);
    Some(CommandOutput::new(true, Output::Spans(spans), label))
}

#[async_trait]
impl CommandHandler for PokemonCommand {
    async fn execute(&self, args: &[String]) -> CommandOutput {
        let [name] = args else {
            return CommandOutput::failure(USAGE);
        };

        match self.client.pokemon(name).await {
            Ok(reply) => describe(&reply).unwrap_or_else(|| {
                debug!("pokemon reply for '{}' had {} stats", name, reply.stats.len());
                CommandOutput::failure(UNEXPECTED_REPLY_MESSAGE)
            }),
            Err(BackendError::NotFound { .. }) => CommandOutput::failure(NOT_FOUND_MESSAGE),
            Err(BackendError::Unreachable { .. }) => CommandOutput::failure(POKEAPI_DOWN_MESSAGE),
            Err(e) => {
                debug!("pokemon lookup failed: {}", e);
                CommandOutput::failure(UNEXPECTED_REPLY_MESSAGE)
            }
        }
    }
}
