use crate::backend::{BackendClient, BackendError};
use crate::commands::output::{CommandOutput, Output};
use crate::commands::registry::CommandHandler;
use crate::commands::{SERVER_DOWN_MESSAGE, UNEXPECTED_REPLY_MESSAGE};
use async_trait::async_trait;
use log::debug;

pub const GET_USAGE: &str = "'get' requires one input: the filepath of your CSV.";
pub const STATS_USAGE: &str = "'stats' should have no arguments.";

/// Map a transport/decoding failure to the message the user sees.
fn backend_failure(command: &str, error: BackendError) -> CommandOutput {
    match error {
        BackendError::Unreachable { .. } => CommandOutput::failure(SERVER_DOWN_MESSAGE),
        other => {
            debug!("{} failed: {}", command, other);
            CommandOutput::failure(UNEXPECTED_REPLY_MESSAGE)
        }
    }
}

/// Screen-reader text for a table: rows of comma-joined cells, separated by
/// `. END ROW. ` and terminated by `. END CSV.`
pub fn csv_label(rows: &[Vec<String>]) -> String {
    let mut label = rows
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join(". END ROW. ");
    label.push_str(". END CSV.");
    label
}

/// `get <filepath>`: load a CSV on the server, then display its contents.
pub struct GetCommand {
    client: BackendClient,
}

impl GetCommand {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommandHandler for GetCommand {
    async fn execute(&self, args: &[String]) -> CommandOutput {
        let [filepath] = args else {
            return CommandOutput::failure(GET_USAGE);
        };

        let loaded = match self.client.load_csv(filepath).await {
            Ok(reply) => reply,
            Err(e) => return backend_failure("loadcsv", e),
        };
        if !loaded.is_success() {
            return CommandOutput::failure(loaded.message);
        }

        match self.client.get_csv().await {
            Ok(reply) if reply.result == "success" => {
                let label = csv_label(&reply.data);
                CommandOutput::new(true, Output::Table(reply.data), label)
            }
            Ok(reply) => CommandOutput::failure(reply.message),
            Err(e) => backend_failure("getcsv", e),
        }
    }
}

/// `stats`: row and column counts of the loaded CSV.
pub struct StatsCommand {
    client: BackendClient,
}

impl StatsCommand {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommandHandler for StatsCommand {
    async fn execute(&self, args: &[String]) -> CommandOutput {
        if !args.is_empty() {
            return CommandOutput::failure(STATS_USAGE);
        }

        match self.client.stats_csv().await {
            Ok(reply) => CommandOutput::message(reply.is_success(), reply.message),
            Err(e) => backend_failure("statscsv", e),
        }
    }
}
