use crate::commands::output::CommandOutput;
use crate::commands::registry::CommandRegistry;
use log::debug;
use std::sync::Arc;

pub const INVALID_COMMAND_MESSAGE: &str = "Not a valid command.";

/// Split raw input into the command name and its arguments.
/// Returns `None` for blank input.
pub fn parse_input(input: &str) -> Option<(&str, Vec<String>)> {
    let mut parts = input.split_whitespace();
    let command = parts.next()?;
    Some((command, parts.map(str::to_string).collect()))
}

/// Routes one line of input to its registered handler.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Run the handler named by the first token of `input` and return its
    /// result unchanged. Unknown (or blank) commands yield a fixed failure.
    pub async fn dispatch(&self, input: &str) -> CommandOutput {
        let Some((command, args)) = parse_input(input) else {
            return CommandOutput::failure(INVALID_COMMAND_MESSAGE);
        };

        // Clone the handler out so the registry lock is not held across the await.
        match self.registry.handler(command) {
            Some(handler) => {
                debug!("dispatching '{}' with {} argument(s)", command, args.len());
                let output = handler.execute(&args).await;
                debug!("'{}' finished (success: {})", command, output.success);
                output
            }
            None => {
                debug!("unknown command '{}'", command);
                CommandOutput::failure(INVALID_COMMAND_MESSAGE)
            }
        }
    }
}
