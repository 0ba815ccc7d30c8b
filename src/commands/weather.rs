use crate::backend::{BackendClient, BackendError};
use crate::commands::output::CommandOutput;
use crate::commands::registry::CommandHandler;
use crate::commands::{SERVER_DOWN_MESSAGE, UNEXPECTED_REPLY_MESSAGE};
use async_trait::async_trait;
use log::debug;

pub const USAGE: &str = "'weather' requires two inputs: the latitude and the longitude.";

/// `weather <lat> <lon>`: current temperature at the given coordinates.
pub struct WeatherCommand {
    client: BackendClient,
}

impl WeatherCommand {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommandHandler for WeatherCommand {
    async fn execute(&self, args: &[String]) -> CommandOutput {
        let [lat, lon] = args else {
            return CommandOutput::failure(USAGE);
        };

        // Coordinate validation is the server's job; its message is shown as-is.
        match self.client.weather(lat, lon).await {
            Ok(reply) => CommandOutput::message(reply.is_success(), reply.message),
            Err(BackendError::Unreachable { .. }) => CommandOutput::failure(SERVER_DOWN_MESSAGE),
            Err(e) => {
                debug!("weather failed: {}", e);
                CommandOutput::failure(UNEXPECTED_REPLY_MESSAGE)
            }
        }
    }
}
