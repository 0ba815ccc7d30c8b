use crate::commands::output::CommandOutput;
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

/// A command implementation. Handlers validate their own arguments and report
/// every failure through the returned output rather than an error.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, args: &[String]) -> CommandOutput;
}

/// Adapter that lets an async closure act as a handler.
pub struct FnHandler<F> {
    func: F,
}

/// Wrap an async closure taking the argument list as a [`CommandHandler`].
pub fn handler_fn<F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = CommandOutput> + Send + 'static,
{
    FnHandler { func }
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Vec<String>) -> Fut + Send + Sync,
    Fut: Future<Output = CommandOutput> + Send + 'static,
{
    async fn execute(&self, args: &[String]) -> CommandOutput {
        (self.func)(args.to_vec()).await
    }
}

/// Command metadata
#[derive(Clone)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub handler: Arc<dyn CommandHandler>,
}

impl std::fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Name → handler table. Interior locking lets it be shared with in-flight
/// dispatches and still be changed at runtime.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, CommandInfo>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any existing handler of the same name.
    /// Returns `true` when an existing registration was overwritten.
    pub fn register<H>(&self, name: &str, description: &str, handler: H) -> bool
    where
        H: CommandHandler + 'static,
    {
        self.register_arc(name, description, Arc::new(handler))
    }

    pub fn register_arc(&self, name: &str, description: &str, handler: Arc<dyn CommandHandler>) -> bool {
        let command_info = CommandInfo {
            name: name.to_string(),
            description: description.to_string(),
            handler,
        };
        let mut commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = commands.insert(name.to_string(), command_info).is_some();
        if replaced {
            warn!("Overwriting existing handler for command '{}'", name);
        }
        replaced
    }

    /// Remove a command. Returns `false` (and warns) when it was not registered.
    pub fn unregister(&self, name: &str) -> bool {
        let mut commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        if commands.remove(name).is_some() {
            true
        } else {
            warn!("Command '{}' does not exist", name);
            false
        }
    }

    /// Exact-name lookup.
    pub fn handler(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|info| Arc::clone(&info.handler))
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered commands, sorted by name.
    pub fn get_all_commands(&self) -> Vec<CommandInfo> {
        let mut commands: Vec<CommandInfo> = self
            .commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    /// Command names starting with `prefix`, sorted. Used for completion only;
    /// dispatch never matches on prefixes.
    pub fn get_matching_commands(&self, prefix: &str) -> Vec<String> {
        let mut matching: Vec<String> = self
            .commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect();
        matching.sort();
        matching
    }

    /// (name, description) pairs sorted by name.
    pub fn get_command_descriptions(&self) -> Vec<(String, String)> {
        self.get_all_commands()
            .into_iter()
            .map(|cmd| (cmd.name, cmd.description))
            .collect()
    }
}
