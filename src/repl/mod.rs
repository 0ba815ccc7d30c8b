use crate::commands::{CommandOutput, Dispatcher};
use crate::history::{History, HistoryEntry};
use log::warn;
use std::time::Duration;
use tokio::task::JoinSet;

pub const HANDLER_CRASHED_MESSAGE: &str = "The command failed unexpectedly.";

/// Drives submissions through the dispatcher and records them in the history.
///
/// Several submissions may be in flight at once. Each is appended when it
/// finishes, so the history follows completion order, not submission order.
pub struct Repl {
    dispatcher: Dispatcher,
    history: History,
    in_flight: JoinSet<HistoryEntry>,
}

impl Repl {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            history: History::new(),
            in_flight: JoinSet::new(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Start dispatching `input` without waiting for it.
    pub fn submit(&mut self, input: impl Into<String>) {
        let input = input.into();
        let dispatcher = self.dispatcher.clone();
        self.in_flight.spawn(async move {
            // The dispatch runs in its own task so a panicking handler still
            // yields an entry for this input.
            let line = input.clone();
            let dispatch = tokio::spawn(async move { dispatcher.dispatch(&line).await });
            let output = match dispatch.await {
                Ok(output) => output,
                Err(e) => {
                    warn!("command '{}' failed: {}", input, e);
                    CommandOutput::failure(HANDLER_CRASHED_MESSAGE)
                }
            };
            HistoryEntry::new(input, output)
        });
    }

    /// Wait for the next submission to finish and append it.
    /// Returns `None` when nothing is in flight.
    pub async fn next_completed(&mut self) -> Option<&HistoryEntry> {
        let entry = loop {
            match self.in_flight.join_next().await? {
                Ok(entry) => break entry,
                // Only reachable if the runtime cancels the task.
                Err(e) => warn!("command task was cancelled: {}", e),
            }
        };
        Some(self.history.push(entry))
    }

    /// Append every submission that finishes within `wait` of the previous
    /// one. Slower submissions stay in flight. Returns how many were appended.
    pub async fn collect_finished(&mut self, wait: Duration) -> usize {
        let mut appended = 0;
        while self.pending() > 0 {
            match tokio::time::timeout(wait, self.next_completed()).await {
                Ok(Some(_)) => appended += 1,
                Ok(None) | Err(_) => break,
            }
        }
        appended
    }

    /// Submit `input` and wait for its entry.
    pub async fn run_line(&mut self, input: impl Into<String>) -> Option<&HistoryEntry> {
        self.submit(input);
        self.next_completed().await
    }
}
