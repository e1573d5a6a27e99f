//! Observational logging.
//!
//! The tree walker only reports when it starts and when it finishes. Hosts
//! choose where those messages go by passing a [`Logger`].

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use owo_colors::OwoColorize;

/// A sink for progress messages.
///
/// Loggers never influence the work they observe.
pub trait Logger {
    /// Record one message.
    fn log(&self, message: &str);
}

/// Writes messages to stderr, prefixed with the elapsed time since the
/// logger was created.
#[derive(Debug)]
pub struct ConsoleLogger {
    started: Instant,
}

impl ConsoleLogger {
    /// Create a logger whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        let elapsed = self.started.elapsed().as_millis();
        eprintln!("{} {message}", format!("[Strata {elapsed}ms]").cyan());
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _message: &str) {}
}

/// Keeps messages in memory, in the order they were logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: Mutex<Vec<String>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every message logged so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
