//! User-facing output for component operations.
//!
//! Helpers report progress through an [`Output`] handed to them at
//! construction time instead of printing directly. The CLI uses
//! [`ConsoleOutput`]; tests use [`RecordingOutput`] to assert on the exact
//! messages a helper produced.

use colored::Colorize;
use std::sync::Mutex;

/// Sink for status messages produced by helpers.
pub trait Output: Send + Sync {
    /// Report a completed step.
    fn ok(&self, message: &str);

    /// Report something informational, e.g. what pretend mode would do.
    fn info(&self, message: &str);

    /// Report a non-fatal problem.
    fn warn(&self, message: &str);
}

/// Writes colored status lines to the terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleOutput {
    quiet: bool,
}

impl ConsoleOutput {
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self {
            quiet,
        }
    }
}

impl Output for ConsoleOutput {
    fn ok(&self, message: &str) {
        tracing::debug!(target: "output", "ok: {}", message);
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    fn info(&self, message: &str) {
        tracing::debug!(target: "output", "info: {}", message);
        if !self.quiet {
            println!("{} {}", "·".cyan(), message);
        }
    }

    fn warn(&self, message: &str) {
        tracing::debug!(target: "output", "warn: {}", message);
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}

/// Message level recorded by [`RecordingOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Info,
    Warn,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded message texts in order.
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, message)| message).collect()
    }

    /// All recorded messages with their level.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.messages.lock().map(|messages| messages.clone()).unwrap_or_default()
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl Output for RecordingOutput {
    fn ok(&self, message: &str) {
        self.record(Level::Ok, message);
    }

    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_output_keeps_order_and_level() {
        let output = RecordingOutput::new();
        output.ok("first");
        output.info("second");
        output.warn("third");

        assert_eq!(output.messages(), vec!["first", "second", "third"]);
        assert_eq!(output.entries()[1], (Level::Info, "second".to_string()));
    }
}
