//! Core traits for the command handler pattern.
//!
//! This module defines the interfaces that handlers depend on, enabling
//! dependency injection and testability. Handlers never depend on concrete
//! implementations directly.

use std::future::Future;

use blogkick::config::ConfigFile;
use blogkick::http::AsyncHttpClient;

use crate::error::CliError;

// ============================================================================
// Output Trait - Abstracts console output
// ============================================================================

/// Trait for outputting messages to the user.
///
/// This abstraction allows handlers to produce output without depending on
/// `println!` directly, making them testable.
pub trait Output: Send + Sync {
    /// Print a line of text.
    fn println(&self, message: &str);

    /// Print an empty line.
    fn newline(&self) {
        self.println("");
    }

    /// Print a section header.
    fn header(&self, title: &str) {
        self.println(title);
        self.println(&"=".repeat(title.len()));
    }

    /// Print an indented line.
    fn indented(&self, message: &str) {
        self.println(&format!("  {}", message));
    }
}

// ============================================================================
// Command Context - Bundles dependencies for handlers
// ============================================================================

/// Context providing dependencies to command handlers.
///
/// In production this carries the console and the reqwest client; in tests
/// it carries mocks.
pub struct CommandContext<'a, C: AsyncHttpClient> {
    /// Output interface for user messages.
    pub output: &'a dyn Output,

    /// Loaded configuration.
    pub config: &'a ConfigFile,

    /// HTTP client for the purge and warm-up requests.
    pub http: &'a C,
}

impl<'a, C: AsyncHttpClient> CommandContext<'a, C> {
    /// Create a new command context.
    pub fn new(output: &'a dyn Output, config: &'a ConfigFile, http: &'a C) -> Self {
        Self {
            output,
            config,
            http,
        }
    }
}

// ============================================================================
// Command Handler Trait
// ============================================================================

/// Trait for command handlers.
///
/// Each subcommand has a handler that implements this trait. Handlers
/// receive their arguments and a context providing dependencies.
pub trait CommandHandler {
    /// The arguments type for this handler.
    type Args;

    /// Execute the command with the given arguments and context.
    fn execute<C: AsyncHttpClient>(
        args: Self::Args,
        ctx: &CommandContext<'_, C>,
    ) -> impl Future<Output = Result<(), CliError>>;
}
