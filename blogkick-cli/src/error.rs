//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use blogkick::actions::UnknownAction;
use blogkick::config::ConfigFileError;
use blogkick::environment::LocationError;
use blogkick::http::HttpError;
use blogkick::sidekick::ActionError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// The `--url` argument is not a usable page address
    PageUrl(LocationError),
    /// Failed to read the `--document` file
    DocumentRead {
        path: PathBuf,
        error: std::io::Error,
    },
    /// Failed to create the HTTP client
    HttpClient(HttpError),
    /// No action with the given id
    UnknownAction(UnknownAction),
    /// The action is not offered on the page
    Action(ActionError),
    /// The action ran but did not complete
    ActionFailed(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::UnknownAction(_) | CliError::Action(_) => {
                eprintln!();
                eprintln!("Run 'blogkick actions --url <URL>' to list the actions offered on a page.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'blogkick config path' to locate the configuration file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::PageUrl(e) => write!(f, "{}", e),
            CliError::DocumentRead { path, error } => {
                write!(f, "Failed to read document '{}': {}", path.display(), error)
            }
            CliError::HttpClient(e) => write!(f, "{}", e),
            CliError::UnknownAction(e) => write!(f, "{}", e),
            CliError::Action(e) => write!(f, "{}", e),
            CliError::ActionFailed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::PageUrl(e) => Some(e),
            CliError::DocumentRead { error, .. } => Some(error),
            CliError::HttpClient(e) => Some(e),
            CliError::UnknownAction(e) => Some(e),
            CliError::Action(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<LocationError> for CliError {
    fn from(e: LocationError) -> Self {
        CliError::PageUrl(e)
    }
}

impl From<ActionError> for CliError {
    fn from(e: ActionError) -> Self {
        CliError::Action(e)
    }
}

impl From<UnknownAction> for CliError {
    fn from(e: UnknownAction) -> Self {
        CliError::UnknownAction(e)
    }
}
