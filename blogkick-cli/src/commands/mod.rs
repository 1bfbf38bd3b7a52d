//! CLI command implementations.
//!
//! This module implements the Command Pattern with trait-based dependency
//! injection:
//!
//! - `traits`: Core interfaces (`Output`, `CommandHandler`, `CommandContext`)
//! - `services`: Console implementation of `Output`
//! - `gateway`: Terminal host the sidekick actions run against
//! - `args`: CLI argument types (clap-derived)
//! - `handlers`: Command handlers
//!
//! # Example
//!
//! ```ignore
//! let output = ConsoleOutput::new();
//! let ctx = CommandContext::new(&output, &config, &http);
//! RunHandler::execute(args, &ctx).await?;
//!
//! // Test usage
//! let output = MockOutput::new();
//! let ctx = CommandContext::new(&output, &config, &MockHttpClient::ok());
//! RunHandler::execute(args, &ctx).await?;
//! assert!(output.contains("Navigate to:"));
//! ```

mod args;
mod gateway;
mod handlers;
mod services;
mod traits;


pub use args::{ConfigCommands, PageArgs};

use std::path::Path;

use blogkick::config::ConfigFile;
use blogkick::http::ReqwestClient;

use args::{ActionsArgs, ConfigPathArgs, PredictArgs, RunArgs};
use handlers::{ActionsHandler, ConfigPathHandler, ConfigShowHandler, PredictHandler, RunHandler};
use services::ConsoleOutput;
use traits::{CommandContext, CommandHandler};

use crate::error::CliError;
use crate::runner::{load_config, resolve_config_path, CliRunner};

/// Run `actions`: list what the page offers.
pub async fn run_actions(
    page: PageArgs,
    config_path: Option<&Path>,
    debug: bool,
) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("actions");
    let http = runner.http_client()?;
    let output = ConsoleOutput::new();
    let ctx = CommandContext::new(&output, runner.config(), &http);

    ActionsHandler::execute(ActionsArgs { page }, &ctx).await
}

/// Run `run`: execute one action on the page.
pub async fn run_action(
    action: String,
    page: PageArgs,
    config_path: Option<&Path>,
    debug: bool,
) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("run");
    let http = runner.http_client()?;
    let output = ConsoleOutput::new();
    let ctx = CommandContext::new(&output, runner.config(), &http);

    RunHandler::execute(RunArgs { action, page }, &ctx).await
}

/// Run `predict`: print the predicted public URL.
pub async fn run_predict(
    path: String,
    date: Option<String>,
    relative: bool,
    config_path: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let http = ReqwestClient::with_timeout(config.services.timeout).map_err(CliError::HttpClient)?;
    let output = ConsoleOutput::new();
    let ctx = CommandContext::new(&output, &config, &http);

    PredictHandler::execute(
        PredictArgs {
            path,
            date,
            relative,
        },
        &ctx,
    )
    .await
}

/// Run a config subcommand.
///
/// `config path` works even when the file in effect does not parse.
pub async fn run_config(command: ConfigCommands, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = match command {
        ConfigCommands::Path => ConfigFile::default(),
        ConfigCommands::Show => load_config(config_path)?,
    };
    let http = ReqwestClient::with_timeout(config.services.timeout).map_err(CliError::HttpClient)?;
    let output = ConsoleOutput::new();
    let ctx = CommandContext::new(&output, &config, &http);

    match command {
        ConfigCommands::Path => {
            let path = resolve_config_path(config_path);
            ConfigPathHandler::execute(ConfigPathArgs { path }, &ctx).await
        }
        ConfigCommands::Show => ConfigShowHandler::execute((), &ctx).await,
    }
}
