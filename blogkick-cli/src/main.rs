//! blogkick CLI - Command-line host for the sidekick actions
//!
//! Runs the blog's sidekick actions against a page address from the
//! terminal: list what a page offers, run an action, predict a draft's
//! public URL and inspect the configuration.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{ConfigCommands, PageArgs};
use error::CliError;

#[derive(Parser)]
#[command(name = "blogkick")]
#[command(version = blogkick::VERSION)]
#[command(about = "Sidekick actions for a Helix-hosted blog", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.blogkick/config.ini)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the actions offered on a page
    Actions {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Run an action on a page
    Run {
        /// Action id (tagger, preview, predicted-url, card-preview, article-data, publish)
        action: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Predict the public URL of a draft
    Predict {
        /// Draft path, e.g. /en/drafts/my-post.docx
        #[arg(long)]
        path: String,

        /// Raw publication date, e.g. 06-23-2020
        #[arg(long)]
        date: Option<String>,

        /// Print a host-relative URL
        #[arg(long)]
        relative: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Actions { page } => commands::run_actions(page, config_path, cli.debug).await,
        Commands::Run { action, page } => {
            commands::run_action(action, page, config_path, cli.debug).await
        }
        Commands::Predict {
            path,
            date,
            relative,
        } => commands::run_predict(path, date, relative, config_path).await,
        Commands::Config(command) => commands::run_config(command, config_path).await,
    }
}
