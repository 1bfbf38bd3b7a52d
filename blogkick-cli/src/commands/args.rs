//! Argument types and CLI definitions for the commands.
//!
//! This module contains the clap-derived argument types used for parsing
//! command-line arguments, plus the plain argument structs handlers take.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// The page an action fires on.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Address of the page
    #[arg(long)]
    pub url: String,

    /// Treat the page as the editor view of the source document
    #[arg(long)]
    pub editor: bool,

    /// Rendered HTML of the page, for the document-based actions
    #[arg(long, value_name = "HTML_FILE")]
    pub document: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the configuration in effect
    Show,
}

/// Arguments for `actions`.
#[derive(Debug, Clone)]
pub struct ActionsArgs {
    pub page: PageArgs,
}

/// Arguments for `run`.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub action: String,
    pub page: PageArgs,
}

/// Arguments for `predict`.
#[derive(Debug, Clone)]
pub struct PredictArgs {
    pub path: String,
    pub date: Option<String>,
    pub relative: bool,
}

/// Arguments for `config path`.
#[derive(Debug, Clone)]
pub struct ConfigPathArgs {
    pub path: PathBuf,
}
