//! Configuration for blogkick.
//!
//! - [`ProjectConfig`]: the project identity and delivery hosts the actions
//!   resolve environments against
//! - [`ConfigFile`]: the on-disk `~/.blogkick/config.ini` holding the project,
//!   the service endpoints and logging settings

mod defaults;
mod file;
mod parser;
mod project;
mod settings;
mod writer;

pub use defaults::{
    default_log_path, DEFAULT_CONTENT_PROXY_URL, DEFAULT_LOG_FILE, DEFAULT_PURGE_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use project::{normalize_host, ProjectConfig, DEFAULT_REF};
pub use settings::{ConfigFile, LoggingSettings, ServiceSettings};
