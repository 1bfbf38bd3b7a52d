//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;
use url::Url;

use super::project::ProjectConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// The `[project]` section
    pub project: ProjectConfig,
    /// Remote service endpoints
    pub services: ServiceSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Remote services the actions talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Cache purge service
    pub purge_url: Url,
    /// Content proxy used to resolve an editor document to its staging page
    pub content_proxy_url: Url,
    /// HTTP timeout in seconds
    pub timeout: u64,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
