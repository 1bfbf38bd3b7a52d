//! CLI runner for common setup and operations.
//!
//! Encapsulates configuration loading, logging initialization and HTTP
//! client creation shared by the page commands.

use std::path::{Path, PathBuf};
use tracing::info;

use blogkick::config::{config_file_path, ConfigFile, DEFAULT_LOG_FILE};
use blogkick::http::ReqwestClient;
use blogkick::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load the configuration and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file; the default location otherwise
    /// * `debug_mode` - When true, enables debug-level logging unless RUST_LOG is set
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        let config = load_config(config_path)?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let logging_guard = init_logging(&log_dir, &log_file, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("blogkick v{}", blogkick::VERSION);
        info!(project = %self.config.project.project, "blogkick CLI: {} command", command);
    }

    /// HTTP client honoring the configured timeout.
    pub fn http_client(&self) -> Result<ReqwestClient, CliError> {
        ReqwestClient::with_timeout(self.config.services.timeout).map_err(CliError::HttpClient)
    }
}

/// The config file in effect: `--config` when given, the default otherwise.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Load the config file in effect.
pub fn load_config(config_path: Option<&Path>) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(&resolve_config_path(config_path))?)
}
