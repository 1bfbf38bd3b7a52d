//! Default values and constants for all configuration settings.

use std::path::PathBuf;
use url::Url;

use super::file::config_directory;
use super::project::ProjectConfig;
use super::settings::*;

/// Default cache purge service.
pub const DEFAULT_PURGE_URL: &str =
    "https://adobeioruntime.net/api/v1/web/helix/helix-services/purge@v1";

/// Default content proxy service.
pub const DEFAULT_CONTENT_PROXY_URL: &str =
    "https://adobeioruntime.net/api/v1/web/helix/helix-services/content-proxy@v2";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = crate::http::DEFAULT_TIMEOUT_SECS;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE: &str = "blogkick.log";

/// Default log file path (~/.blogkick/blogkick.log).
pub fn default_log_path() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE)
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            purge_url: Url::parse(DEFAULT_PURGE_URL).expect("valid default purge URL"),
            content_proxy_url: Url::parse(DEFAULT_CONTENT_PROXY_URL)
                .expect("valid default content proxy URL"),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: default_log_path(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            services: ServiceSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}
