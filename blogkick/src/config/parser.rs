//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use url::Url;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [project] section
    if let Some(section) = ini.section(Some("project")) {
        if let Some(v) = non_empty(section.get("owner")) {
            config.project.owner = v;
        }
        if let Some(v) = non_empty(section.get("repo")) {
            config.project.repo = v;
        }
        if let Some(v) = non_empty(section.get("project")) {
            config.project.project = v;
        }
        config.project.git_ref = non_empty(section.get("ref"));
        config.project.host = non_empty(section.get("host"));
        config.project.inner_host = non_empty(section.get("inner_host"));
        config.project.outer_host = non_empty(section.get("outer_host"));
    }

    // [services] section
    if let Some(section) = ini.section(Some("services")) {
        if let Some(v) = section.get("purge_url") {
            config.services.purge_url = parse_url("purge_url", v)?;
        }
        if let Some(v) = section.get("content_proxy_url") {
            config.services.content_proxy_url = parse_url("content_proxy_url", v)?;
        }
        if let Some(v) = section.get("timeout") {
            config.services.timeout = v
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "services".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(&v);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigFileError> {
    Url::parse(value.trim()).map_err(|e| ConfigFileError::InvalidValue {
        section: "services".to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: format!("not a valid URL ({})", e),
    })
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
