//! Project configuration as supplied by the host.

use serde::Serialize;
use url::Url;

/// Ref used by the content proxy when the project does not name one.
pub const DEFAULT_REF: &str = "master";

/// Identity and delivery hosts of one blog project.
///
/// `host` is the production host, `inner_host` the content-proxy staging tier
/// and `outer_host` the rendering staging tier. Publishing and previewing both
/// need `inner_host`; publishing additionally needs `host`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    pub owner: String,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub project: String,
    pub host: Option<String>,
    pub inner_host: Option<String>,
    pub outer_host: Option<String>,
}

impl ProjectConfig {
    /// Returns a copy whose production host is a bare host name.
    pub fn normalized(&self) -> Self {
        Self {
            host: self.host.as_deref().map(normalize_host),
            ..self.clone()
        }
    }

    /// The configured ref, or [`DEFAULT_REF`].
    pub fn git_ref_or_default(&self) -> &str {
        self.git_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REF)
    }
}

/// Strips a scheme (and any path) from a host given as a URL.
///
/// Values not starting with `http` are returned unchanged, so the function is
/// idempotent. A value that starts with `http` but does not parse as a URL is
/// also left as is.
pub fn normalize_host(host: &str) -> String {
    if !host.starts_with("http") {
        return host.to_string();
    }
    match Url::parse(host) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(name), Some(port)) => format!("{}:{}", name, port),
            (Some(name), None) => name.to_string(),
            (None, _) => host.to_string(),
        },
        Err(_) => host.to_string(),
    }
}
