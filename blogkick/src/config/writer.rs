//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let project = &config.project;
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();

    format!(
        r#"[project]
; Source repository of the blog content
owner = {}
repo = {}
; Branch the content proxy resolves documents against (default: master)
ref = {}
; Display name used in notifications
project = {}
; Production host, e.g. blog.example.com
host = {}
; Staging hosts: content-proxy tier and rendering tier
inner_host = {}
outer_host = {}

[services]
purge_url = {}
content_proxy_url = {}
; HTTP timeout in seconds
timeout = {}

[logging]
file = {}
"#,
        project.owner,
        project.repo,
        opt(&project.git_ref),
        project.project,
        opt(&project.host),
        opt(&project.inner_host),
        opt(&project.outer_host),
        config.services.purge_url,
        config.services.content_proxy_url,
        config.services.timeout,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
