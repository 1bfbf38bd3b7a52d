//! Preview toggle between the editor, staging and production.

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::config::ProjectConfig;
use crate::environment::{Environment, Location};
use crate::gateway::{Dismissal, HostGateway, StatusOverlay};

/// Where the preview toggle sends the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget {
    /// Open a new named window (editor → staging lookup).
    OpenWindow { url: String, name: String },
    /// Navigate the current page.
    Navigate(String),
    /// Tell the operator why nothing happens.
    Notice {
        lines: Vec<String>,
        dismissal: Dismissal,
    },
}

/// Rewrite a production path to its staging publish view.
///
/// The last four-digit segment (a year) gains a `/publish` prefix:
/// `/en/2020/06/a.html` becomes `/en/publish/2020/06/a.html`.
pub fn staging_path(path: &str) -> String {
    year_pattern()
        .replace(path, "/${1}/publish/${2}")
        .into_owned()
}

/// Strip the first `/publish` from a staging path.
pub fn production_path(path: &str) -> String {
    path.replacen("/publish", "", 1)
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/(.*)/(\d{4})").unwrap())
}

/// Content-proxy lookup URL resolving an editor document to its staging page.
pub fn content_proxy_url(endpoint: &Url, config: &ProjectConfig, href: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("owner", &config.owner)
        .append_pair("repo", &config.repo)
        .append_pair("ref", config.git_ref_or_default())
        .append_pair("path", "/")
        .append_pair("lookup", href);
    url
}

/// Decide the preview target for the given environment.
///
/// `config` is expected to be normalized.
pub fn resolve_preview(
    config: &ProjectConfig,
    location: &Location,
    environment: Environment,
    content_proxy: &Url,
) -> PreviewTarget {
    let Some(inner_host) = config.inner_host.as_deref() else {
        return notice(
            vec![format!("Preview is not configured for {}", config.project)],
            Dismissal::Sticky,
        );
    };

    match environment {
        Environment::Editor => PreviewTarget::OpenWindow {
            url: content_proxy_url(content_proxy, config, &location.href).to_string(),
            name: format!(
                "hlx-sidekick-{}--{}--{}",
                config.git_ref_or_default(),
                config.repo,
                config.owner
            ),
        },
        Environment::InnerStaging | Environment::OuterStaging => match config.host.as_deref() {
            Some(host) => PreviewTarget::Navigate(format!(
                "https://{}{}",
                host,
                production_path(&location.pathname)
            )),
            None => notice(
                vec![format!("Production host for {} is unknown", config.project)],
                Dismissal::Auto,
            ),
        },
        Environment::Production => PreviewTarget::Navigate(format!(
            "https://{}{}",
            inner_host,
            staging_path(&location.pathname)
        )),
        Environment::Unknown => {
            let production = config
                .host
                .as_deref()
                .map(|host| format!(" or https://{}/", host))
                .unwrap_or_default();
            notice(
                vec![
                    format!("Preview can be used for {} here:", config.project),
                    "Online Word documents".to_string(),
                    format!("Articles on https://{}/{}", inner_host, production),
                ],
                Dismissal::After(Duration::from_secs(2)),
            )
        }
    }
}

fn notice(lines: Vec<String>, dismissal: Dismissal) -> PreviewTarget {
    PreviewTarget::Notice { lines, dismissal }
}

/// Resolve the preview target for the gateway's page and act on it.
pub fn run_preview(gateway: &dyn HostGateway, content_proxy: &Url) -> PreviewTarget {
    let config = gateway.config().normalized();
    let location = gateway.location();
    let environment = Environment::classify(&config, location, gateway.is_editor());
    let target = resolve_preview(&config, location, environment, content_proxy);

    match &target {
        PreviewTarget::OpenWindow { url, name } => {
            info!(url = %url, window = %name, "Opening staging lookup");
            gateway.open_window(url, name);
        }
        PreviewTarget::Navigate(url) => {
            info!(from = %environment, url = %url, "Switching preview");
            let overlay = StatusOverlay::acquire(gateway, "Please wait...");
            gateway.navigate(url);
            overlay.release();
        }
        PreviewTarget::Notice { lines, dismissal } => gateway.notify(lines, *dismissal),
    }

    target
}
