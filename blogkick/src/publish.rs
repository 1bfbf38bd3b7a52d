//! Publish sequence: purge, purge the canonical path, warm the origin,
//! redirect to production.
//!
//! The sequence stops at the first failed purge. A publish whose primary purge
//! succeeded but whose secondary purge failed must not redirect: the operator
//! stays on the page they published from and sees the failure.

use std::fmt;
use tracing::{debug, info, warn};
use url::Url;

use crate::gateway::{Dismissal, HostGateway, StatusOverlay};
use crate::http::AsyncHttpClient;
use crate::purge::{PurgeClient, PurgeResult};

/// Segment marking the staging-only publish view of a path.
pub const PUBLISH_SEGMENT: &str = "/publish/";

/// Steps of the publish sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    ConfigCheck,
    PrimaryPurge,
    PathRewriteCheck,
    SecondaryPurge,
    OriginWarm,
    Redirect,
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Terminal state reached by a publish run.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// Both purges (when needed) succeeded and the page was sent to `url`.
    Published { url: String, purged: Vec<String> },
    /// `host` or `inner_host` is missing; nothing was sent.
    NotConfigured,
    /// The purge at `stage` failed; no redirect happened.
    PurgeFailed {
        stage: PublishState,
        result: PurgeResult,
    },
}

/// The path with its first `/publish/` segment removed, if it has one.
pub fn canonical_path(path: &str) -> Option<String> {
    path.contains(PUBLISH_SEGMENT)
        .then(|| path.replacen(PUBLISH_SEGMENT, "/", 1))
}

/// Runs the publish sequence for the page the gateway reports.
pub struct PublishCoordinator<'a, C: AsyncHttpClient> {
    gateway: &'a dyn HostGateway,
    http: &'a C,
    purge_endpoint: &'a Url,
}

impl<'a, C: AsyncHttpClient> PublishCoordinator<'a, C> {
    pub fn new(gateway: &'a dyn HostGateway, http: &'a C, purge_endpoint: &'a Url) -> Self {
        Self {
            gateway,
            http,
            purge_endpoint,
        }
    }

    pub async fn run(&self) -> PublishOutcome {
        let config = self.gateway.config().normalized();

        debug!(state = %PublishState::ConfigCheck, "Publish step");
        let host = match (&config.host, &config.inner_host) {
            (Some(host), Some(_)) => host.clone(),
            _ => {
                warn!(project = %config.project, "Publish is not configured");
                self.gateway.notify(
                    &[format!("Publish is not configured for {}", config.project)],
                    Dismissal::Sticky,
                );
                return PublishOutcome::NotConfigured;
            }
        };

        let overlay = StatusOverlay::acquire(self.gateway, "Publishing...");
        let purge = PurgeClient::new(self.http, self.purge_endpoint);
        let mut path = self.gateway.location().pathname.clone();
        let mut purged = Vec::new();

        debug!(state = %PublishState::PrimaryPurge, path = %path, "Publish step");
        let result = purge.send_purge(&config, &path).await;
        if !result.ok {
            return self.fail(overlay, PublishState::PrimaryPurge, result);
        }
        purged.push(path.clone());

        debug!(state = %PublishState::PathRewriteCheck, path = %path, "Publish step");
        if let Some(canonical) = canonical_path(&path) {
            debug!(state = %PublishState::SecondaryPurge, path = %canonical, "Publish step");
            let result = purge.send_purge(&config, &canonical).await;
            if !result.ok {
                return self.fail(overlay, PublishState::SecondaryPurge, result);
            }
            purged.push(canonical.clone());
            path = canonical;
        }

        let url = format!("https://{}{}", host, path);

        debug!(state = %PublishState::OriginWarm, url = %url, "Publish step");
        match self.http.get_uncached(&url).await {
            Ok(response) => debug!(url = %url, status = response.status, "Origin warmed"),
            Err(e) => debug!(url = %url, error = %e, "Origin warm-up failed, ignoring"),
        }

        info!(state = %PublishState::Redirect, url = %url, "Redirecting to production");
        overlay.release();
        self.gateway.navigate(&url);

        PublishOutcome::Published { url, purged }
    }

    fn fail(
        &self,
        overlay: StatusOverlay<'_>,
        stage: PublishState,
        result: PurgeResult,
    ) -> PublishOutcome {
        warn!(
            stage = %stage,
            path = %result.path,
            status = result.status,
            "Purge failed, publish aborted"
        );
        overlay.release();
        self.gateway.show_modal(
            &[
                format!(
                    "Failed to purge {} from the cache. Please reload this page and try again later.",
                    result.path
                ),
                format!("Status: {}", result.status),
                result.body.to_string(),
            ],
            true,
            Dismissal::Sticky,
        );
        PublishOutcome::PurgeFailed { stage, result }
    }
}
