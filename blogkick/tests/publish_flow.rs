//! Integration tests for the publish workflow.
//!
//! These tests drive the public API end to end:
//! - Publishing from staging with and without a `/publish/` segment
//! - Purge failures halting before the redirect
//! - Configuration checks that abort before any network call
//! - The action driver refusing to publish drafts

use std::collections::VecDeque;
use std::future::{ready, Future};
use std::sync::Mutex;

use blogkick::actions::ActionId;
use blogkick::config::{ProjectConfig, ServiceSettings};
use blogkick::environment::Location;
use blogkick::gateway::{ClipboardError, Dismissal, HostGateway};
use blogkick::http::{AsyncHttpClient, HttpError, HttpResponse};
use blogkick::publish::{PublishCoordinator, PublishOutcome, PublishState};
use blogkick::sidekick::{ActionError, Sidekick};
use url::Url;

// =============================================================================
// Test Helpers
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Modal { blocking: bool, dismissal: Dismissal },
    Hide,
    Notify(Vec<String>),
    Navigate(String),
}

/// Host that records what actions asked of it.
struct FakeHost {
    config: ProjectConfig,
    location: Location,
    events: Mutex<Vec<Event>>,
}

impl FakeHost {
    fn new(config: ProjectConfig, host: &str, path: &str) -> Self {
        Self {
            config,
            location: Location::new(host, path),
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Navigate(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl HostGateway for FakeHost {
    fn config(&self) -> &ProjectConfig {
        &self.config
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn is_editor(&self) -> bool {
        false
    }

    fn show_modal(&self, _lines: &[String], blocking: bool, dismissal: Dismissal) {
        self.push(Event::Modal {
            blocking,
            dismissal,
        });
    }

    fn hide_modal(&self) {
        self.push(Event::Hide);
    }

    fn notify(&self, lines: &[String], _dismissal: Dismissal) {
        self.push(Event::Notify(lines.to_vec()));
    }

    fn navigate(&self, url: &str) {
        self.push(Event::Navigate(url.to_string()));
    }

    fn open_window(&self, _url: &str, _name: &str) {}

    fn copy_to_clipboard(&self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

/// HTTP client answering POSTs from a script and recording every request.
struct ScriptedHttp {
    posts: Mutex<VecDeque<HttpResponse>>,
    post_urls: Mutex<Vec<String>>,
    gets: Mutex<Vec<String>>,
}

impl ScriptedHttp {
    fn new(responses: &[(u16, &str)]) -> Self {
        Self {
            posts: Mutex::new(
                responses
                    .iter()
                    .map(|(status, body)| HttpResponse::new(*status, body.as_bytes()))
                    .collect(),
            ),
            post_urls: Mutex::new(Vec::new()),
            gets: Mutex::new(Vec::new()),
        }
    }

    fn purged_paths(&self) -> Vec<String> {
        self.post_urls
            .lock()
            .unwrap()
            .iter()
            .map(|u| {
                Url::parse(u)
                    .unwrap()
                    .query_pairs()
                    .find(|(k, _)| k == "path")
                    .map(|(_, v)| v.into_owned())
                    .unwrap()
            })
            .collect()
    }

    fn request_count(&self) -> usize {
        self.post_urls.lock().unwrap().len() + self.gets.lock().unwrap().len()
    }
}

impl AsyncHttpClient for ScriptedHttp {
    fn post(&self, url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        self.post_urls.lock().unwrap().push(url.to_string());
        let next = self
            .posts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HttpError::Request("no scripted response".into()));
        ready(next)
    }

    fn get_uncached(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        self.gets.lock().unwrap().push(url.to_string());
        ready(Ok(HttpResponse::new(200, "<html></html>")))
    }
}

const OK: (u16, &str) = (200, r#"[{"status":"ok"}]"#);

fn project() -> ProjectConfig {
    ProjectConfig {
        owner: "adobe".into(),
        repo: "theblog".into(),
        project: "Blog".into(),
        host: Some("blog.adobe.com".into()),
        inner_host: Some("theblog--adobe.hlx.page".into()),
        outer_host: Some("theblog--adobe.hlx.live".into()),
        ..Default::default()
    }
}

fn purge_endpoint() -> Url {
    ServiceSettings::default().purge_url
}

// =============================================================================
// Publish coordinator
// =============================================================================

#[tokio::test]
async fn test_drafts_path_redirects_unchanged() {
    let host = FakeHost::new(project(), "theblog--adobe.hlx.page", "/drafts/2024/03/15/post");
    let http = ScriptedHttp::new(&[OK, OK]);
    let endpoint = purge_endpoint();

    let outcome = PublishCoordinator::new(&host, &http, &endpoint).run().await;

    assert_eq!(
        outcome,
        PublishOutcome::Published {
            url: "https://blog.adobe.com/drafts/2024/03/15/post".into(),
            purged: vec!["/drafts/2024/03/15/post".into()],
        }
    );
    assert_eq!(
        host.navigations(),
        vec!["https://blog.adobe.com/drafts/2024/03/15/post"]
    );
    assert_eq!(http.purged_paths(), vec!["/drafts/2024/03/15/post"]);
}

#[tokio::test]
async fn test_publish_segment_purges_twice() {
    let host = FakeHost::new(project(), "theblog--adobe.hlx.live", "/en/publish/2020/06/a.html");
    let http = ScriptedHttp::new(&[OK, OK]);
    let endpoint = purge_endpoint();

    PublishCoordinator::new(&host, &http, &endpoint).run().await;

    assert_eq!(
        http.purged_paths(),
        vec!["/en/publish/2020/06/a.html", "/en/2020/06/a.html"]
    );
    assert_eq!(host.navigations(), vec!["https://blog.adobe.com/en/2020/06/a.html"]);
    assert_eq!(http.gets.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_primary_failure_sends_one_purge() {
    let host = FakeHost::new(project(), "theblog--adobe.hlx.page", "/en/publish/2020/a.html");
    let http = ScriptedHttp::new(&[(503, "unavailable"), OK]);
    let endpoint = purge_endpoint();

    let outcome = PublishCoordinator::new(&host, &http, &endpoint).run().await;

    assert!(matches!(
        outcome,
        PublishOutcome::PurgeFailed {
            stage: PublishState::PrimaryPurge,
            ..
        }
    ));
    assert_eq!(http.purged_paths().len(), 1);
    assert!(host.navigations().is_empty());
}

#[tokio::test]
async fn test_partial_success_body_halts_before_redirect() {
    let host = FakeHost::new(project(), "theblog--adobe.hlx.page", "/en/publish/2020/a.html");
    let http = ScriptedHttp::new(&[OK, (200, r#"[{"status":"ok"},{"status":"error"}]"#)]);
    let endpoint = purge_endpoint();

    let outcome = PublishCoordinator::new(&host, &http, &endpoint).run().await;

    assert!(matches!(
        outcome,
        PublishOutcome::PurgeFailed {
            stage: PublishState::SecondaryPurge,
            ..
        }
    ));
    assert!(host.navigations().is_empty());
    assert_eq!(http.gets.lock().unwrap().len(), 0);

    // Overlay hidden before the sticky error modal appears.
    let events = host.events();
    let hide = events.iter().position(|e| *e == Event::Hide).unwrap();
    assert_eq!(
        events[hide + 1],
        Event::Modal {
            blocking: true,
            dismissal: Dismissal::Sticky
        }
    );
}

#[tokio::test]
async fn test_missing_inner_host_aborts_without_network() {
    let mut config = project();
    config.inner_host = None;
    let host = FakeHost::new(config, "blog.adobe.com", "/en/2020/a.html");
    let http = ScriptedHttp::new(&[OK, OK]);
    let endpoint = purge_endpoint();

    let outcome = PublishCoordinator::new(&host, &http, &endpoint).run().await;

    assert_eq!(outcome, PublishOutcome::NotConfigured);
    assert_eq!(http.request_count(), 0);
    assert_eq!(
        host.events(),
        vec![Event::Notify(vec!["Publish is not configured for Blog".into()])]
    );
}

// =============================================================================
// Action driver
// =============================================================================

#[tokio::test]
async fn test_driver_refuses_to_publish_drafts() {
    let host = FakeHost::new(project(), "theblog--adobe.hlx.page", "/drafts/2024/03/15/post");
    let http = ScriptedHttp::new(&[OK]);
    let services = ServiceSettings::default();
    let sidekick = Sidekick::new(&host, &http, &services);

    assert_eq!(
        sidekick.execute(ActionId::Publish).await.unwrap_err(),
        ActionError::Unavailable(ActionId::Publish)
    );
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn test_driver_publishes_from_production_with_scheme_host() {
    let mut config = project();
    config.host = Some("https://blog.adobe.com/".into());
    let host = FakeHost::new(config, "blog.adobe.com", "/en/2020/a.html");
    let http = ScriptedHttp::new(&[OK]);
    let services = ServiceSettings::default();
    let sidekick = Sidekick::new(&host, &http, &services);

    sidekick.execute(ActionId::Publish).await.unwrap();

    assert_eq!(host.navigations(), vec!["https://blog.adobe.com/en/2020/a.html"]);
}
