//! Cache purge requests against the purge service.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::config::ProjectConfig;
use crate::http::AsyncHttpClient;

/// Outcome of one purge request.
///
/// `ok` holds only when the transport succeeded, the status was 2xx and every
/// entry of the JSON array body reported `"status": "ok"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeResult {
    pub ok: bool,
    /// HTTP status, or 0 when no response was received
    pub status: u16,
    /// Parsed response body; raw text or the transport error as a JSON string
    /// when the body is not JSON
    pub body: Value,
    pub path: String,
}

impl PurgeResult {
    fn transport_failure(path: &str, error: impl ToString) -> Self {
        Self {
            ok: false,
            status: 0,
            body: Value::String(error.to_string()),
            path: path.to_string(),
        }
    }
}

/// Issues purge requests for one project through a borrowed HTTP client.
pub struct PurgeClient<'a, C: AsyncHttpClient> {
    http: &'a C,
    endpoint: &'a Url,
}

impl<'a, C: AsyncHttpClient> PurgeClient<'a, C> {
    pub fn new(http: &'a C, endpoint: &'a Url) -> Self {
        Self { http, endpoint }
    }

    /// Build the purge request URL for `path`.
    ///
    /// The forwarded hosts are the production and outer staging hosts joined
    /// by a comma; a missing host leaves its slot empty.
    pub fn request_url(&self, config: &ProjectConfig, path: &str) -> Url {
        let forwarded = [config.host.as_deref(), config.outer_host.as_deref()]
            .map(Option::unwrap_or_default)
            .join(",");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("host", config.inner_host.as_deref().unwrap_or_default())
            .append_pair("xfh", &forwarded)
            .append_pair("path", path);
        url
    }

    /// Send exactly one purge request for `path`. Never retries.
    pub async fn send_purge(&self, config: &ProjectConfig, path: &str) -> PurgeResult {
        let url = self.request_url(config, path);
        info!(path = path, url = %url, "Purging path");

        let response = match self.http.post(url.as_str()).await {
            Ok(response) => response,
            Err(e) => {
                warn!(path = path, error = %e, "Purge request failed");
                return PurgeResult::transport_failure(path, e);
            }
        };

        let text = response.text();
        info!(path = path, status = response.status, body = %text, "Purge response");

        let (body, entries_ok) = match serde_json::from_str::<Value>(&text) {
            Ok(json) => {
                let entries_ok = all_entries_ok(&json);
                (json, entries_ok)
            }
            Err(_) => (Value::String(text), false),
        };

        PurgeResult {
            ok: response.is_success() && entries_ok,
            status: response.status,
            body,
            path: path.to_string(),
        }
    }
}

/// True when the body is an array whose every entry has `status == "ok"`.
fn all_entries_ok(body: &Value) -> bool {
    body.as_array().is_some_and(|entries| {
        entries
            .iter()
            .all(|entry| entry.get("status").and_then(Value::as_str) == Some("ok"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockHttpClient;
    use crate::http::HttpError;

    fn config() -> ProjectConfig {
        ProjectConfig {
            host: Some("blog.adobe.com".into()),
            inner_host: Some("theblog--adobe.hlx.page".into()),
            outer_host: Some("theblog--adobe.hlx.live".into()),
            ..Default::default()
        }
    }

    fn endpoint() -> Url {
        Url::parse("https://purge.test/purge@v1").unwrap()
    }

    #[test]
    fn test_request_url_parameters() {
        let http = MockHttpClient::new(Vec::new());
        let endpoint = endpoint();
        let client = PurgeClient::new(&http, &endpoint);

        let url = client.request_url(&config(), "/en/publish/2020/a.html");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            pairs,
            vec![
                ("host".into(), "theblog--adobe.hlx.page".into()),
                ("xfh".into(), "blog.adobe.com,theblog--adobe.hlx.live".into()),
                ("path".into(), "/en/publish/2020/a.html".into()),
            ]
        );
        assert!(url.as_str().starts_with("https://purge.test/purge@v1?"));
    }

    #[test]
    fn test_request_url_missing_outer_host() {
        let http = MockHttpClient::new(Vec::new());
        let endpoint = endpoint();
        let client = PurgeClient::new(&http, &endpoint);
        let mut config = config();
        config.outer_host = None;

        let url = client.request_url(&config, "/a");
        let xfh = url
            .query_pairs()
            .find(|(k, _)| k == "xfh")
            .map(|(_, v)| v.into_owned());

        assert_eq!(xfh.as_deref(), Some("blog.adobe.com,"));
    }

    #[tokio::test]
    async fn test_all_ok_entries_succeed() {
        let http = MockHttpClient::new(vec![MockHttpClient::json(
            200,
            r#"[{"status":"ok"},{"status":"ok"}]"#,
        )]);
        let endpoint = endpoint();
        let result = PurgeClient::new(&http, &endpoint)
            .send_purge(&config(), "/a")
            .await;

        assert!(result.ok);
        assert_eq!(result.status, 200);
        assert_eq!(result.path, "/a");
        assert_eq!(http.post_urls().len(), 1);
    }

    #[tokio::test]
    async fn test_one_failed_entry_fails_whole_purge() {
        let http = MockHttpClient::new(vec![MockHttpClient::json(
            200,
            r#"[{"status":"ok"},{"status":"error"}]"#,
        )]);
        let endpoint = endpoint();
        let result = PurgeClient::new(&http, &endpoint)
            .send_purge(&config(), "/a")
            .await;

        assert!(!result.ok);
        assert_eq!(result.status, 200);
        assert_eq!(result.body[1]["status"], "error");
    }

    #[tokio::test]
    async fn test_http_error_status_fails() {
        let http = MockHttpClient::new(vec![MockHttpClient::json(503, r#"[{"status":"ok"}]"#)]);
        let endpoint = endpoint();
        let result = PurgeClient::new(&http, &endpoint)
            .send_purge(&config(), "/a")
            .await;

        assert!(!result.ok);
        assert_eq!(result.status, 503);
    }

    #[tokio::test]
    async fn test_non_json_body_fails_and_keeps_text() {
        let http = MockHttpClient::new(vec![MockHttpClient::json(200, "<html>oops</html>")]);
        let endpoint = endpoint();
        let result = PurgeClient::new(&http, &endpoint)
            .send_purge(&config(), "/a")
            .await;

        assert!(!result.ok);
        assert_eq!(result.body, Value::String("<html>oops</html>".into()));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let http = MockHttpClient::new(vec![Err(HttpError::Request("connection refused".into()))]);
        let endpoint = endpoint();
        let result = PurgeClient::new(&http, &endpoint)
            .send_purge(&config(), "/a")
            .await;

        assert!(!result.ok);
        assert_eq!(result.status, 0);
        assert_eq!(
            result.body,
            Value::String("Request failed: connection refused".into())
        );
        assert_eq!(http.post_urls().len(), 1);
    }

    #[test]
    fn test_empty_array_counts_as_ok() {
        assert!(all_entries_ok(&serde_json::json!([])));
        assert!(!all_entries_ok(&serde_json::json!({"status": "ok"})));
        assert!(!all_entries_ok(&serde_json::json!([{}])));
    }
}
