//! Deployment environment resolution.
//!
//! Every action starts by classifying the page it was fired on. The result
//! decides which actions are offered at all and where the preview toggle
//! sends the operator.

use std::fmt;
use thiserror::Error;
use url::Url;

use crate::config::ProjectConfig;

/// Errors raised while reading the current page address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Invalid page URL '{url}': {reason}")]
    Invalid { url: String, reason: String },
    #[error("Page URL '{0}' has no host")]
    MissingHost(String),
}

/// Snapshot of the current page address at the moment an action fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Host name, with the port when it is not the scheme default
    pub host: String,
    /// Path component, always starting with `/`
    pub pathname: String,
    /// The full address
    pub href: String,
}

impl Location {
    pub fn new(host: impl Into<String>, pathname: impl Into<String>) -> Self {
        let host = host.into();
        let pathname = pathname.into();
        let href = format!("https://{}{}", host, pathname);
        Self {
            host,
            pathname,
            href,
        }
    }

    /// Parse a page URL into a location snapshot.
    pub fn parse(url: &str) -> Result<Self, LocationError> {
        let parsed = Url::parse(url).map_err(|e| LocationError::Invalid {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let name = parsed
            .host_str()
            .ok_or_else(|| LocationError::MissingHost(url.to_string()))?;
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", name, port),
            None => name.to_string(),
        };

        Ok(Self {
            host,
            pathname: parsed.path().to_string(),
            href: parsed.to_string(),
        })
    }
}

/// The deployment tier the current page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Authoring surface of the source document
    Editor,
    /// Content-proxy staging tier (`inner_host`)
    InnerStaging,
    /// Rendering staging tier (`outer_host`)
    OuterStaging,
    /// Production (`host`)
    Production,
    /// None of the configured hosts
    Unknown,
}

impl Environment {
    /// Classify a location against the project configuration.
    ///
    /// First match wins: the editor flag, then the inner and outer staging
    /// hosts, then the production host. The production host is compared in
    /// its normalized form, so a config holding `https://example.com` still
    /// matches a page on `example.com`.
    pub fn classify(config: &ProjectConfig, location: &Location, is_editor: bool) -> Self {
        if is_editor {
            return Self::Editor;
        }

        let config = config.normalized();
        let on = |host: &Option<String>| host.as_deref() == Some(location.host.as_str());

        if on(&config.inner_host) {
            Self::InnerStaging
        } else if on(&config.outer_host) {
            Self::OuterStaging
        } else if on(&config.host) {
            Self::Production
        } else {
            Self::Unknown
        }
    }

    pub fn is_editor(self) -> bool {
        self == Self::Editor
    }

    pub fn is_staging(self) -> bool {
        matches!(self, Self::InnerStaging | Self::OuterStaging)
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// True on any configured delivery host, staging or production.
    pub fn is_helix(self) -> bool {
        self.is_staging() || self.is_production()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Editor => "editor",
            Self::InnerStaging => "inner staging",
            Self::OuterStaging => "outer staging",
            Self::Production => "production",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProjectConfig {
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

    #[test]
    fn test_location_parse() {
        let location = Location::parse("https://blog.adobe.com/en/2020/post.html?x=1").unwrap();
        assert_eq!(location.host, "blog.adobe.com");
        assert_eq!(location.pathname, "/en/2020/post.html");
        assert_eq!(location.href, "https://blog.adobe.com/en/2020/post.html?x=1");
    }

    #[test]
    fn test_location_parse_keeps_port() {
        let location = Location::parse("http://localhost:3000/a").unwrap();
        assert_eq!(location.host, "localhost:3000");
    }

    #[test]
    fn test_location_parse_rejects_garbage() {
        assert!(matches!(
            Location::parse("not a url"),
            Err(LocationError::Invalid { .. })
        ));
        assert!(matches!(
            Location::parse("mailto:someone@example.com"),
            Err(LocationError::MissingHost(_))
        ));
    }

    #[test]
    fn test_classify_each_host() {
        let config = config();
        let at = |host: &str| Environment::classify(&config, &Location::new(host, "/"), false);

        assert_eq!(at("theblog--adobe.hlx.page"), Environment::InnerStaging);
        assert_eq!(at("theblog--adobe.hlx.live"), Environment::OuterStaging);
        assert_eq!(at("blog.adobe.com"), Environment::Production);
        assert_eq!(at("elsewhere.example"), Environment::Unknown);
    }

    #[test]
    fn test_editor_flag_wins() {
        let location = Location::new("blog.adobe.com", "/");
        assert_eq!(
            Environment::classify(&config(), &location, true),
            Environment::Editor
        );
    }

    #[test]
    fn test_overlapping_hosts_first_match_wins() {
        let mut config = config();
        config.outer_host = config.inner_host.clone();
        config.host = config.inner_host.clone();
        let location = Location::new("theblog--adobe.hlx.page", "/");

        assert_eq!(
            Environment::classify(&config, &location, false),
            Environment::InnerStaging
        );
    }

    #[test]
    fn test_production_host_with_scheme_matches() {
        let mut config = config();
        config.host = Some("http://blog.adobe.com".into());
        let location = Location::new("blog.adobe.com", "/");

        assert_eq!(
            Environment::classify(&config, &location, false),
            Environment::Production
        );
    }

    #[test]
    fn test_unconfigured_project_is_unknown() {
        let location = Location::new("blog.adobe.com", "/");
        assert_eq!(
            Environment::classify(&ProjectConfig::default(), &location, false),
            Environment::Unknown
        );
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let all = [
            Environment::Editor,
            Environment::InnerStaging,
            Environment::OuterStaging,
            Environment::Production,
            Environment::Unknown,
        ];
        for env in all {
            let flags = [env.is_editor(), env.is_staging(), env.is_production()];
            let set = flags.iter().filter(|f| **f).count();
            let expected = usize::from(env != Environment::Unknown);
            assert_eq!(set, expected, "{} has {} predicates set", env, set);
        }
    }
}
