//! Article metadata extraction from the rendered page.
//!
//! Metadata is read fresh on every request; nothing is cached between calls.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::predict::predict_url;

/// Maximum teaser length, counted in Unicode scalar values.
///
/// A character outside the Basic Multilingual Plane (most emoji) counts once
/// here, where a UTF-16 code-unit count would see two.
pub const TEASER_LENGTH: usize = 75;

/// Marker preceding the hero image name in the `og:image` URL.
const HERO_MARKER: &str = "/hlx_";

/// Errors raised when a required field is absent from the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Missing og:image meta tag")]
    MissingHeroImage,
    #[error("og:image '{0}' does not reference a /hlx_ image")]
    MalformedHeroImage(String),
    #[error("Missing publication date")]
    MissingDate,
    #[error("Unrecognized publication date '{0}'")]
    InvalidDate(String),
    #[error("Missing teaser block")]
    MissingTeaser,
}

/// Read-only view of the rendered article page.
pub trait DocumentView: Send + Sync {
    fn author(&self) -> Option<String>;

    /// Publication date as written on the page.
    fn raw_date(&self) -> Option<String>;

    /// Topics, in page order.
    fn topics(&self) -> Vec<String>;

    /// True when the page is a blog post.
    fn is_post(&self) -> bool;

    /// Content of `<meta property="...">`.
    fn meta_property(&self, property: &str) -> Option<String>;

    /// Trimmed text of the fifth `div` directly under `main`.
    fn teaser_block(&self) -> Option<String>;

    fn title(&self) -> String;
}

/// Structured article fields for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleMetadata {
    pub author: String,
    /// Publication date in epoch seconds
    pub date: i64,
    pub hero: String,
    /// Predicted host-relative URL
    pub path: String,
    pub teaser: String,
    pub title: String,
    pub topics: Vec<String>,
}

impl ArticleMetadata {
    /// Tab-separated export row.
    ///
    /// Columns: author, date, hero, path, two fixed placeholders (`[]`, `0`),
    /// teaser, title and the topics as a JSON-style list.
    pub fn to_row(&self) -> String {
        let date = self.date.to_string();
        let topics = format!("[\"{}\"]", self.topics.join("\", \""));
        [
            self.author.as_str(),
            date.as_str(),
            self.hero.as_str(),
            self.path.as_str(),
            "[]",
            "0",
            self.teaser.as_str(),
            self.title.as_str(),
            topics.as_str(),
        ]
        .join("\t")
    }
}

/// Payload rendered by the card preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub author: String,
    pub date: i64,
    pub hero: String,
    /// Page path without its leading slash
    pub path: String,
    pub teaser: String,
    pub title: String,
    pub topics: Vec<String>,
}

/// Extract article metadata for the page at `pathname`.
pub fn extract_article(
    doc: &dyn DocumentView,
    pathname: &str,
) -> Result<ArticleMetadata, ExtractionError> {
    let raw_date = doc.raw_date().ok_or(ExtractionError::MissingDate)?;
    let date = parse_epoch_seconds(&raw_date)
        .ok_or_else(|| ExtractionError::InvalidDate(raw_date.clone()))?;
    let hero = hero_path(doc)?;
    let teaser = doc.teaser_block().ok_or(ExtractionError::MissingTeaser)?;

    Ok(ArticleMetadata {
        author: doc.author().unwrap_or_default(),
        date,
        hero,
        path: predict_url(None, pathname, Some(&raw_date)),
        teaser: teaser.chars().take(TEASER_LENGTH).collect(),
        title: doc.title(),
        topics: doc.topics(),
    })
}

/// Card preview data for the page at `pathname`.
pub fn card_data(doc: &dyn DocumentView, pathname: &str) -> Result<CardData, ExtractionError> {
    let article = extract_article(doc, pathname)?;
    Ok(CardData {
        author: article.author,
        date: article.date,
        hero: article.hero,
        path: pathname.strip_prefix('/').unwrap_or(pathname).to_string(),
        teaser: article.teaser,
        title: article.title,
        topics: article.topics,
    })
}

fn hero_path(doc: &dyn DocumentView) -> Result<String, ExtractionError> {
    let image = doc
        .meta_property("og:image")
        .ok_or(ExtractionError::MissingHeroImage)?;
    let name = image
        .split(HERO_MARKER)
        .nth(1)
        .ok_or_else(|| ExtractionError::MalformedHeroImage(image.clone()))?;
    Ok(format!("{}{}", HERO_MARKER, name))
}

/// Parse a publication date into epoch seconds (UTC midnight for plain dates).
///
/// Accepts RFC 3339 timestamps, `MM-DD-YYYY`, `YYYY-MM-DD` and
/// `Month DD, YYYY`.
pub fn parse_epoch_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.timestamp());
    }

    ["%m-%d-%Y", "%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
}
