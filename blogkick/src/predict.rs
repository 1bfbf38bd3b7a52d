//! Public URL prediction for draft articles.
//!
//! A post lives at `/{section}/.../{name}.docx`-like paths while drafted and
//! is published under `{section}/{date path}/{name}.html`.

/// Date components taken from a raw publication date split on `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts<'a> {
    pub first: &'a str,
    pub second: &'a str,
    pub third: &'a str,
}

impl<'a> DateParts<'a> {
    /// Split a raw date on `-`; `None` when fewer than three pieces exist.
    pub fn split(raw: &'a str) -> Option<Self> {
        let mut pieces = raw.split('-');
        Some(Self {
            first: pieces.next()?,
            second: pieces.next()?,
            third: pieces.next()?,
        })
    }

    /// The path segment inserted after the section: `/{third}/{first}/{second}`.
    pub fn to_path(&self) -> String {
        format!("/{}/{}/{}", self.third, self.first, self.second)
    }
}

/// Predict the URL a document will have once published.
///
/// With a host the result is absolute (`https://{host}/...`); without one it
/// is host-relative and carries no leading slash.
pub fn predict_url(host: Option<&str>, path: &str, raw_date: Option<&str>) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let section = segments.get(1).copied().unwrap_or_default();
    let date_path = raw_date
        .and_then(DateParts::split)
        .map(|parts| parts.to_path())
        .unwrap_or_default();
    let filename = derive_filename(segments.last().copied().unwrap_or_default());
    let prefix = host.map(|h| format!("https://{}/", h)).unwrap_or_default();

    format!("{}{}{}/{}.html", prefix, section, date_path, filename)
}

/// Lowercased stem of a path segment with unsafe characters replaced by `-`.
///
/// Everything from the first `.` onward is dropped.
pub fn derive_filename(segment: &str) -> String {
    let stem = segment.split('.').next().unwrap_or_default();
    stem.to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '/' | '.' => c,
            _ => '-',
        })
        .collect()
}
