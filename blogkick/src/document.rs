//! [`DocumentView`] over a rendered HTML page.

use scraper::{Html, Selector};
use std::collections::HashMap;

use crate::metadata::DocumentView;

/// Template name carried by blog posts.
const POST_TEMPLATE: &str = "post";

/// Snapshot of the fields an article page exposes through its markup.
///
/// Page-level fields come from `<meta name="...">` tags: `author`,
/// `publication-date`, `topics` (comma separated) and `template`.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    names: HashMap<String, String>,
    properties: HashMap<String, String>,
    teaser: Option<String>,
    title: String,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let meta = Selector::parse("meta[content]").expect("valid selector");
        let teaser = Selector::parse("main > div:nth-of-type(5)").expect("valid selector");
        let title = Selector::parse("title").expect("valid selector");

        let mut names = HashMap::new();
        let mut properties = HashMap::new();
        for element in html.select(&meta) {
            let element = element.value();
            let Some(content) = element.attr("content") else {
                continue;
            };
            if let Some(name) = element.attr("name") {
                names
                    .entry(name.to_string())
                    .or_insert_with(|| content.to_string());
            }
            if let Some(property) = element.attr("property") {
                properties
                    .entry(property.to_string())
                    .or_insert_with(|| content.to_string());
            }
        }

        let text_of = |selector: &Selector| {
            html.select(selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        };

        Self {
            names,
            properties,
            teaser: text_of(&teaser),
            title: text_of(&title).unwrap_or_default(),
        }
    }

    fn name(&self, name: &str) -> Option<String> {
        self.names
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl DocumentView for HtmlDocument {
    fn author(&self) -> Option<String> {
        self.name("author")
    }

    fn raw_date(&self) -> Option<String> {
        self.name("publication-date")
    }

    fn topics(&self) -> Vec<String> {
        self.name("topics")
            .map(|topics| {
                topics
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_post(&self) -> bool {
        self.name("template")
            .is_some_and(|t| t.eq_ignore_ascii_case(POST_TEMPLATE))
    }

    fn meta_property(&self, property: &str) -> Option<String> {
        self.properties.get(property).cloned()
    }

    fn teaser_block(&self) -> Option<String> {
        self.teaser.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}
