use crate::common::error::{Result, ScraperError};
use scraper::{Html, Selector};
use serde::Serialize;
use std::fmt;

/// Why a snapshot produced no record without being an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoHtml,
    NoMarker,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoHtml => "no_html",
            SkipReason::NoMarker => "no_marker",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoHtml => f.write_str("no HTML found"),
            SkipReason::NoMarker => f.write_str("no state marker found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// Raw attribute text of the state marker
    Found(String),
    Missing(SkipReason),
}

/// Finds the element carrying the page's serialized state.
#[derive(Debug, Clone)]
pub struct StateLocator {
    attribute: String,
    selector: Selector,
}

impl StateLocator {
    pub fn new(attribute: &str) -> Result<Self> {
        let selector = Selector::parse(&format!("div[{attribute}]")).map_err(|e| {
            ScraperError::Config(format!("Invalid marker attribute '{attribute}': {e}"))
        })?;
        Ok(Self {
            attribute: attribute.to_string(),
            selector,
        })
    }

    /// Returns the first marker's attribute text in document order.
    pub fn locate(&self, html: Option<&str>) -> Located {
        let html = match html {
            Some(h) if !h.is_empty() => h,
            _ => return Located::Missing(SkipReason::NoHtml),
        };

        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .next()
            .and_then(|element| element.value().attr(&self.attribute))
            .filter(|text| !text.is_empty())
            .map(|text| Located::Found(text.to_string()))
            .unwrap_or(Located::Missing(SkipReason::NoMarker))
    }
}
