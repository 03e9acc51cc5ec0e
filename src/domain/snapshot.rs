use serde::{Deserialize, Serialize};

/// A captured page as stored by the crawler.
///
/// `html` is optional on disk: pages that failed to render are stored with a
/// null or missing body and are skipped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub url: String,
    #[serde(default)]
    pub html: Option<String>,
}

impl RawSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: Some(html.into()),
        }
    }
}
