use crate::app::ports::SnapshotSource;
use crate::common::error::{Result, ScraperError};
use crate::domain::RawSnapshot;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// In-memory snapshot source for development/testing.
///
/// Units are kept as raw JSON text so malformed units behave like bad files.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotSource {
    units: BTreeMap<String, String>,
    listing_error: Option<String>,
}

impl MemorySnapshotSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, id: impl Into<String>, snapshot: &RawSnapshot) -> Self {
        // RawSnapshot is plain strings; serializing cannot fail
        let text = serde_json::to_string(snapshot).unwrap_or_default();
        self.units.insert(id.into(), text);
        self
    }

    pub fn with_raw(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.units.insert(id.into(), text.into());
        self
    }

    /// Make `list` fail with the given message.
    pub fn with_listing_error(mut self, message: impl Into<String>) -> Self {
        self.listing_error = Some(message.into());
        self
    }
}

#[async_trait]
impl SnapshotSource for MemorySnapshotSource {
    async fn list(&self) -> Result<Vec<String>> {
        if let Some(message) = &self.listing_error {
            return Err(ScraperError::Storage {
                message: message.clone(),
            });
        }
        Ok(self.units.keys().cloned().collect())
    }

    async fn load(&self, id: &str) -> Result<RawSnapshot> {
        let text = self.units.get(id).ok_or_else(|| ScraperError::Storage {
            message: format!("unknown snapshot '{id}'"),
        })?;
        // Yield so sibling loads interleave the way file reads do
        tokio::task::yield_now().await;
        Ok(serde_json::from_str(text)?)
    }
}
