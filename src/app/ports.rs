use crate::common::error::{Result, ScraperError};
use crate::domain::{Company, RawSnapshot};
use crate::pipeline::processing::locator::SkipReason;
use async_trait::async_trait;

/// Where snapshots come from. Identifiers are opaque to the pipeline and only
/// used to load and to label diagnostics.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Enumerate stored snapshots. Failure here is fatal to a run.
    async fn list(&self) -> Result<Vec<String>>;

    async fn load(&self, id: &str) -> Result<RawSnapshot>;
}

/// Stage at which a single snapshot failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Load,
    Parse,
    Extract,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Load => "load",
            FailureStage::Parse => "parse",
            FailureStage::Extract => "extract",
        }
    }

    /// Stage implied by an error raised after the snapshot was loaded
    pub fn from_processing_error(error: &ScraperError) -> Self {
        match error {
            ScraperError::Json(_) => FailureStage::Parse,
            _ => FailureStage::Extract,
        }
    }
}

/// Sink for per-snapshot outcomes. Implementations must tolerate calls from
/// interleaved tasks in any order.
pub trait ExtractionObserver: Send + Sync {
    fn extracted(&self, _id: &str, _company: &Company) {}

    fn skipped(&self, _id: &str, _url: &str, _reason: SkipReason) {}

    fn failed(&self, _id: &str, _stage: FailureStage, _error: &ScraperError) {}

    fn listing_failed(&self, _error: &ScraperError) {}
}
