use crate::app::ports::{ExtractionObserver, FailureStage};
use crate::common::error::ScraperError;
use crate::domain::Company;
use crate::observability::metrics;
use crate::pipeline::processing::locator::SkipReason;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Production observer: structured log events plus metric counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn extracted(&self, id: &str, company: &Company) {
        debug!(snapshot = id, company = %company.name, url = %company.y_combinator_url, "Extracted company");
        metrics::extraction::snapshot_extracted();
    }

    fn skipped(&self, id: &str, url: &str, reason: SkipReason) {
        info!(snapshot = id, url, reason = reason.as_str(), "Skipping snapshot: {}", reason);
        metrics::extraction::snapshot_skipped(reason.as_str());
    }

    fn failed(&self, id: &str, stage: FailureStage, error: &ScraperError) {
        warn!(snapshot = id, stage = stage.as_str(), error = %error, "Snapshot failed");
        metrics::extraction::snapshot_failed(stage.as_str());
    }

    fn listing_failed(&self, err: &ScraperError) {
        error!(error = %err, "Failed to list snapshots");
        metrics::extraction::listing_error();
    }
}

/// One recorded observer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Extracted { id: String, name: String },
    Skipped { id: String, reason: SkipReason },
    Failed { id: String, stage: FailureStage, message: String },
    ListingFailed { message: String },
}

/// Observer that keeps every event in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.lock().clone()
    }

    pub fn failures(&self) -> Vec<ObservedEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, ObservedEvent::Failed { .. }))
            .collect()
    }

    pub fn skips(&self) -> Vec<ObservedEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, ObservedEvent::Skipped { .. }))
            .collect()
    }

    fn push(&self, event: ObservedEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ObservedEvent>> {
        // A panic while holding the lock leaves the Vec intact
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ExtractionObserver for MemoryObserver {
    fn extracted(&self, id: &str, company: &Company) {
        self.push(ObservedEvent::Extracted {
            id: id.to_string(),
            name: company.name.clone(),
        });
    }

    fn skipped(&self, id: &str, _url: &str, reason: SkipReason) {
        self.push(ObservedEvent::Skipped {
            id: id.to_string(),
            reason,
        });
    }

    fn failed(&self, id: &str, stage: FailureStage, error: &ScraperError) {
        self.push(ObservedEvent::Failed {
            id: id.to_string(),
            stage,
            message: error.to_string(),
        });
    }

    fn listing_failed(&self, error: &ScraperError) {
        self.push(ObservedEvent::ListingFailed {
            message: error.to_string(),
        });
    }
}
