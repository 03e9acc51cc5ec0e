use crate::app::ports::{ExtractionObserver, FailureStage, SnapshotSource};
use crate::common::constants::DEFAULT_MAX_CONCURRENCY;
use crate::common::error::Result;
use crate::domain::Company;
use crate::observability::metrics;
use crate::pipeline::processing::locator::StateLocator;
use crate::pipeline::processing::{process_snapshot, SnapshotOutcome};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Counts for one extraction run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub listed: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Companies extracted by a run, in completion order
#[derive(Debug, Clone)]
pub struct DatasetRun {
    pub companies: Vec<Company>,
    pub summary: RunSummary,
}

enum TaskOutcome {
    Extracted(Company),
    Skipped,
    Failed,
}

/// Runs every stored snapshot through locate, parse and extract.
///
/// Snapshots are processed as interleaved futures on the calling task, at most
/// `max_concurrency` at a time. A failing snapshot is reported to the observer
/// and contributes nothing; it never stops its siblings.
pub struct Aggregator {
    source: Arc<dyn SnapshotSource>,
    observer: Arc<dyn ExtractionObserver>,
    locator: StateLocator,
    max_concurrency: usize,
}

impl Aggregator {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        observer: Arc<dyn ExtractionObserver>,
        locator: StateLocator,
    ) -> Self {
        Self {
            source,
            observer,
            locator,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Extract every snapshot; returns an empty collection when the snapshots
    /// cannot be listed. The cause goes to the observer only.
    pub async fn process_dataset(&self) -> Vec<Company> {
        match self.try_process_dataset().await {
            Ok(run) => run.companies,
            Err(_) => Vec::new(),
        }
    }

    /// Like `process_dataset`, but a listing failure is returned to the caller.
    #[instrument(skip(self), fields(max_concurrency = self.max_concurrency))]
    pub async fn try_process_dataset(&self) -> Result<DatasetRun> {
        let started_at = Utc::now();
        let t_run = std::time::Instant::now();

        let ids = match self.source.list().await {
            Ok(ids) => ids,
            Err(e) => {
                self.observer.listing_failed(&e);
                return Err(e);
            }
        };
        let listed = ids.len();
        metrics::extraction::snapshots_listed(listed);
        info!("Processing {} snapshots", listed);

        let outcomes: Vec<TaskOutcome> = stream::iter(ids)
            .map(|id| self.process_one(id))
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut companies = Vec::new();
        let (mut skipped, mut failed) = (0, 0);
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Extracted(company) => companies.push(company),
                TaskOutcome::Skipped => skipped += 1,
                TaskOutcome::Failed => failed += 1,
            }
        }

        metrics::extraction::duration(t_run.elapsed().as_secs_f64());
        info!(
            "Extracted {} companies from {} snapshots ({} skipped, {} failed)",
            companies.len(),
            listed,
            skipped,
            failed
        );

        let summary = RunSummary {
            listed,
            extracted: companies.len(),
            skipped,
            failed,
            started_at,
            finished_at: Utc::now(),
        };
        Ok(DatasetRun { companies, summary })
    }

    async fn process_one(&self, id: String) -> TaskOutcome {
        let snapshot = match self.source.load(&id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.observer.failed(&id, FailureStage::Load, &e);
                return TaskOutcome::Failed;
            }
        };

        match process_snapshot(&self.locator, &snapshot) {
            Ok(SnapshotOutcome::Extracted(company)) => {
                self.observer.extracted(&id, &company);
                TaskOutcome::Extracted(company)
            }
            Ok(SnapshotOutcome::Skipped(reason)) => {
                self.observer.skipped(&id, &snapshot.url, reason);
                TaskOutcome::Skipped
            }
            Err(e) => {
                self.observer
                    .failed(&id, FailureStage::from_processing_error(&e), &e);
                TaskOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ScraperError;
    use crate::domain::RawSnapshot;
    use crate::infra::MemorySnapshotSource;
    use crate::observability::{MemoryObserver, ObservedEvent};
    use crate::pipeline::processing::locator::SkipReason;

    fn page(name: &str) -> String {
        format!(
            r#"<div data-page='{{"props":{{"company":{{"name":"{name}","year_founded":"2021","founders":[{{"full_name":"F","linkedin_url":"l"}}]}},"jobPostings":[],"launches":[]}}}}'></div>"#
        )
    }

    fn aggregator(source: MemorySnapshotSource, observer: Arc<MemoryObserver>) -> Aggregator {
        Aggregator::new(
            Arc::new(source),
            observer,
            StateLocator::new("data-page").unwrap(),
        )
        .with_max_concurrency(4)
    }

    #[tokio::test]
    async fn test_isolates_each_failure_kind() {
        let source = MemorySnapshotSource::new()
            .with_snapshot("ok.json", &RawSnapshot::new("https://yc/ok", page("Ok")))
            .with_snapshot("no-html.json", &RawSnapshot { url: "https://yc/e".into(), html: None })
            .with_snapshot("no-marker.json", &RawSnapshot::new("https://yc/m", "<p>hi</p>"))
            .with_snapshot(
                "bad-marker.json",
                &RawSnapshot::new("https://yc/b", r#"<div data-page='{"props":'></div>"#),
            )
            .with_raw("bad-unit.json", "{\"url\": ");
        let observer = Arc::new(MemoryObserver::new());
        let run = aggregator(source, observer.clone()).try_process_dataset().await.unwrap();

        assert_eq!(run.companies.len(), 1);
        assert_eq!(run.companies[0].y_combinator_url, "https://yc/ok");
        assert_eq!(run.summary.listed, 5);
        assert_eq!(run.summary.extracted, 1);
        assert_eq!(run.summary.skipped, 2);
        assert_eq!(run.summary.failed, 2);

        let mut skips = observer.skips();
        skips.sort_by_key(|e| format!("{e:?}"));
        assert_eq!(
            skips,
            vec![
                ObservedEvent::Skipped { id: "no-html.json".into(), reason: SkipReason::NoHtml },
                ObservedEvent::Skipped { id: "no-marker.json".into(), reason: SkipReason::NoMarker },
            ]
        );

        let stages: Vec<(String, FailureStage)> = observer
            .failures()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Failed { id, stage, .. } => Some((id, stage)),
                _ => None,
            })
            .collect();
        assert!(stages.contains(&("bad-marker.json".to_string(), FailureStage::Parse)));
        assert!(stages.contains(&("bad-unit.json".to_string(), FailureStage::Load)));
    }

    #[tokio::test]
    async fn test_listing_failure_yields_empty_result() {
        let source = MemorySnapshotSource::new()
            .with_snapshot("ok.json", &RawSnapshot::new("https://yc/ok", page("Ok")))
            .with_listing_error("permission denied");
        let observer = Arc::new(MemoryObserver::new());
        let agg = aggregator(source, observer.clone());

        assert!(agg.process_dataset().await.is_empty());
        assert!(matches!(
            agg.try_process_dataset().await,
            Err(ScraperError::Storage { .. })
        ));
        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|event| matches!(event, ObservedEvent::ListingFailed { .. })));
    }

    #[tokio::test]
    async fn test_empty_source() {
        let observer = Arc::new(MemoryObserver::new());
        let run = aggregator(MemorySnapshotSource::new(), observer.clone())
            .try_process_dataset()
            .await
            .unwrap();
        assert!(run.companies.is_empty());
        assert_eq!(run.summary.listed, 0);
        assert!(observer.events().is_empty());
    }
}
