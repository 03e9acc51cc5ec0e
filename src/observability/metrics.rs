//! Metric names and recording helpers for the scraper.
//!
//! Recording goes through the `metrics` facade; without an installed recorder
//! every call is a no-op.

use std::fmt;

/// Every metric name used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Extraction
    SnapshotsListed,
    SnapshotsExtracted,
    SnapshotsSkipped,
    SnapshotsFailed,
    ListingErrors,
    ExtractionDuration,

    // Crawl
    PagesCrawled,
    CrawlErrors,
    CrawlDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::SnapshotsListed => "yc_snapshots_listed_total",
            MetricName::SnapshotsExtracted => "yc_snapshots_extracted_total",
            MetricName::SnapshotsSkipped => "yc_snapshots_skipped_total",
            MetricName::SnapshotsFailed => "yc_snapshots_failed_total",
            MetricName::ListingErrors => "yc_listing_errors_total",
            MetricName::ExtractionDuration => "yc_extraction_duration_seconds",
            MetricName::PagesCrawled => "yc_pages_crawled_total",
            MetricName::CrawlErrors => "yc_crawl_errors_total",
            MetricName::CrawlDuration => "yc_crawl_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod extraction {
    use super::MetricName;

    pub fn snapshots_listed(count: usize) {
        ::metrics::counter!(MetricName::SnapshotsListed.as_str()).increment(count as u64);
    }

    pub fn snapshot_extracted() {
        ::metrics::counter!(MetricName::SnapshotsExtracted.as_str()).increment(1);
    }

    pub fn snapshot_skipped(reason: &'static str) {
        ::metrics::counter!(MetricName::SnapshotsSkipped.as_str(), "reason" => reason).increment(1);
    }

    pub fn snapshot_failed(stage: &'static str) {
        ::metrics::counter!(MetricName::SnapshotsFailed.as_str(), "stage" => stage).increment(1);
    }

    pub fn listing_error() {
        ::metrics::counter!(MetricName::ListingErrors.as_str()).increment(1);
    }

    pub fn duration(secs: f64) {
        ::metrics::histogram!(MetricName::ExtractionDuration.as_str()).record(secs);
    }
}

pub mod crawl {
    use super::MetricName;

    pub fn page_crawled() {
        ::metrics::counter!(MetricName::PagesCrawled.as_str()).increment(1);
    }

    pub fn crawl_error(kind: &'static str) {
        ::metrics::counter!(MetricName::CrawlErrors.as_str(), "kind" => kind).increment(1);
    }

    pub fn duration(secs: f64) {
        ::metrics::histogram!(MetricName::CrawlDuration.as_str()).record(secs);
    }
}
