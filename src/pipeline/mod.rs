// Data pipeline: ingestion, per-snapshot processing, aggregation, and output

pub mod aggregator;
pub mod ingestion;
pub mod output;
pub mod processing;

pub use aggregator::{Aggregator, DatasetRun, RunSummary};
