// Per-snapshot processing: locate the embedded state, parse it, map it

pub mod extractor;
pub mod locator;
pub mod raw_state;

use crate::common::error::Result;
use crate::domain::{Company, RawSnapshot};
use extractor::extract_company;
use locator::{Located, SkipReason, StateLocator};
use raw_state::RawPageState;

/// Result of running one snapshot through locate, parse and extract
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotOutcome {
    Extracted(Company),
    Skipped(SkipReason),
}

/// Synchronous pipeline for a single snapshot.
pub fn process_snapshot(locator: &StateLocator, snapshot: &RawSnapshot) -> Result<SnapshotOutcome> {
    let raw = match locator.locate(snapshot.html.as_deref()) {
        Located::Found(raw) => raw,
        Located::Missing(reason) => return Ok(SnapshotOutcome::Skipped(reason)),
    };
    let state = RawPageState::from_json(&raw)?;
    let company = extract_company(&state, &snapshot.url)?;
    Ok(SnapshotOutcome::Extracted(company))
}
