use crate::common::error::{Result, ScraperError};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Read seed URLs from a CSV file with a header row.
pub fn read_seed_urls(path: &Path, column: &str) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScraperError::Config(format!("Cannot open seed list '{}': {}", path.display(), e))
    })?;
    let urls = read_seed_urls_from(file, column)?;
    info!("Loaded {} seed URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// Collect the trimmed, non-empty values of `column`. A header row without
/// the column yields no URLs.
pub fn read_seed_urls_from<R: Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index = match headers.iter().position(|h| h.trim() == column) {
        Some(i) => i,
        None => {
            debug!("Seed list has no '{}' column", column);
            return Ok(Vec::new());
        }
    };

    let mut urls = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(url) = record.get(index).map(str::trim).filter(|u| !u.is_empty()) {
            urls.push(url.to_string());
        }
    }
    Ok(urls)
}
