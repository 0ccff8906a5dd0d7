//! Persists a run as one dated JSON file.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::types::OutputDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, bytes: u64 },
    /// No jobs were collected, so no file was touched.
    Skipped,
}

/// `<location>_all_jobs_<YYYY-MM-DD>.json`, one file per calendar day.
///
/// The location becomes a single path component.
pub fn output_file_name(location: &str, date: NaiveDate) -> String {
    format!(
        "{}_all_jobs_{}.json",
        location_slug(location),
        date.format("%Y-%m-%d")
    )
}

/// Lowercase alphanumerics; every other run of characters collapses to `_`.
fn location_slug(location: &str) -> String {
    let mut slug = String::with_capacity(location.len());
    for c in location.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "jobs".to_string()
    } else {
        slug.to_string()
    }
}

/// Write `doc` as pretty JSON into `dir`, replacing any file from earlier today.
///
/// The reported size is read back from the filesystem.
pub async fn write_output(dir: &Path, doc: &OutputDocument<'_>) -> Result<WriteOutcome> {
    if doc.jobs.is_empty() {
        tracing::warn!("No jobs to save");
        return Ok(WriteOutcome::Skipped);
    }

    let date = doc.metadata.scraped_at.date_naive();
    let path = dir.join(output_file_name(&doc.metadata.location, date));

    let body = serde_json::to_vec_pretty(doc).context("Failed to serialize output document")?;
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let bytes = tokio::fs::metadata(&path)
        .await
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    tracing::info!(path = %path.display(), bytes, jobs = doc.metadata.total_jobs, "Saved jobs");
    Ok(WriteOutcome::Written { path, bytes })
}
