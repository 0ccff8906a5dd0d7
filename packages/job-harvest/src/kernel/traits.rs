// Trait definitions for dependency injection
//
// Infrastructure only: the runner decides what to do with the records.
//
// Naming convention: Base* for trait names (e.g., BaseJobScraper)

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{JobQuery, JobRecord};

// =============================================================================
// Job Scraper Trait (Infrastructure - job board search)
// =============================================================================

#[async_trait]
pub trait BaseJobScraper: Send + Sync {
    /// Run one search against the job board.
    ///
    /// Returns the postings in board order, or an error whose message is
    /// fit to show the operator.
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobRecord>>;
}
