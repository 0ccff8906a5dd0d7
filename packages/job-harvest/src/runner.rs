//! Sequential per-term search loop.

use std::time::Duration;

use crate::config::HarvestConfig;
use crate::kernel::BaseJobScraper;
use crate::report::Reporter;
use crate::types::{JobRecord, SearchTerm};

/// Number of records logged as a preview after a successful search.
const PREVIEW_LEN: usize = 2;

/// What happened for one search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOutcome {
    Found(usize),
    Empty,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct TermReport {
    pub search_term: SearchTerm,
    pub outcome: TermOutcome,
}

/// All jobs collected in search order, plus the per-term outcomes.
#[derive(Debug, Default)]
pub struct RunnerOutput {
    pub jobs: Vec<JobRecord>,
    pub terms: Vec<TermReport>,
}

pub struct QueryRunner<'a> {
    scraper: &'a dyn BaseJobScraper,
    config: &'a HarvestConfig,
}

impl<'a> QueryRunner<'a> {
    pub fn new(scraper: &'a dyn BaseJobScraper, config: &'a HarvestConfig) -> Self {
        Self { scraper, config }
    }

    /// Search every configured term in order, one at a time.
    ///
    /// A failed term contributes nothing and never stops the loop.
    pub async fn run<R: Reporter + ?Sized>(&self, reporter: &mut R) -> RunnerOutput {
        let terms = &self.config.search_terms;
        let mut output = RunnerOutput::default();

        for (index, term) in terms.iter().enumerate() {
            reporter.term_started(term, &self.config.location);
            tracing::info!(search_term = %term, location = %self.config.location, "Searching");

            let outcome = self.search_term(term, &mut output.jobs).await;
            let report = TermReport {
                search_term: term.clone(),
                outcome,
            };
            reporter.term_finished(&report);
            output.terms.push(report);

            if index + 1 < terms.len() {
                self.pause(reporter).await;
            }
        }

        tracing::info!(
            total = output.jobs.len(),
            terms = terms.len(),
            "All search terms processed"
        );
        output
    }

    async fn search_term(&self, term: &SearchTerm, jobs: &mut Vec<JobRecord>) -> TermOutcome {
        let query = self.config.query_for(term);

        match self.scraper.fetch(&query).await {
            Ok(found) if found.is_empty() => {
                tracing::warn!(search_term = %term, "No jobs found");
                TermOutcome::Empty
            }
            Ok(found) => {
                let count = found.len();
                tracing::info!(search_term = %term, count, "Found jobs");
                for job in found.iter().take(PREVIEW_LEN) {
                    tracing::debug!(search_term = %term, preview = %job_preview(job), "Preview");
                }

                jobs.extend(found.into_iter().map(|mut job| {
                    job.tag(term);
                    job
                }));
                TermOutcome::Found(count)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(search_term = %term, error = %message, "Search failed");
                TermOutcome::Failed(message)
            }
        }
    }

    async fn pause<R: Reporter + ?Sized>(&self, reporter: &mut R) {
        let delay = self.config.delay;
        if delay.is_zero() {
            return;
        }
        reporter.waiting(delay);
        tracing::debug!(delay_secs = delay.as_secs_f64(), "Rate limiting before next search");
        tokio::time::sleep(delay).await;
    }
}

/// One-line summary of a job for the preview log.
fn job_preview(job: &JobRecord) -> String {
    let field = |key: &str| {
        job.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("-")
            .to_string()
    };
    format!(
        "{} | {} | {}",
        field("title"),
        job.company_name().unwrap_or("-"),
        field("job_url")
    )
}

/// Rate-limit wait spent by a full run, saturating at `Duration::MAX`.
pub fn total_delay(config: &HarvestConfig) -> Duration {
    let pauses = config.search_terms.len().saturating_sub(1);
    u32::try_from(pauses)
        .ok()
        .and_then(|n| config.delay.checked_mul(n))
        .unwrap_or(Duration::MAX)
}
