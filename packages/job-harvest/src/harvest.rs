//! End-to-end run: search every term, report statistics, save the file.

use anyhow::Result;
use chrono::Utc;

use crate::aggregator::JobStats;
use crate::config::HarvestConfig;
use crate::kernel::BaseJobScraper;
use crate::report::Reporter;
use crate::runner::{QueryRunner, TermReport};
use crate::types::{JobRecord, OutputDocument};
use crate::writer::{write_output, WriteOutcome};

#[derive(Debug)]
pub struct HarvestSummary {
    pub jobs: Vec<JobRecord>,
    pub terms: Vec<TermReport>,
    pub stats: JobStats,
    pub output: WriteOutcome,
}

/// Run the whole pipeline once.
///
/// Per-term scrape failures are absorbed by the runner. A write failure is
/// returned after the statistics have already been reported.
pub async fn run<R: Reporter + ?Sized>(
    scraper: &dyn BaseJobScraper,
    config: &HarvestConfig,
    reporter: &mut R,
) -> Result<HarvestSummary> {
    reporter.banner(config);

    let collected = QueryRunner::new(scraper, config).run(reporter).await;

    let stats = JobStats::compute(&collected.jobs);
    reporter.statistics(&stats, config);

    let doc = OutputDocument::new(
        config.location.clone(),
        config.country_display(),
        config.search_terms.clone(),
        Utc::now(),
        &collected.jobs,
    );
    let output = write_output(&config.output_dir, &doc).await?;
    reporter.saved(&output, config);

    Ok(HarvestSummary {
        jobs: collected.jobs,
        terms: collected.terms,
        stats,
        output,
    })
}
