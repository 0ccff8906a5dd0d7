//! Command-line overrides for the environment configuration.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::HarvestConfig;
use crate::types::{JobType, SearchTerm};

#[derive(Parser, Debug)]
#[command(name = "job-harvest")]
#[command(about = "Search Indeed for a list of job titles and save the results as one JSON file")]
pub struct Cli {
    /// Job title to search (repeatable, replaces the configured list)
    #[arg(long = "term", value_name = "TITLE")]
    pub terms: Vec<String>,

    /// City to search in
    #[arg(long)]
    pub location: Option<String>,

    /// Indeed country code (e.g. netherlands)
    #[arg(long)]
    pub country: Option<String>,

    /// Maximum results per search term
    #[arg(long)]
    pub results_wanted: Option<u32>,

    /// Only include postings newer than this many hours
    #[arg(long)]
    pub hours_old: Option<u32>,

    /// fulltime, parttime, internship or contract
    #[arg(long)]
    pub job_type: Option<JobType>,

    /// Seconds to wait between searches
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// Directory for the output file
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// How many companies to list in the summary
    #[arg(long)]
    pub top: Option<usize>,
}

impl Cli {
    /// Apply every flag that was given on top of `config`.
    pub fn apply(self, config: &mut HarvestConfig) -> Result<()> {
        if !self.terms.is_empty() {
            config.search_terms = self
                .terms
                .into_iter()
                .map(SearchTerm::new)
                .collect::<Result<_>>()?;
        }
        if let Some(location) = self.location {
            config.location = location;
        }
        if let Some(country) = self.country {
            config.country = country;
        }
        if let Some(results_wanted) = self.results_wanted {
            config.results_wanted = results_wanted;
        }
        if let Some(hours_old) = self.hours_old {
            config.hours_old = hours_old;
        }
        if let Some(job_type) = self.job_type {
            config.job_type = job_type;
        }
        if let Some(delay_secs) = self.delay_secs {
            config.delay = Duration::from_secs(delay_secs);
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(top) = self.top {
            config.top_companies = top;
        }
        Ok(())
    }
}
