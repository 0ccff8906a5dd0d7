use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{default_search_terms, JobQuery, JobType, SearchTerm};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub apify_api_token: Option<String>,
    pub apify_job_actor: Option<String>,
    pub harvest: HarvestConfig,
}

/// Parameters of a single harvest run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub search_terms: Vec<SearchTerm>,
    pub location: String,
    /// Indeed country code, e.g. `netherlands`
    pub country: String,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub job_type: JobType,
    pub is_remote: bool,
    pub delay: Duration,
    pub output_dir: PathBuf,
    pub top_companies: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            search_terms: default_search_terms(),
            location: "Amsterdam".to_string(),
            country: "netherlands".to_string(),
            results_wanted: 50,
            hours_old: 168,
            job_type: JobType::Fulltime,
            is_remote: false,
            delay: Duration::from_secs(3),
            output_dir: PathBuf::from("."),
            top_companies: 10,
        }
    }
}

impl HarvestConfig {
    pub fn query_for(&self, term: &SearchTerm) -> JobQuery {
        JobQuery {
            search_term: term.clone(),
            location: self.location.clone(),
            country: self.country.clone(),
            results_wanted: self.results_wanted,
            hours_old: self.hours_old,
            job_type: self.job_type,
            is_remote: self.is_remote,
        }
    }

    /// Human-readable country, e.g. `united kingdom` -> `United Kingdom`.
    pub fn country_display(&self) -> String {
        self.country
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HarvestConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let search_terms = match var("HARVEST_SEARCH_TERMS") {
            Some(raw) => parse_search_terms(&raw).context("HARVEST_SEARCH_TERMS is invalid")?,
            None => defaults.search_terms,
        };

        let harvest = HarvestConfig {
            search_terms,
            location: var("HARVEST_LOCATION").unwrap_or(defaults.location),
            country: var("HARVEST_COUNTRY").unwrap_or(defaults.country),
            results_wanted: match var("HARVEST_RESULTS_WANTED") {
                Some(v) => v
                    .trim()
                    .parse()
                    .context("HARVEST_RESULTS_WANTED must be a valid number")?,
                None => defaults.results_wanted,
            },
            hours_old: match var("HARVEST_HOURS_OLD") {
                Some(v) => v
                    .trim()
                    .parse()
                    .context("HARVEST_HOURS_OLD must be a valid number")?,
                None => defaults.hours_old,
            },
            job_type: match var("HARVEST_JOB_TYPE") {
                Some(v) => v.parse().context("HARVEST_JOB_TYPE is invalid")?,
                None => defaults.job_type,
            },
            is_remote: defaults.is_remote,
            delay: match var("HARVEST_DELAY_SECS") {
                Some(v) => Duration::from_secs(
                    v.trim()
                        .parse()
                        .context("HARVEST_DELAY_SECS must be a valid number")?,
                ),
                None => defaults.delay,
            },
            output_dir: var("HARVEST_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            top_companies: defaults.top_companies,
        };

        Ok(Self {
            apify_api_token: var("APIFY_API_TOKEN"),
            apify_job_actor: var("APIFY_JOB_ACTOR"),
            harvest,
        })
    }

    /// Token and actor id, both required to talk to Apify.
    pub fn apify_credentials(&self) -> Result<(&str, &str)> {
        let token = self
            .apify_api_token
            .as_deref()
            .context("APIFY_API_TOKEN must be set")?;
        let actor = self
            .apify_job_actor
            .as_deref()
            .context("APIFY_JOB_ACTOR must be set")?;
        Ok((token, actor))
    }
}

/// Comma-separated list, blanks dropped, at least one term required.
pub fn parse_search_terms(raw: &str) -> Result<Vec<SearchTerm>> {
    let terms: Vec<SearchTerm> = raw
        .split(',')
        .filter(|t| !t.trim().is_empty())
        .map(SearchTerm::new)
        .collect::<Result<_>>()?;

    anyhow::ensure!(!terms.is_empty(), "at least one search term is required");
    Ok(terms)
}
