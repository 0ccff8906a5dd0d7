use anyhow::{Context, Result};
use apify_client::ApifyClient;
use async_trait::async_trait;
use serde::Serialize;

use super::BaseJobScraper;
use crate::config::Config;
use crate::types::{JobQuery, JobRecord, JobType};

/// Job board searched by the actor.
const SITE_NAME: &str = "indeed";

/// Job scraper backed by a hosted Apify actor.
pub struct ApifyJobScraper {
    client: ApifyClient,
    actor_id: String,
}

/// Actor input, one run per search term.
#[derive(Debug, Serialize)]
struct IndeedActorInput<'a> {
    site_name: [&'static str; 1],
    search_term: &'a str,
    location: &'a str,
    country_indeed: &'a str,
    results_wanted: u32,
    hours_old: u32,
    job_type: JobType,
    is_remote: bool,
}

impl<'a> From<&'a JobQuery> for IndeedActorInput<'a> {
    fn from(query: &'a JobQuery) -> Self {
        Self {
            site_name: [SITE_NAME],
            search_term: query.search_term.as_str(),
            location: &query.location,
            country_indeed: &query.country,
            results_wanted: query.results_wanted,
            hours_old: query.hours_old,
            job_type: query.job_type,
            is_remote: query.is_remote,
        }
    }
}

impl ApifyJobScraper {
    pub fn new(api_token: String, actor_id: String) -> Result<Self> {
        let client = ApifyClient::new(api_token).context("Failed to create Apify client")?;
        Ok(Self { client, actor_id })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let (token, actor) = config.apify_credentials()?;
        Self::new(token.to_string(), actor.to_string())
    }
}

#[async_trait]
impl BaseJobScraper for ApifyJobScraper {
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobRecord>> {
        let input = IndeedActorInput::from(query);

        let jobs: Vec<JobRecord> = self
            .client
            .run_actor(&self.actor_id, &input)
            .await
            .with_context(|| format!("Apify actor {} failed", self.actor_id))?;

        Ok(jobs)
    }
}
