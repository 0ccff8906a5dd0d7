// Test doubles for the scraping collaborator
//
// MockJobScraper returns canned results per search term and records every
// query it receives.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::BaseJobScraper;
use crate::types::{JobQuery, JobRecord};

#[derive(Debug, Clone)]
enum MockResponse {
    Jobs(Vec<JobRecord>),
    Error(String),
}

/// Scraper that answers from a per-term script. Unscripted terms return no jobs.
#[derive(Default)]
pub struct MockJobScraper {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<JobQuery>>>,
}

impl MockJobScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return these jobs when `term` is searched
    pub fn with_jobs(self, term: &str, jobs: Vec<JobRecord>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(term.to_string(), MockResponse::Jobs(jobs));
        self
    }

    /// Fail with `message` when `term` is searched
    pub fn with_error(self, term: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(term.to_string(), MockResponse::Error(message.to_string()));
        self
    }

    /// Get all queries in the order they were made
    pub fn calls(&self) -> Vec<JobQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the searched terms in order
    pub fn searched_terms(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.search_term.to_string())
            .collect()
    }
}

#[async_trait]
impl BaseJobScraper for MockJobScraper {
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobRecord>> {
        self.calls.lock().unwrap().push(query.clone());

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(query.search_term.as_str())
            .cloned();

        match response {
            Some(MockResponse::Jobs(jobs)) => Ok(jobs),
            Some(MockResponse::Error(message)) => Err(anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }
}
