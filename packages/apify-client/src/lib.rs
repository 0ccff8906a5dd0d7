//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs
//! with arbitrary JSON input, polling for completion, and fetching dataset
//! results.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::ApifyClient;
//!
//! let client = ApifyClient::new("your-api-token".into())?;
//!
//! let items: Vec<serde_json::Value> = client
//!     .run_actor("someone~indeed-jobs", &serde_json::json!({ "search_term": "AI Engineer" }))
//!     .await?;
//! println!("{} items", items.len());
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{RunData, RunState};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Seconds the API holds a run-status request open waiting for completion.
const WAIT_FOR_FINISH_SECS: u64 = 60;

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Result<Self> {
        // Must outlive the long-poll window
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(WAIT_FOR_FINISH_SECS + 30))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (proxies, local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_path(actor_id));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!(
                "{}/actor-runs/{}?waitForFinish={}",
                self.base_url, run_id, WAIT_FOR_FINISH_SECS
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let resp = check_status(resp).await?;
            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.state() {
                RunState::Succeeded => return Ok(api_resp.data),
                RunState::Failed => return Err(ApifyError::RunFailed(api_resp.data.status)),
                RunState::Running => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                    continue;
                }
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<T>> {
        let url = format!(
            "{}/datasets/{}/items?format=json&clean=true",
            self.base_url, dataset_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let resp = check_status(resp).await?;
        let body = resp.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&body)?;
        Ok(items)
    }

    /// Run an actor end-to-end: start run, poll, fetch dataset items.
    pub async fn run_actor<I, T>(&self, actor_id: &str, input: &I) -> Result<Vec<T>>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::info!(actor_id, "Starting Apify actor run");

        let run = self.start_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let items: Vec<T> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = items.len(), "Fetched dataset items");

        Ok(items)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApifyError::Api {
        status: status.as_u16(),
        message: body,
    })
}

/// Apify addresses actors as `username~actor-name` in URL paths.
fn actor_path(actor_id: &str) -> String {
    actor_id.replacen('/', "~", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_path_accepts_both_forms() {
        assert_eq!(actor_path("someone/indeed-jobs"), "someone~indeed-jobs");
        assert_eq!(actor_path("someone~indeed-jobs"), "someone~indeed-jobs");
        assert_eq!(actor_path("nH2AHrwxeTRJoN5hX"), "nH2AHrwxeTRJoN5hX");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = ApifyClient::new("test-token".to_string())
            .unwrap()
            .with_base_url("http://localhost:8080/v2/");
        assert_eq!(client.base_url, "http://localhost:8080/v2");
    }
}
