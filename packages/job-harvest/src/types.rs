//! Core data types for a harvest run.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Job titles searched when no override is configured, in search order.
pub const DEFAULT_SEARCH_TERMS: &[&str] = &[
    "AI Engineer",
    "Machine Learning Engineer",
    "Artificial Intelligence Engineer",
    "ML Engineer",
    "AI/ML Engineer",
    "Deep Learning Engineer",
    "NLP Engineer",
    "Computer Vision Engineer",
];

// =============================================================================
// Search Term
// =============================================================================

/// A job-title query submitted to the job board. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Result<Self> {
        let term = term.into();
        let trimmed = term.trim();
        if trimmed.is_empty() {
            bail!("search term must not be empty");
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn default_search_terms() -> Vec<SearchTerm> {
    DEFAULT_SEARCH_TERMS
        .iter()
        .map(|t| SearchTerm(t.to_string()))
        .collect()
}

// =============================================================================
// Query
// =============================================================================

/// Employment type filter understood by the job board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    #[default]
    Fulltime,
    Parttime,
    Internship,
    Contract,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Fulltime => "fulltime",
            JobType::Parttime => "parttime",
            JobType::Internship => "internship",
            JobType::Contract => "contract",
        }
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "fulltime" => Ok(JobType::Fulltime),
            "parttime" => Ok(JobType::Parttime),
            "internship" => Ok(JobType::Internship),
            "contract" => Ok(JobType::Contract),
            other => bail!(
                "unknown job type '{}' (expected fulltime, parttime, internship or contract)",
                other
            ),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the scraping collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    pub search_term: SearchTerm,
    pub location: String,
    pub country: String,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub job_type: JobType,
    pub is_remote: bool,
}

// =============================================================================
// Job Record
// =============================================================================

/// One job posting as returned by the scraper.
///
/// Fields are passed through untouched; only a handful are read for
/// statistics, and `search_term` is added by the runner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRecord(Map<String, Value>);

impl JobRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter, mostly for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stamp the record with the term that found it, replacing any prior tag.
    pub fn tag(&mut self, term: &SearchTerm) {
        self.0
            .insert("search_term".to_string(), Value::String(term.to_string()));
    }

    pub fn search_term(&self) -> Option<&str> {
        self.get("search_term").and_then(Value::as_str)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.get("company_name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn has_emails(&self) -> bool {
        match self.get("emails") {
            Some(Value::Array(emails)) => !emails.is_empty(),
            Some(Value::String(emails)) => !emails.is_empty(),
            _ => false,
        }
    }

    pub fn has_company_website(&self) -> bool {
        self.get("company_url_direct").is_some_and(is_truthy)
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.get("is_remote"), Some(Value::Bool(true)))
    }

    /// Salary is exposed either under `compensation` or as flat fields.
    pub fn has_salary_info(&self) -> bool {
        let nested = self
            .get("compensation")
            .and_then(Value::as_object)
            .is_some_and(|comp| {
                ["min_amount", "max_amount"]
                    .iter()
                    .any(|key| comp.get(*key).is_some_and(is_truthy))
            });

        nested
            || ["min_amount", "max_amount"]
                .iter()
                .any(|key| self.get(key).is_some_and(is_truthy))
    }
}

/// Null, false, zero and "" carry no information.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =============================================================================
// Output Document
// =============================================================================

/// Run metadata written alongside the jobs.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub total_jobs: usize,
    pub location: String,
    pub country: String,
    pub search_terms: Vec<SearchTerm>,
    pub scraped_at: DateTime<Utc>,
}

/// The persisted artifact of a run.
#[derive(Debug, Serialize)]
pub struct OutputDocument<'a> {
    pub metadata: RunMetadata,
    pub jobs: &'a [JobRecord],
}

impl<'a> OutputDocument<'a> {
    /// `total_jobs` is always taken from `jobs`.
    pub fn new(
        location: impl Into<String>,
        country: impl Into<String>,
        search_terms: Vec<SearchTerm>,
        scraped_at: DateTime<Utc>,
        jobs: &'a [JobRecord],
    ) -> Self {
        Self {
            metadata: RunMetadata {
                total_jobs: jobs.len(),
                location: location.into(),
                country: country.into(),
                search_terms,
                scraped_at,
            },
            jobs,
        }
    }
}
