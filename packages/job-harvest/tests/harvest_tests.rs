//! Integration tests for a full harvest run.
//!
//! Drives `harvest::run` with a scripted scraper and checks:
//! - the collected jobs and their search-term tags
//! - the statistics handed to the reporter
//! - the file written (or not written) to disk

use job_harvest::harvest;
use job_harvest::{
    HarvestConfig, JobRecord, JobStats, MockJobScraper, Reporter, SearchTerm, SilentReporter,
    TermOutcome, TermReport, WriteOutcome,
};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

// =============================================================================
// Test Helpers
// =============================================================================

fn config_in(dir: &Path, terms: &[&str]) -> HarvestConfig {
    HarvestConfig {
        search_terms: terms.iter().map(|t| SearchTerm::new(*t).unwrap()).collect(),
        delay: Duration::ZERO,
        output_dir: dir.to_path_buf(),
        ..HarvestConfig::default()
    }
}

fn job(value: Value) -> JobRecord {
    serde_json::from_value(value).unwrap()
}

fn read_output(outcome: &WriteOutcome) -> Value {
    match outcome {
        WriteOutcome::Written { path, .. } => {
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
        }
        WriteOutcome::Skipped => panic!("expected a written file"),
    }
}

/// Records the order of reporter callbacks.
#[derive(Default)]
struct RecordingReporter {
    events: Vec<String>,
    stats: Option<JobStats>,
}

impl Reporter for RecordingReporter {
    fn banner(&mut self, _config: &HarvestConfig) {
        self.events.push("banner".to_string());
    }

    fn term_started(&mut self, term: &SearchTerm, _location: &str) {
        self.events.push(format!("start:{}", term));
    }

    fn term_finished(&mut self, report: &TermReport) {
        self.events.push(format!("done:{}", report.search_term));
    }

    fn statistics(&mut self, stats: &JobStats, _config: &HarvestConfig) {
        self.events.push("statistics".to_string());
        self.stats = Some(stats.clone());
    }

    fn saved(&mut self, _outcome: &WriteOutcome, _config: &HarvestConfig) {
        self.events.push("saved".to_string());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_failed_term_does_not_abort_run() {
    let dir = tempfile::tempdir().unwrap();
    let scraper = MockJobScraper::new()
        .with_jobs(
            "AI Engineer",
            vec![
                job(json!({ "title": "AI Engineer", "company_name": "Acme" })),
                job(json!({ "title": "Applied AI", "company_name": "Globex" })),
                job(json!({ "title": "AI Lead", "company_name": "Acme" })),
            ],
        )
        .with_error("ML Engineer", "Indeed responded with status code: 429");
    let config = config_in(dir.path(), &["AI Engineer", "ML Engineer"]);

    let summary = harvest::run(&scraper, &config, &mut SilentReporter)
        .await
        .unwrap();

    assert_eq!(summary.jobs.len(), 3);
    assert!(summary
        .jobs
        .iter()
        .all(|j| j.search_term() == Some("AI Engineer")));
    assert_eq!(summary.terms[0].outcome, TermOutcome::Found(3));
    assert!(matches!(summary.terms[1].outcome, TermOutcome::Failed(_)));

    let doc = read_output(&summary.output);
    assert_eq!(doc["metadata"]["total_jobs"], 3);
    assert_eq!(doc["jobs"].as_array().unwrap().len(), 3);
    assert_eq!(doc["jobs"][1]["search_term"], "AI Engineer");
}

#[tokio::test]
async fn test_collection_length_matches_per_term_counts() {
    let dir = tempfile::tempdir().unwrap();
    let scraper = MockJobScraper::new()
        .with_jobs("a", vec![job(json!({})), job(json!({}))])
        .with_jobs("c", vec![job(json!({})); 4])
        .with_error("d", "timeout");
    let terms = ["a", "b", "c", "d"];
    let config = config_in(dir.path(), &terms);

    let summary = harvest::run(&scraper, &config, &mut SilentReporter)
        .await
        .unwrap();

    let found: usize = summary
        .terms
        .iter()
        .map(|t| match t.outcome {
            TermOutcome::Found(n) => n,
            _ => 0,
        })
        .sum();
    assert_eq!(found, 6);
    assert_eq!(summary.jobs.len(), found);
    assert_eq!(summary.stats.total_jobs, summary.jobs.len());
    assert!(summary.jobs.iter().all(|j| {
        let tag = j.search_term().unwrap();
        !tag.is_empty() && terms.contains(&tag)
    }));
    assert_eq!(scraper.searched_terms(), terms);
}

#[tokio::test]
async fn test_duplicate_postings_are_kept_per_term() {
    let dir = tempfile::tempdir().unwrap();
    let posting = job(json!({ "id": "in-123", "company_name": "Acme" }));
    let scraper = MockJobScraper::new()
        .with_jobs("AI Engineer", vec![posting.clone()])
        .with_jobs("ML Engineer", vec![posting]);
    let config = config_in(dir.path(), &["AI Engineer", "ML Engineer"]);

    let summary = harvest::run(&scraper, &config, &mut SilentReporter)
        .await
        .unwrap();

    assert_eq!(summary.jobs.len(), 2);
    assert_eq!(summary.jobs[0].search_term(), Some("AI Engineer"));
    assert_eq!(summary.jobs[1].search_term(), Some("ML Engineer"));
    assert_eq!(summary.stats.companies.get("Acme"), Some(&2));
}

#[tokio::test]
async fn test_no_jobs_means_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let scraper = MockJobScraper::new().with_error("AI Engineer", "blocked");
    let config = config_in(dir.path(), &["AI Engineer", "NLP Engineer"]);

    let summary = harvest::run(&scraper, &config, &mut SilentReporter)
        .await
        .unwrap();

    assert_eq!(summary.output, WriteOutcome::Skipped);
    assert_eq!(summary.stats.total_jobs, 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_rerun_same_day_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), &["AI Engineer"]);

    let first = MockJobScraper::new().with_jobs("AI Engineer", vec![job(json!({})); 5]);
    let first_run = harvest::run(&first, &config, &mut SilentReporter)
        .await
        .unwrap();

    let second = MockJobScraper::new().with_jobs("AI Engineer", vec![job(json!({})); 2]);
    let second_run = harvest::run(&second, &config, &mut SilentReporter)
        .await
        .unwrap();

    let (first_path, second_path) = match (&first_run.output, &second_run.output) {
        (WriteOutcome::Written { path: a, .. }, WriteOutcome::Written { path: b, .. }) => (a, b),
        other => panic!("expected two writes, got {:?}", other),
    };
    // Runs straddling midnight UTC legitimately produce two files
    if first_path == second_path {
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    let doc = read_output(&second_run.output);
    assert_eq!(doc["metadata"]["total_jobs"], 2);
}

#[tokio::test]
async fn test_metadata_and_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let scraper = MockJobScraper::new().with_jobs(
        "AI Engineer",
        vec![
            job(json!({
                "company_name": "Acme",
                "emails": ["jobs@acme.io"],
                "company_url_direct": "https://acme.io",
                "is_remote": true,
                "compensation": { "min_amount": 50000 }
            })),
            job(json!({ "company_name": "Acme", "min_amount": null })),
            job(json!({ "company_name": "Globex", "max_amount": 80000 })),
        ],
    );
    let config = config_in(dir.path(), &["AI Engineer", "ML Engineer"]);
    let mut reporter = RecordingReporter::default();

    let summary = harvest::run(&scraper, &config, &mut reporter).await.unwrap();

    assert_eq!(
        reporter.events,
        vec![
            "banner",
            "start:AI Engineer",
            "done:AI Engineer",
            "start:ML Engineer",
            "done:ML Engineer",
            "statistics",
            "saved",
        ]
    );

    let stats = reporter.stats.unwrap();
    assert_eq!(stats.top_companies(10), vec![("Acme", 2), ("Globex", 1)]);
    assert_eq!(stats.jobs_with_company(), 3);
    assert_eq!(stats.with_emails, 1);
    assert_eq!(stats.with_website, 1);
    assert_eq!(stats.remote, 1);
    assert_eq!(stats.with_salary, 2);

    let doc = read_output(&summary.output);
    assert_eq!(doc["metadata"]["location"], "Amsterdam");
    assert_eq!(doc["metadata"]["country"], "Netherlands");
    assert_eq!(
        doc["metadata"]["search_terms"],
        json!(["AI Engineer", "ML Engineer"])
    );
    assert!(doc["metadata"]["scraped_at"].as_str().is_some());
    assert_eq!(doc["jobs"][0]["compensation"]["min_amount"], 50000);
}

#[tokio::test]
async fn test_write_failure_surfaces_after_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let scraper = MockJobScraper::new().with_jobs("AI Engineer", vec![job(json!({}))]);
    let config = config_in(&dir.path().join("missing"), &["AI Engineer"]);
    let mut reporter = RecordingReporter::default();

    let result = harvest::run(&scraper, &config, &mut reporter).await;

    assert!(result.is_err());
    assert!(reporter.events.contains(&"statistics".to_string()));
    assert!(!reporter.events.contains(&"saved".to_string()));
}
