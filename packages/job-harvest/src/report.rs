//! Operator-facing console output.

use console::style;
use std::path::Path;
use std::time::Duration;

use crate::aggregator::JobStats;
use crate::config::HarvestConfig;
use crate::runner::{total_delay, TermOutcome, TermReport};
use crate::types::SearchTerm;
use crate::writer::WriteOutcome;

const RULE_WIDTH: usize = 60;

/// Progress hooks called as the run advances. All default to no-ops.
pub trait Reporter {
    fn banner(&mut self, _config: &HarvestConfig) {}

    fn term_started(&mut self, _term: &SearchTerm, _location: &str) {}

    fn term_finished(&mut self, _report: &TermReport) {}

    fn waiting(&mut self, _delay: Duration) {}

    fn statistics(&mut self, _stats: &JobStats, _config: &HarvestConfig) {}

    fn saved(&mut self, _outcome: &WriteOutcome, _config: &HarvestConfig) {}
}

/// Reporter that prints nothing; tracing still records the run.
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Human-readable progress on stdout.
#[derive(Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn rule(&self) {
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    fn heading(&self, title: &str) {
        println!();
        self.rule();
        println!("{}", style(title).bold());
        self.rule();
    }
}

impl Reporter for ConsoleReporter {
    fn banner(&mut self, config: &HarvestConfig) {
        self.rule();
        println!(
            "{}",
            style(format!("Indeed Jobs Harvest - {}", config.location)).bold()
        );
        self.rule();
        println!(
            "Location: {}, {}",
            config.location,
            config.country_display()
        );
        println!("Job board: Indeed");
        println!(
            "Search terms: {} (last {} hours, up to {} results each)",
            config.search_terms.len(),
            config.hours_old,
            config.results_wanted
        );
        println!(
            "Rate limiting: {}s between searches ({}s total)",
            config.delay.as_secs_f64(),
            total_delay(config).as_secs_f64()
        );
        self.rule();
    }

    fn term_started(&mut self, term: &SearchTerm, location: &str) {
        println!();
        println!(
            "{} \"{}\" in {}...",
            style("Searching for").cyan(),
            term,
            location
        );
    }

    fn term_finished(&mut self, report: &TermReport) {
        let term = &report.search_term;
        match &report.outcome {
            TermOutcome::Found(count) => println!(
                "  {}",
                style(format!("Found {} jobs for \"{}\"", count, term)).green()
            ),
            TermOutcome::Empty => println!(
                "  {}",
                style(format!("No jobs found for \"{}\"", term)).yellow()
            ),
            TermOutcome::Failed(message) => println!(
                "  {}",
                style(format!("Error scraping \"{}\": {}", term, message)).red()
            ),
        }
    }

    fn waiting(&mut self, delay: Duration) {
        println!(
            "  {}",
            style(format!(
                "Waiting {} seconds before next search...",
                delay.as_secs_f64()
            ))
            .dim()
        );
    }

    fn statistics(&mut self, stats: &JobStats, config: &HarvestConfig) {
        self.heading("Summary Statistics");
        println!("  Total jobs: {}", stats.total_jobs);
        println!("  Search terms used: {}", config.search_terms.len());

        if stats.total_jobs == 0 {
            return;
        }

        println!();
        println!(
            "{}",
            style(format!("Top {} Companies:", config.top_companies)).bold()
        );
        for (company, count) in stats.top_companies(config.top_companies) {
            println!("  {}: {} jobs", company, count);
        }

        println!();
        println!("  Jobs with contact emails: {}", stats.with_emails);
        println!("  Jobs with company website: {}", stats.with_website);
        println!("  Remote jobs: {}", stats.remote);
        println!("  Jobs with salary info: {}", stats.with_salary);
    }

    fn saved(&mut self, outcome: &WriteOutcome, config: &HarvestConfig) {
        self.heading("Output");
        match outcome {
            WriteOutcome::Written { path, bytes } => {
                println!(
                    "{} {}",
                    style("Saved:").green().bold(),
                    file_name(path)
                );
                println!("File size: {}", format_kb(*bytes));
                println!("Saved in directory: {}", display_dir(&config.output_dir));
            }
            WriteOutcome::Skipped => {
                println!("{}", style("No jobs to save").yellow());
            }
        }
        self.rule();
        println!("{}", style("Harvest complete").green().bold());
        self.rule();
    }
}

/// Bytes as KB with two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Absolute form of the output directory when it can be resolved.
fn display_dir(dir: &Path) -> String {
    std::fs::canonicalize(dir)
        .unwrap_or_else(|_| dir.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0), "0.00 KB");
        assert_eq!(format_kb(1024), "1.00 KB");
        assert_eq!(format_kb(1536), "1.50 KB");
        assert_eq!(format_kb(100), "0.10 KB");
    }

    #[test]
    fn test_file_name_falls_back_to_full_path() {
        assert_eq!(
            file_name(&PathBuf::from("/tmp/out/amsterdam_all_jobs_2024-03-07.json")),
            "amsterdam_all_jobs_2024-03-07.json"
        );
        assert_eq!(file_name(&PathBuf::from("/")), "/");
    }
}
