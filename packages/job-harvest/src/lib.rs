//! Indeed job harvest.
//!
//! Searches one job board for a fixed list of titles in one city, tags every
//! posting with the title that found it, prints summary statistics and saves
//! everything to a single dated JSON file.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod harvest;
pub mod kernel;
pub mod report;
pub mod runner;
pub mod types;
pub mod writer;

pub use aggregator::JobStats;
pub use config::{Config, HarvestConfig};
pub use harvest::HarvestSummary;
pub use kernel::{ApifyJobScraper, BaseJobScraper, MockJobScraper};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use runner::{QueryRunner, TermOutcome, TermReport};
pub use types::{JobQuery, JobRecord, JobType, OutputDocument, RunMetadata, SearchTerm};
pub use writer::WriteOutcome;
