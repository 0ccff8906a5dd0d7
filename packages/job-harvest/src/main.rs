// Entry point for the job harvest CLI

use anyhow::{Context, Result};
use clap::Parser;
use job_harvest::{cli::Cli, harvest, ApifyJobScraper, Config, ConsoleReporter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_harvest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env().context("Failed to load configuration")?;
    cli.apply(&mut config.harvest)
        .context("Invalid command-line arguments")?;
    tracing::info!(
        location = %config.harvest.location,
        terms = config.harvest.search_terms.len(),
        "Configuration loaded"
    );

    let scraper = ApifyJobScraper::from_config(&config)?;
    let mut reporter = ConsoleReporter::new();

    match harvest::run(&scraper, &config.harvest, &mut reporter).await {
        Ok(summary) => {
            tracing::info!(total = summary.stats.total_jobs, "Harvest finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Harvest failed");
            Err(e)
        }
    }
}
