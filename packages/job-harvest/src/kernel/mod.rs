//! Kernel module - scraping infrastructure and test doubles.

pub mod apify_scraper;
pub mod test_dependencies;
pub mod traits;

pub use apify_scraper::ApifyJobScraper;
pub use test_dependencies::MockJobScraper;
pub use traits::*;
