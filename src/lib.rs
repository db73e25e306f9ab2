// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod error;
pub mod jobs;
pub mod query;
pub mod scrape;
pub mod site;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{ErrorRow, ErrorTable, JobRow, JobTable, ScrapeReport};
pub use crate::error::ConfigError;
pub use crate::jobs::{
    Compensation, CompensationInterval, Country, JobPosting, JobType, Location,
};
pub use crate::query::{ScrapeQuery, ScrapeQueryBuilder};
pub use crate::scrape::registry::ScraperRegistry;
pub use crate::scrape::types::{Scraper, SourceOutcome};
pub use crate::site::{Site, SiteSelector};

use tracing::info;

/// Run one scrape across every site selected by `query` and fold the
/// per-site outcomes into a unified report.
///
/// Source failures never surface as errors here: a site that faulted is a
/// row in `report.errors`, and the success table is whatever the remaining
/// sites produced. Configuration problems are caught earlier, by
/// [`ScrapeQueryBuilder::build`].
///
/// ```ignore
/// let query = ScrapeQueryBuilder::new(["indeed", "zip_recruiter"], "rust developer")
///     .location("Austin, TX")
///     .results_wanted(20)
///     .build(&registry)?;
/// let report = jobscout::scrape_jobs(&registry, &query).await;
/// ```
pub async fn scrape_jobs(registry: &ScraperRegistry, query: &ScrapeQuery) -> ScrapeReport {
    let outcomes = scrape::run_all(query, registry).await;
    let report = aggregate::aggregate(outcomes, query.hyperlinks);
    info!(
        jobs = report.jobs.len(),
        source_errors = report.errors.len(),
        "scrape finished"
    );
    report
}
