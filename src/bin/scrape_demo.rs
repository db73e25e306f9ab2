//! Demo that runs one scrape over embedded fixture feeds and prints the
//! resulting tables as TSV.

use jobscout::scrape::adapters::feed::JsonFeedScraper;
use jobscout::{ScrapeQueryBuilder, ScraperRegistry, Site};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let mut registry = ScraperRegistry::new();
    registry.register(JsonFeedScraper::from_fixture(
        Site::Indeed,
        include_str!("../../tests/fixtures/indeed_feed.json"),
    ));
    registry.register(JsonFeedScraper::from_fixture(
        Site::ZipRecruiter,
        include_str!("../../tests/fixtures/zip_recruiter_feed.json"),
    ));

    let query = ScrapeQueryBuilder::new(["indeed", "zip_recruiter"], "engineer")
        .location("Austin, TX")
        .results_wanted(10)
        .build(&registry)?;

    let report = jobscout::scrape_jobs(&registry, &query).await;

    println!("{}", report.jobs.columns().join("\t"));
    for row in report.jobs.rows() {
        println!("{}", row.cells().join("\t"));
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", jobscout::ErrorTable::COLUMNS.join("\t"));
        for row in report.errors.rows() {
            println!("{}\t{}", row.site, row.error);
        }
    }

    println!("scrape-demo done");
    Ok(())
}
