// tests/feed_adapter.rs
use jobscout::scrape::adapters::feed::JsonFeedScraper;
use jobscout::{CompensationInterval, JobType, ScrapeQueryBuilder, Scraper, ScraperRegistry, Site};

const INDEED_FEED: &str = include_str!("fixtures/indeed_feed.json");

fn fixture_registry() -> ScraperRegistry {
    let mut registry = ScraperRegistry::new();
    registry.register(JsonFeedScraper::from_fixture(Site::Indeed, INDEED_FEED));
    registry
}

#[tokio::test]
async fn fixture_feed_parses_into_canonical_postings() {
    let registry = fixture_registry();
    let query = ScrapeQueryBuilder::new(["indeed"], "")
        .results_wanted(50)
        .build(&registry)
        .unwrap();

    let postings = registry
        .get(Site::Indeed)
        .unwrap()
        .scrape(&query)
        .await
        .unwrap();

    assert_eq!(postings.len(), 4);

    let first = &postings[0];
    assert_eq!(first.id, "in-3981");
    assert_eq!(first.title, "Senior Backend Engineer");
    assert_eq!(first.location.display_location(), "Austin, TX, USA");
    let comp = first.compensation.as_ref().unwrap();
    assert_eq!(comp.interval, CompensationInterval::Yearly);
    assert_eq!(comp.min_amount, Some(140_000.0));
    assert_eq!(comp.currency, "USD");

    // Missing currency defaults, loose job-type spellings resolve.
    let second = &postings[1];
    assert_eq!(second.compensation.as_ref().unwrap().currency, "USD");
    assert_eq!(second.job_type, vec![JobType::FullTime, JobType::Contract]);

    // No compensation block at all stays None.
    assert!(postings[3].compensation.is_none());
}

#[tokio::test]
async fn search_term_filters_titles_case_insensitively() {
    let registry = fixture_registry();
    let query = ScrapeQueryBuilder::new(["indeed"], "ENGINEER")
        .results_wanted(50)
        .build(&registry)
        .unwrap();

    let postings = registry
        .get(Site::Indeed)
        .unwrap()
        .scrape(&query)
        .await
        .unwrap();

    assert_eq!(postings.len(), 3);
    assert!(postings
        .iter()
        .all(|p| p.title.to_ascii_lowercase().contains("engineer")));
}

#[tokio::test]
async fn results_wanted_caps_adapter_output() {
    let registry = fixture_registry();
    let query = ScrapeQueryBuilder::new(["indeed"], "")
        .results_wanted(2)
        .build(&registry)
        .unwrap();

    let postings = registry
        .get(Site::Indeed)
        .unwrap()
        .scrape(&query)
        .await
        .unwrap();
    assert_eq!(postings.len(), 2);
}

#[tokio::test]
async fn malformed_feed_document_is_an_error() {
    let mut registry = ScraperRegistry::new();
    registry.register(JsonFeedScraper::from_fixture(Site::Indeed, "not json"));
    let query = ScrapeQueryBuilder::new(["indeed"], "")
        .build(&registry)
        .unwrap();

    let err = registry
        .get(Site::Indeed)
        .unwrap()
        .scrape(&query)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("feed json"));
}
