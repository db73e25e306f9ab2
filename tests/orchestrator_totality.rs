// tests/orchestrator_totality.rs
use anyhow::{bail, Result};
use async_trait::async_trait;
use jobscout::{
    scrape, JobPosting, Location, ScrapeQueryBuilder, Scraper, ScraperRegistry, Site, SourceOutcome,
};
use std::time::Duration;

fn posting(id: &str) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: "Engineer".to_string(),
        company_name: "Acme".to_string(),
        location: Location::default(),
        job_type: vec![],
        compensation: None,
        job_url: format!("https://example.test/{id}"),
        description: None,
    }
}

struct OkScraper {
    site: Site,
    count: usize,
}

#[async_trait]
impl Scraper for OkScraper {
    async fn scrape(&self, _query: &jobscout::ScrapeQuery) -> Result<Vec<JobPosting>> {
        Ok((0..self.count).map(|i| posting(&format!("{i}"))).collect())
    }
    fn site(&self) -> Site {
        self.site
    }
}

struct FailingScraper {
    site: Site,
}

#[async_trait]
impl Scraper for FailingScraper {
    async fn scrape(&self, _query: &jobscout::ScrapeQuery) -> Result<Vec<JobPosting>> {
        bail!("connection reset by peer")
    }
    fn site(&self) -> Site {
        self.site
    }
}

struct PanickingScraper {
    site: Site,
}

#[async_trait]
impl Scraper for PanickingScraper {
    async fn scrape(&self, _query: &jobscout::ScrapeQuery) -> Result<Vec<JobPosting>> {
        panic!("scraper bug")
    }
    fn site(&self) -> Site {
        self.site
    }
}

struct SlowScraper {
    site: Site,
    delay: Duration,
}

#[async_trait]
impl Scraper for SlowScraper {
    async fn scrape(&self, _query: &jobscout::ScrapeQuery) -> Result<Vec<JobPosting>> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![posting("slow")])
    }
    fn site(&self) -> Site {
        self.site
    }
}

#[tokio::test]
async fn one_outcome_per_requested_site_even_when_scrapers_die() {
    let mut registry = ScraperRegistry::new();
    registry.register(OkScraper {
        site: Site::Indeed,
        count: 2,
    });
    registry.register(FailingScraper {
        site: Site::LinkedIn,
    });
    registry.register(PanickingScraper {
        site: Site::ZipRecruiter,
    });

    let query = ScrapeQueryBuilder::new(
        [Site::Indeed, Site::LinkedIn, Site::ZipRecruiter],
        "engineer",
    )
    .build(&registry)
    .unwrap();

    let outcomes = scrape::run_all(&query, &registry).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[&Site::Indeed].postings().len(), 2);

    match &outcomes[&Site::LinkedIn] {
        SourceOutcome::Failure(msg) => assert!(msg.contains("connection reset")),
        other => panic!("expected failure, got {other:?}"),
    }

    match &outcomes[&Site::ZipRecruiter] {
        SourceOutcome::Failure(msg) => {
            assert!(!msg.is_empty());
            assert!(msg.contains("panicked"));
        }
        other => panic!("expected failure, got {other:?}"),
    }

    // A failure outcome carries zero postings.
    assert!(outcomes[&Site::LinkedIn].postings().is_empty());
}

#[tokio::test]
async fn unregistered_site_degrades_to_failure_when_bypassing_the_builder() {
    // run_all stays total even for a query the builder never validated.
    let mut registry = ScraperRegistry::new();
    registry.register(OkScraper {
        site: Site::Indeed,
        count: 1,
    });
    let query = jobscout::ScrapeQuery {
        sites: vec![Site::Indeed, Site::Goozali],
        search_term: "engineer".to_string(),
        location: String::new(),
        distance: None,
        is_remote: false,
        job_type: None,
        easy_apply: false,
        results_wanted: 15,
        country: jobscout::Country::Usa,
        hyperlinks: false,
    };

    let outcomes = scrape::run_all(&query, &registry).await;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[&Site::Goozali].is_failure());
}

#[tokio::test]
async fn deadline_abandons_in_flight_sources_as_timeouts() {
    let mut registry = ScraperRegistry::new();
    registry.register(OkScraper {
        site: Site::Indeed,
        count: 1,
    });
    registry.register(SlowScraper {
        site: Site::LinkedIn,
        delay: Duration::from_secs(30),
    });

    let query = ScrapeQueryBuilder::new([Site::Indeed, Site::LinkedIn], "engineer")
        .build(&registry)
        .unwrap();

    let outcomes =
        scrape::run_all_with_deadline(&query, &registry, Duration::from_millis(100)).await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[&Site::Indeed].postings().len(), 1);
    assert_eq!(
        outcomes[&Site::LinkedIn],
        SourceOutcome::Failure("timeout".to_string())
    );
}
