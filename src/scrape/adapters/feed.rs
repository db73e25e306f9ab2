use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use serde::Deserialize;

use crate::jobs::{Compensation, CompensationInterval, JobPosting, JobType, Location};
use crate::query::ScrapeQuery;
use crate::scrape::types::Scraper;
use crate::site::Site;

#[derive(Debug, Deserialize)]
struct Feed {
    jobs: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    id: Option<String>,
    title: Option<String>,
    company: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    #[serde(default)]
    job_type: Vec<String>,
    interval: Option<CompensationInterval>,
    min_amount: Option<f64>,
    max_amount: Option<f64>,
    currency: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

/// Generic scraper over a JSON job feed (`{"jobs": [...]}`).
///
/// Runs either off an embedded fixture document or against a live URL.
/// Honors the search term (case-insensitive title match) and caps its own
/// output at `results_wanted`; everything else in the query is board
/// semantics this adapter doesn't have.
pub struct JsonFeedScraper {
    site: Site,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl JsonFeedScraper {
    pub fn from_fixture(site: Site, body: &str) -> Self {
        Self {
            site,
            mode: Mode::Fixture(body.to_string()),
        }
    }

    pub fn from_url(site: Site, url: impl Into<String>) -> Self {
        Self {
            site,
            mode: Mode::Http {
                url: url.into(),
                client: reqwest::Client::new(),
            },
        }
    }

    fn parse_feed(&self, body: &str, query: &ScrapeQuery) -> Result<Vec<JobPosting>> {
        let t0 = std::time::Instant::now();
        let feed: Feed = serde_json::from_str(body)
            .with_context(|| format!("parsing {} feed json", self.site))?;

        let needle = query.search_term.trim().to_ascii_lowercase();
        let mut out = Vec::with_capacity(feed.jobs.len().min(query.results_wanted));
        for it in feed.jobs {
            if out.len() == query.results_wanted {
                break;
            }
            let Some(posting) = convert(it) else { continue };
            if !needle.is_empty() && !posting.title.to_ascii_lowercase().contains(&needle) {
                continue;
            }
            out.push(posting);
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("scrape_parse_ms").record(ms);
        Ok(out)
    }
}

fn convert(it: FeedItem) -> Option<JobPosting> {
    let title = it.title?;
    let url = it.url?;
    let compensation = it.interval.map(|interval| Compensation {
        interval,
        min_amount: it.min_amount,
        max_amount: it.max_amount,
        currency: it.currency.unwrap_or_else(|| "USD".to_string()),
    });

    Some(JobPosting {
        // Feeds without stable ids key on the posting URL.
        id: it.id.unwrap_or_else(|| url.clone()),
        title,
        company_name: it.company.unwrap_or_default(),
        location: Location {
            city: it.city,
            state: it.state,
            country: it.country,
        },
        job_type: it
            .job_type
            .iter()
            .filter_map(|t| JobType::parse(t))
            .collect(),
        compensation,
        job_url: url,
        description: it.description,
    })
}

#[async_trait]
impl Scraper for JsonFeedScraper {
    async fn scrape(&self, query: &ScrapeQuery) -> Result<Vec<JobPosting>> {
        match &self.mode {
            Mode::Fixture(body) => self.parse_feed(body, query),

            Mode::Http { url, client } => {
                let body = match client.get(url).send().await {
                    Ok(resp) => resp
                        .error_for_status()
                        .with_context(|| format!("{} feed status", self.site))?
                        .text()
                        .await
                        .context("feed .text()")?,
                    Err(e) => {
                        tracing::warn!(error = ?e, site = %self.site, "feed http error");
                        return Err(e).with_context(|| format!("{} feed get()", self.site));
                    }
                };
                self.parse_feed(&body, query)
            }
        }
    }

    fn site(&self) -> Site {
        self.site
    }
}
