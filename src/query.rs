// src/query.rs
use serde::Serialize;

use crate::error::ConfigError;
use crate::jobs::{Country, JobType};
use crate::scrape::registry::ScraperRegistry;
use crate::site::{Site, SiteSelector};

/// A validated scrape request, shared read-only across all worker tasks.
///
/// Construct through [`ScrapeQueryBuilder`]; every value that gets here has
/// already been resolved against the registry, so the orchestrator never
/// trips over an unknown or unregistered site mid-flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeQuery {
    /// Resolved selection, first-seen order, no duplicates. Execution
    /// order is unrelated; this order only matters for reporting.
    pub sites: Vec<Site>,
    pub search_term: String,
    pub location: String,
    pub distance: Option<u32>,
    pub is_remote: bool,
    pub job_type: Option<JobType>,
    pub easy_apply: bool,
    pub results_wanted: usize,
    pub country: Country,
    pub hyperlinks: bool,
}

/// Builder carrying the entry-point defaults: empty location, no distance,
/// not remote-only, no job-type filter, no easy-apply, 15 results, "usa",
/// plain URLs.
#[derive(Debug, Clone)]
pub struct ScrapeQueryBuilder {
    selectors: Vec<SiteSelector>,
    search_term: String,
    location: String,
    distance: Option<u32>,
    is_remote: bool,
    job_type: Option<JobType>,
    easy_apply: bool,
    results_wanted: usize,
    country: String,
    hyperlinks: bool,
}

impl ScrapeQueryBuilder {
    pub fn new<I, S>(sites: I, search_term: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SiteSelector>,
    {
        Self {
            selectors: sites.into_iter().map(Into::into).collect(),
            search_term: search_term.into(),
            location: String::new(),
            distance: None,
            is_remote: false,
            job_type: None,
            easy_apply: false,
            results_wanted: 15,
            country: "usa".to_string(),
            hyperlinks: false,
        }
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn distance(mut self, miles: u32) -> Self {
        self.distance = Some(miles);
        self
    }

    pub fn remote(mut self, is_remote: bool) -> Self {
        self.is_remote = is_remote;
        self
    }

    pub fn job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    pub fn easy_apply(mut self, easy_apply: bool) -> Self {
        self.easy_apply = easy_apply;
        self
    }

    pub fn results_wanted(mut self, n: usize) -> Self {
        self.results_wanted = n;
        self
    }

    /// Free-form country context, parsed at build time.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn hyperlinks(mut self, hyperlinks: bool) -> Self {
        self.hyperlinks = hyperlinks;
        self
    }

    /// Validate and freeze the query. Fails fast, before any dispatch:
    /// unknown selector tokens, an unparseable country, an empty selection,
    /// or a resolved site with no registered scraper all reject here.
    pub fn build(self, registry: &ScraperRegistry) -> Result<ScrapeQuery, ConfigError> {
        let mut sites: Vec<Site> = Vec::with_capacity(self.selectors.len());
        for selector in &self.selectors {
            let site = selector.resolve()?;
            if !sites.contains(&site) {
                sites.push(site);
            }
        }
        if sites.is_empty() {
            return Err(ConfigError::NoSites);
        }
        for &site in &sites {
            if !registry.contains(site) {
                return Err(ConfigError::UnregisteredSite(site));
            }
        }
        let country = Country::from_string(&self.country)?;

        Ok(ScrapeQuery {
            sites,
            search_term: self.search_term,
            location: self.location,
            distance: self.distance,
            is_remote: self.is_remote,
            job_type: self.job_type,
            easy_apply: self.easy_apply,
            results_wanted: self.results_wanted,
            country,
            hyperlinks: self.hyperlinks,
        })
    }
}
