// src/scrape/types.rs
use anyhow::Result;
use serde::Serialize;

use crate::jobs::JobPosting;
use crate::query::ScrapeQuery;
use crate::site::Site;

/// Capability contract every board adapter implements.
///
/// A scraper reads whatever query fields apply to its board and returns its
/// postings, capped at `query.results_wanted` by its own means. Errors are
/// ordinary `Err` values; the orchestrator converts anything that escapes a
/// scraper (including a panic) into a [`SourceOutcome::Failure`], so no
/// adapter misbehavior can take down the run.
#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, query: &ScrapeQuery) -> Result<Vec<JobPosting>>;
    fn site(&self) -> Site;
}

/// What one site produced: its postings, or a message saying why not.
/// Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SourceOutcome {
    Success(Vec<JobPosting>),
    Failure(String),
}

impl SourceOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SourceOutcome::Failure(_))
    }

    /// Postings for a success outcome; a failure has none by construction.
    pub fn postings(&self) -> &[JobPosting] {
        match self {
            SourceOutcome::Success(postings) => postings,
            SourceOutcome::Failure(_) => &[],
        }
    }
}
