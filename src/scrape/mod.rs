// src/scrape/mod.rs
pub mod adapters;
pub mod config;
pub mod registry;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use tokio::task::{self, JoinError, JoinSet};

use crate::query::ScrapeQuery;
use crate::scrape::registry::ScraperRegistry;
use crate::scrape::types::SourceOutcome;
use crate::site::Site;

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("scrape_runs_total", "Orchestrated scrape runs started.");
        describe_counter!("scrape_postings_total", "Postings returned by scrapers.");
        describe_counter!(
            "scrape_source_errors_total",
            "Sources that ended in a failure outcome."
        );
        describe_counter!(
            "scrape_skipped_total",
            "Malformed postings skipped during aggregation."
        );
        describe_histogram!("scrape_source_ms", "Per-source scrape time in milliseconds.");
        describe_histogram!("scrape_parse_ms", "Adapter parse time in milliseconds.");
    });
}

/// Fan the query out to every selected site and wait for all of them.
///
/// Returns exactly one outcome per requested site. Iteration order of the
/// returned map is completion order; callers should key by site, not
/// position. Nothing a scraper does (an `Err`, even a panic) escapes this
/// function; it all degrades to a `Failure` entry for that one site.
pub async fn run_all(
    query: &ScrapeQuery,
    registry: &ScraperRegistry,
) -> IndexMap<Site, SourceOutcome> {
    collect_outcomes(query, registry, None).await
}

/// Like [`run_all`], but races the all-complete barrier against a timer.
/// Sites still in flight at the deadline are abandoned and recorded as
/// `Failure("timeout")`.
pub async fn run_all_with_deadline(
    query: &ScrapeQuery,
    registry: &ScraperRegistry,
    deadline: Duration,
) -> IndexMap<Site, SourceOutcome> {
    collect_outcomes(query, registry, Some(deadline)).await
}

async fn collect_outcomes(
    query: &ScrapeQuery,
    registry: &ScraperRegistry,
    deadline: Option<Duration>,
) -> IndexMap<Site, SourceOutcome> {
    ensure_metrics_described();
    counter!("scrape_runs_total").increment(1);

    let mut outcomes: IndexMap<Site, SourceOutcome> = IndexMap::with_capacity(query.sites.len());
    let shared = Arc::new(query.clone());
    let mut join_set: JoinSet<(Site, SourceOutcome)> = JoinSet::new();
    // Task id → site, so a panicked task can still be mapped to its key.
    let mut in_flight: HashMap<task::Id, Site> = HashMap::new();

    for &site in &query.sites {
        let Some(scraper) = registry.get(site) else {
            // The query builder rejects these up front; stay total anyway
            // when handed an unvalidated query directly.
            tracing::warn!(site = %site, "no scraper registered");
            counter!("scrape_source_errors_total").increment(1);
            outcomes.insert(
                site,
                SourceOutcome::Failure(format!("no scraper registered for site {site}")),
            );
            continue;
        };
        let q = Arc::clone(&shared);
        let handle = join_set.spawn(async move {
            let t0 = std::time::Instant::now();
            let outcome = match scraper.scrape(&q).await {
                Ok(postings) => {
                    counter!("scrape_postings_total").increment(postings.len() as u64);
                    SourceOutcome::Success(postings)
                }
                Err(e) => {
                    tracing::warn!(error = ?e, site = %site, "scraper error");
                    counter!("scrape_source_errors_total").increment(1);
                    SourceOutcome::Failure(format!("{e:#}"))
                }
            };
            histogram!("scrape_source_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
            (site, outcome)
        });
        in_flight.insert(handle.id(), site);
    }

    match deadline {
        None => {
            while let Some(joined) = join_set.join_next_with_id().await {
                record(&mut outcomes, &mut in_flight, joined);
            }
        }
        Some(limit) => {
            let deadline = tokio::time::Instant::now() + limit;
            loop {
                tokio::select! {
                    joined = join_set.join_next_with_id() => match joined {
                        Some(res) => record(&mut outcomes, &mut in_flight, res),
                        None => break,
                    },
                    _ = tokio::time::sleep_until(deadline) => {
                        join_set.abort_all();
                        for (_, site) in in_flight.drain() {
                            tracing::warn!(site = %site, "deadline hit, abandoning source");
                            counter!("scrape_source_errors_total").increment(1);
                            outcomes.insert(site, SourceOutcome::Failure("timeout".to_string()));
                        }
                        break;
                    }
                }
            }
        }
    }

    outcomes
}

fn record(
    outcomes: &mut IndexMap<Site, SourceOutcome>,
    in_flight: &mut HashMap<task::Id, Site>,
    joined: Result<(task::Id, (Site, SourceOutcome)), JoinError>,
) {
    match joined {
        Ok((id, (site, outcome))) => {
            in_flight.remove(&id);
            outcomes.insert(site, outcome);
        }
        Err(err) => {
            let Some(site) = in_flight.remove(&err.id()) else {
                return;
            };
            let msg = if err.is_panic() {
                format!("scraper panicked: {err}")
            } else {
                format!("scraper task failed: {err}")
            };
            tracing::warn!(error = %err, site = %site, "scraper task died");
            counter!("scrape_source_errors_total").increment(1);
            outcomes.insert(site, SourceOutcome::Failure(msg));
        }
    }
}
