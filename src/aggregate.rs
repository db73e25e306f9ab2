// src/aggregate.rs
// Folds per-site outcomes into the unified tabular report. The column
// schema is fixed; only the URL column's name varies with the hyperlinks
// flag.

use indexmap::IndexMap;
use metrics::counter;
use serde::Serialize;

use crate::jobs::{CompensationInterval, JobPosting, JobType};
use crate::scrape::types::SourceOutcome;
use crate::site::Site;

/// One row of the success table, already normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRow {
    pub site: Site,
    pub title: String,
    pub company: String,
    /// `"City, State, Country"` with absent parts collapsed.
    pub location: String,
    /// First classification on the posting, if any.
    pub job_type: Option<JobType>,
    pub interval: Option<CompensationInterval>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub currency: Option<String>,
    /// Raw canonical URL, or the anchor-wrapped form when the table was
    /// built with hyperlinks enabled.
    pub job_url: String,
    pub description: Option<String>,
}

impl JobRow {
    /// Project the row to display strings, in column order. Absent values
    /// render as the empty string.
    pub fn cells(&self) -> [String; 11] {
        [
            self.site.as_str().to_string(),
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.job_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            self.interval
                .map(|i| i.as_str().to_string())
                .unwrap_or_default(),
            self.min_amount.map(|v| v.to_string()).unwrap_or_default(),
            self.max_amount.map(|v| v.to_string()).unwrap_or_default(),
            self.currency.clone().unwrap_or_default(),
            self.job_url.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

/// Ordered success table. Empty results still expose the full schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobTable {
    hyperlinks: bool,
    rows: Vec<JobRow>,
}

impl JobTable {
    pub fn columns(&self) -> [&'static str; 11] {
        columns(self.hyperlinks)
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fixed column schema. Exactly one of `job_url` / `job_url_hyper` exists.
pub fn columns(hyperlinks: bool) -> [&'static str; 11] {
    [
        "site",
        "title",
        "company",
        "location",
        "job_type",
        "interval",
        "min_amount",
        "max_amount",
        "currency",
        if hyperlinks { "job_url_hyper" } else { "job_url" },
        "description",
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRow {
    pub site: Site,
    pub error: String,
}

/// One row per site that ended in a failure outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorTable {
    rows: Vec<ErrorRow>,
}

impl ErrorTable {
    pub const COLUMNS: [&'static str; 2] = ["site", "error"];

    pub fn rows(&self) -> &[ErrorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The pair every scrape returns: jobs that made it, sites that didn't.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeReport {
    pub jobs: JobTable,
    pub errors: ErrorTable,
}

/// Flatten per-site outcomes into the report. Success postings keep their
/// adapter order within each site, sites appear in completion order, and
/// the site tag is attached here; scrapers never see it.
pub fn aggregate(outcomes: IndexMap<Site, SourceOutcome>, hyperlinks: bool) -> ScrapeReport {
    crate::scrape::ensure_metrics_described();

    let mut rows = Vec::new();
    let mut error_rows = Vec::new();

    for (site, outcome) in outcomes {
        match outcome {
            SourceOutcome::Success(postings) => {
                for posting in &postings {
                    match project(site, posting, hyperlinks) {
                        Some(row) => rows.push(row),
                        None => {
                            tracing::warn!(site = %site, id = %posting.id, "skipping malformed posting");
                            counter!("scrape_skipped_total").increment(1);
                        }
                    }
                }
            }
            SourceOutcome::Failure(error) => error_rows.push(ErrorRow { site, error }),
        }
    }

    ScrapeReport {
        jobs: JobTable { hyperlinks, rows },
        errors: ErrorTable { rows: error_rows },
    }
}

/// Pure projection of one posting into a row. A posting the types admit
/// but the schema can't use (empty id, title, or URL) projects to `None`.
fn project(site: Site, posting: &JobPosting, hyperlinks: bool) -> Option<JobRow> {
    if posting.id.is_empty() || posting.title.is_empty() || posting.job_url.is_empty() {
        return None;
    }

    let (interval, min_amount, max_amount, currency) = match &posting.compensation {
        Some(c) => (
            Some(c.interval),
            c.min_amount,
            c.max_amount,
            Some(c.currency.clone()),
        ),
        None => (None, None, None, None),
    };

    let job_url = if hyperlinks {
        hyperlink(&posting.job_url)
    } else {
        posting.job_url.clone()
    };

    Some(JobRow {
        site,
        title: posting.title.clone(),
        company: posting.company_name.clone(),
        location: posting.location.display_location(),
        job_type: posting.job_type.first().copied(),
        interval,
        min_amount,
        max_amount,
        currency,
        job_url,
        description: posting.description.clone(),
    })
}

/// Anchor tag wrapping the URL as both href and visible text.
fn hyperlink(url: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        html_escape::encode_double_quoted_attribute(url),
        html_escape::encode_text(url)
    )
}
