// src/error.rs
use crate::site::Site;
use thiserror::Error;

/// Configuration faults raised before any scraper runs.
///
/// Everything that happens *after* dispatch is contained at the scrape
/// boundary and reported as data (see `SourceOutcome`); only these
/// pre-dispatch defects propagate to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown site: {0:?}")]
    UnknownSite(String),

    #[error("unknown country: {0:?}")]
    UnknownCountry(String),

    #[error("no scraper registered for site {0}")]
    UnregisteredSite(Site),

    #[error("no sites selected")]
    NoSites,
}
