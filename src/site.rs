// src/site.rs
// Closed vocabulary of supported job boards. New boards are added here and
// registered in a `ScraperRegistry`; the orchestrator itself never changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    #[serde(rename = "linkedin")]
    LinkedIn,
    Indeed,
    ZipRecruiter,
    Goozali,
}

impl Site {
    pub const ALL: [Site; 4] = [
        Site::LinkedIn,
        Site::Indeed,
        Site::ZipRecruiter,
        Site::Goozali,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::LinkedIn => "linkedin",
            Site::Indeed => "indeed",
            Site::ZipRecruiter => "zip_recruiter",
            Site::Goozali => "goozali",
        }
    }

    /// Case-insensitive resolution of a raw selector token.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Site::LinkedIn),
            "indeed" => Ok(Site::Indeed),
            "zip_recruiter" | "ziprecruiter" => Ok(Site::ZipRecruiter),
            "goozali" => Ok(Site::Goozali),
            _ => Err(ConfigError::UnknownSite(token.to_string())),
        }
    }
}

impl FromStr for Site {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::parse(s)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What callers hand to the query builder: either a raw token to resolve
/// or an already-typed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelector {
    Name(String),
    Site(Site),
}

impl SiteSelector {
    pub fn resolve(&self) -> Result<Site, ConfigError> {
        match self {
            SiteSelector::Name(token) => Site::parse(token),
            SiteSelector::Site(site) => Ok(*site),
        }
    }
}

impl From<&str> for SiteSelector {
    fn from(s: &str) -> Self {
        SiteSelector::Name(s.to_string())
    }
}

impl From<String> for SiteSelector {
    fn from(s: String) -> Self {
        SiteSelector::Name(s)
    }
}

impl From<Site> for SiteSelector {
    fn from(site: Site) -> Self {
        SiteSelector::Site(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_case_insensitive() {
        assert_eq!(Site::parse("LinkedIn").unwrap(), Site::LinkedIn);
        assert_eq!(Site::parse("INDEED").unwrap(), Site::Indeed);
        assert_eq!(Site::parse("ZipRecruiter").unwrap(), Site::ZipRecruiter);
        assert_eq!(Site::parse(" zip_recruiter ").unwrap(), Site::ZipRecruiter);
    }

    #[test]
    fn unknown_token_names_the_offender() {
        let err = Site::parse("monster").unwrap_err();
        assert_eq!(err, ConfigError::UnknownSite("monster".to_string()));
        assert!(err.to_string().contains("monster"));
    }

    #[test]
    fn selector_accepts_both_shapes() {
        let raw: SiteSelector = "indeed".into();
        let typed: SiteSelector = Site::Indeed.into();
        assert_eq!(raw.resolve().unwrap(), typed.resolve().unwrap());
    }
}
