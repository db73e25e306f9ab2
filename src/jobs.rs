// src/jobs.rs
// Canonical posting model every board is normalized into. Pure data;
// behavior lives in the aggregator.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One normalized job posting as produced by a scraper.
///
/// The originating site is *not* part of this record; scrapers don't know
/// how they were registered. The aggregator tags each row with its site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company_name: String,
    #[serde(default)]
    pub location: Location,
    /// Zero or more classifications; the first one is the display value.
    #[serde(default)]
    pub job_type: Vec<JobType>,
    pub compensation: Option<Compensation>,
    pub job_url: String,
    pub description: Option<String>,
}

/// Posting location. Boards differ wildly in granularity, so every
/// component is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Location {
    /// `"City, State, Country"` with absent components (and their
    /// separators) collapsed; all absent renders as the empty string.
    pub fn display_location(&self) -> String {
        let parts: Vec<&str> = [
            self.city.as_deref(),
            self.state.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Internship,
    PerDiem,
    Nights,
    Summer,
    Volunteer,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "fulltime",
            JobType::PartTime => "parttime",
            JobType::Contract => "contract",
            JobType::Temporary => "temporary",
            JobType::Internship => "internship",
            JobType::PerDiem => "perdiem",
            JobType::Nights => "nights",
            JobType::Summer => "summer",
            JobType::Volunteer => "volunteer",
        }
    }

    /// Lenient parse for wire data: boards spell these every way there is.
    pub fn parse(token: &str) -> Option<Self> {
        let t: String = token
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match t.as_str() {
            "fulltime" => Some(JobType::FullTime),
            "parttime" => Some(JobType::PartTime),
            "contract" | "contractor" => Some(JobType::Contract),
            "temporary" | "temp" => Some(JobType::Temporary),
            "internship" | "intern" => Some(JobType::Internship),
            "perdiem" => Some(JobType::PerDiem),
            "nights" => Some(JobType::Nights),
            "summer" => Some(JobType::Summer),
            "volunteer" => Some(JobType::Volunteer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationInterval {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

impl CompensationInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationInterval::Yearly => "yearly",
            CompensationInterval::Monthly => "monthly",
            CompensationInterval::Weekly => "weekly",
            CompensationInterval::Daily => "daily",
            CompensationInterval::Hourly => "hourly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    pub interval: CompensationInterval,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Country context handed through to country-sensitive boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Usa,
    Canada,
    Uk,
    Australia,
    Germany,
    France,
    India,
    Israel,
}

impl Country {
    /// Parse a free-form country string, accepting the common aliases.
    pub fn from_string(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "usa" | "us" | "united states" => Ok(Country::Usa),
            "canada" | "ca" => Ok(Country::Canada),
            "uk" | "united kingdom" | "gb" => Ok(Country::Uk),
            "australia" | "au" => Ok(Country::Australia),
            "germany" | "de" => Ok(Country::Germany),
            "france" | "fr" => Ok(Country::France),
            "india" | "in" => Ok(Country::India),
            "israel" | "il" => Ok(Country::Israel),
            _ => Err(ConfigError::UnknownCountry(raw.to_string())),
        }
    }
}
