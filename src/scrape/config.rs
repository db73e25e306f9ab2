// src/scrape/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scrape::adapters::feed::JsonFeedScraper;
use crate::scrape::registry::ScraperRegistry;
use crate::site::Site;

const ENV_PATH: &str = "JOBSCOUT_FEEDS_PATH";

/// One configured feed endpoint: which site it stands in for, and where
/// its JSON feed lives.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct FeedEndpoint {
    pub site: Site,
    pub url: String,
}

/// Load feed endpoints from an explicit path. Supports TOML or JSON.
pub fn load_feeds_from(path: &Path) -> Result<Vec<FeedEndpoint>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading feeds from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feeds(&content, ext.as_str())
}

/// Load feed endpoints using env var + fallbacks:
/// 1) $JOBSCOUT_FEEDS_PATH
/// 2) config/feeds.toml
/// 3) config/feeds.json
pub fn load_feeds_default() -> Result<Vec<FeedEndpoint>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feeds_from(&pb);
        } else {
            return Err(anyhow!("JOBSCOUT_FEEDS_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feeds.toml");
    if toml_p.exists() {
        return load_feeds_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feeds.json");
    if json_p.exists() {
        return load_feeds_from(&json_p);
    }
    Ok(Vec::new())
}

/// Build a registry of HTTP-mode feed scrapers, one per endpoint.
pub fn registry_from_feeds(feeds: &[FeedEndpoint]) -> ScraperRegistry {
    let mut registry = ScraperRegistry::new();
    for ep in feeds {
        registry.register(JsonFeedScraper::from_url(ep.site, ep.url.clone()));
    }
    registry
}

fn parse_feeds(s: &str, hint_ext: &str) -> Result<Vec<FeedEndpoint>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("feeds");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    // Try JSON array
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    // Fallback: also try TOML if not attempted
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feeds format"))
}

fn parse_toml(s: &str) -> Result<Vec<FeedEndpoint>> {
    #[derive(serde::Deserialize)]
    struct TomlFeeds {
        feeds: Vec<FeedEndpoint>,
    }
    let v: TomlFeeds = toml::from_str(s)?;
    Ok(clean_list(v.feeds))
}

fn parse_json(s: &str) -> Result<Vec<FeedEndpoint>> {
    let v: Vec<FeedEndpoint> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<FeedEndpoint>) -> Vec<FeedEndpoint> {
    // Drop blank URLs; first declaration of a site wins.
    let mut out: Vec<FeedEndpoint> = Vec::with_capacity(items.len());
    for mut it in items {
        it.url = it.url.trim().to_string();
        if it.url.is_empty() {
            continue;
        }
        if out.iter().any(|seen| seen.site == it.site) {
            continue;
        }
        out.push(it);
    }
    out
}
