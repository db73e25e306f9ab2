// src/scrape/registry.rs
use std::collections::HashMap;
use std::sync::Arc;

use crate::scrape::types::Scraper;
use crate::site::Site;

/// Registration table mapping each site identifier to its scraper.
///
/// Built once at startup and handed by reference to the query builder and
/// orchestrator. Registering a second scraper for the same site replaces
/// the first.
#[derive(Default, Clone)]
pub struct ScraperRegistry {
    inner: HashMap<Site, Arc<dyn Scraper>>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Scraper + 'static>(&mut self, scraper: S) {
        self.register_arc(Arc::new(scraper));
    }

    pub fn register_arc(&mut self, scraper: Arc<dyn Scraper>) {
        self.inner.insert(scraper.site(), scraper);
    }

    pub fn contains(&self, site: Site) -> bool {
        self.inner.contains_key(&site)
    }

    pub fn get(&self, site: Site) -> Option<Arc<dyn Scraper>> {
        self.inner.get(&site).cloned()
    }

    pub fn sites(&self) -> impl Iterator<Item = Site> + '_ {
        self.inner.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for ScraperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScraperRegistry")
            .field("sites", &self.inner.keys().collect::<Vec<_>>())
            .finish()
    }
}
