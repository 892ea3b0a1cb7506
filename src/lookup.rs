//! Lookup service: memoized pages per category, selection by code.

use crate::cache::DocumentCache;
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::registry::Registry;
use crate::schema::{Hit, Page, Record};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Resolves lookups against a registry, building each category's page on
/// first use and keeping it for the lifetime of this value.
pub struct Lookup {
    registry: Registry,
    cache: DocumentCache,
    /// `None` marks a document without a table
    pages: HashMap<String, Option<Page>>,
}

impl Lookup {
    pub fn new(registry: Registry, cache: DocumentCache) -> Self {
        Self {
            registry,
            cache,
            pages: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Build (or reuse) the page for `name`.
    ///
    /// `Ok(None)` means the document has no table. Fetch and parse failures
    /// are returned and not memoized, so a later call retries.
    pub async fn page(&mut self, name: &str) -> Result<Option<&Page>> {
        if !self.pages.contains_key(name) {
            let category = self
                .registry
                .get(name)
                .ok_or_else(|| Error::UnknownCategory(name.to_string()))?;

            category.ensure_implemented()?;

            let raw = self.cache.obtain(category).await?;
            let html = String::from_utf8_lossy(&raw);
            let page = extract(category, &html)?.map(|ext| ext.page);
            if page.is_none() {
                warn!("{}: no table found in document", name);
            }

            self.pages.insert(name.to_string(), page);
        }

        Ok(self.pages.get(name).and_then(Option::as_ref))
    }

    /// One record from one category.
    ///
    /// With a code, the exact (case-sensitive) key. Without one, the page's
    /// first record by insertion order; the page itself is never modified.
    pub async fn lookup_one(&mut self, name: &str, code: Option<&str>) -> Result<Option<Record>> {
        let Some(page) = self.page(name).await? else {
            return Ok(None);
        };

        let record = match code {
            Some(code) => {
                debug!("Getting by code: {}", code);
                page.get(code)
            }
            None => {
                debug!("Getting single item.");
                page.first()
            }
        };

        Ok(record.cloned())
    }

    /// Look up `code` in one category, or in every category in registry order.
    ///
    /// Categories that fail to fetch or parse contribute no result.
    pub async fn lookup(&mut self, category: Option<&str>, code: Option<&str>) -> Vec<Hit> {
        let mut hits = Vec::new();

        for name in self.targets(category) {
            debug!("Search by category: {}", name);
            match self.lookup_one(&name, code).await {
                Ok(Some(record)) => hits.push(Hit {
                    category: name,
                    record,
                }),
                Ok(None) => debug!("{}: item not found", name),
                Err(e) => report(&name, &e),
            }
        }

        hits
    }

    /// Every record of one category, or of every category in registry order.
    pub async fn list(&mut self, category: Option<&str>) -> Vec<Hit> {
        let mut hits = Vec::new();

        for name in self.targets(category) {
            match self.page(&name).await {
                Ok(Some(page)) => hits.extend(page.iter().map(|record| Hit {
                    category: name.clone(),
                    record: record.clone(),
                })),
                Ok(None) => {}
                Err(e) => report(&name, &e),
            }
        }

        hits
    }

    fn targets(&self, category: Option<&str>) -> Vec<String> {
        match category {
            Some(name) => vec![name.to_string()],
            None => self.registry.names().into_iter().map(String::from).collect(),
        }
    }
}

fn report(name: &str, err: &Error) {
    match err {
        Error::StrategyNotImplemented { .. } => debug!("{}: {}", name, err),
        _ => warn!("{}: {}", name, err),
    }
}
