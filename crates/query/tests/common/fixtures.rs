//! In-memory store fixtures.
//!
//! [`MapStore`] answers lookups from a fixed `(category, term) -> ids` table
//! and counts how often each method was called, so tests can check that
//! category resolution only happens when needed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use mibig_query::{EntryId, EntryStore, StoreError, StoreResult};

/// Table-driven [`EntryStore`].
#[derive(Debug, Default)]
pub struct MapStore {
    lookups: HashMap<(String, String), Vec<EntryId>>,
    failing_category: Option<String>,
    lookup_calls: AtomicUsize,
    exists_calls: AtomicUsize,
}

impl MapStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the ids returned for `category` / `term`.
    pub fn with(mut self, category: &str, term: &str, ids: &[EntryId]) -> Self {
        self.lookups
            .insert((category.to_string(), term.to_string()), ids.to_vec());
        self
    }

    /// Makes every call touching `category` fail with a backend error.
    pub fn failing_on(mut self, category: &str) -> Self {
        self.failing_category = Some(category.to_string());
        self
    }

    /// Number of `lookup` calls made so far.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Number of `category_exists` calls made so far.
    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    fn check(&self, category: &str) -> StoreResult<()> {
        match &self.failing_category {
            Some(failing) if failing == category => Err(StoreError::backend(format!(
                "no connection for category {}",
                category
            ))),
            _ => Ok(()),
        }
    }

    fn ids(&self, category: &str, term: &str) -> Vec<EntryId> {
        self.lookups
            .get(&(category.to_string(), term.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

impl EntryStore for MapStore {
    fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.check(category)?;
        Ok(self.ids(category, term))
    }

    fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.check(category)?;
        Ok(self.ids(category, term).len())
    }
}

/// A store with a handful of clusters across types and genera.
///
/// | Category | Term | Ids |
/// |----------|------|-----|
/// | type | ripp | 535 |
/// | type | nrps | 1070 |
/// | type | pks | 12, 1070, 88 |
/// | genus | streptomyces | 1070, 12, 535 |
/// | genus | lactococcus | 77, 535 |
/// | species | coelicolor | 12 |
/// | compound | nisin | 77 |
/// | acc | BGC0000535 | 535 |
pub fn cluster_store() -> MapStore {
    MapStore::new()
        .with("type", "ripp", &[535])
        .with("type", "nrps", &[1070])
        .with("type", "pks", &[12, 1070, 88])
        .with("genus", "streptomyces", &[1070, 12, 535])
        .with("genus", "lactococcus", &[77, 535])
        .with("species", "coelicolor", &[12])
        .with("compound", "nisin", &[77])
        .with("acc", "BGC0000535", &[535])
}
