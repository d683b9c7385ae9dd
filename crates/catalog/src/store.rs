//! In-memory [`EntryStore`] over a [`Catalog`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use mibig_query::{EntryId, EntryStore, StoreError, StoreResult};
use tracing::{debug, trace};

use crate::error::CatalogResult;
use crate::handlers::{HandlerMap, default_handlers};
use crate::model::{Catalog, CatalogEntry};
use crate::summary::{
    AvailableTerm, LabelsAndCounts, ProductTag, RepositoryEntry, ResultStats, StatCluster,
    StatCounts, TaxonStats, UNKNOWN_COMPLETENESS,
};

/// Catalog-backed store with injected category handlers.
///
/// Categories without a handler are not errors: lookups return no ids and
/// detection counts are zero.
pub struct CatalogStore {
    catalog: Catalog,
    handlers: HandlerMap,
    by_id: HashMap<EntryId, usize>,
}

impl CatalogStore {
    /// Creates a store answering categories with `handlers`.
    pub fn new(catalog: Catalog, handlers: HandlerMap) -> Self {
        let by_id = catalog
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id, index))
            .collect();
        Self {
            catalog,
            handlers,
            by_id,
        }
    }

    /// Creates a store with the standard handler for every category.
    pub fn with_default_handlers(catalog: Catalog) -> Self {
        Self::new(catalog, default_handlers())
    }

    /// Loads a catalog file and installs the standard handlers.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        Ok(Self::with_default_handlers(Catalog::from_path(path)?))
    }

    /// The loaded catalog document.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Category keys with a handler, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }

    /// Suggests values of `category` matching the partial input `term`.
    pub fn available(&self, category: &str, term: &str) -> StoreResult<Vec<AvailableTerm>> {
        let handler = self
            .handlers
            .get(category)
            .ok_or_else(|| StoreError::InvalidCategory {
                category: category.to_string(),
            })?;
        handler.available(&self.catalog, term)
    }

    /// Summaries of the given entries, ordered by accession. Unknown and
    /// repeated ids are skipped.
    pub fn get(&self, ids: &[EntryId]) -> Vec<RepositoryEntry> {
        let mut seen = HashSet::new();
        let mut entries: Vec<&CatalogEntry> = ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.entry(*id))
            .collect();
        entries.sort_by(|a, b| a.accession.cmp(&b.accession));
        entries.into_iter().map(|e| self.summarize(e)).collect()
    }

    /// Summaries of every entry, ordered by accession.
    pub fn repository(&self) -> Vec<RepositoryEntry> {
        let mut entries: Vec<&CatalogEntry> = self.catalog.entries.iter().collect();
        entries.sort_by(|a, b| a.accession.cmp(&b.accession));
        entries.into_iter().map(|e| self.summarize(e)).collect()
    }

    /// Total, minimal, complete and incomplete entry counts.
    /// Completeness is compared case-insensitively.
    pub fn counts(&self) -> StatCounts {
        let entries = &self.catalog.entries;
        let completeness = |wanted: &str| {
            entries
                .iter()
                .filter(|e| {
                    e.completeness
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(wanted))
                })
                .count()
        };
        StatCounts {
            total: entries.len(),
            minimal: entries.iter().filter(|e| e.minimal).count(),
            complete: completeness("complete"),
            incomplete: completeness("incomplete"),
        }
    }

    /// Entries per BGC type, most common first. Types without entries are
    /// left out; subtypes are not folded into their parents.
    pub fn cluster_stats(&self) -> Vec<StatCluster> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.catalog.entries {
            for class in &entry.biosyn_classes {
                *counts.entry(class.as_str()).or_default() += 1;
            }
        }

        let mut clusters: Vec<StatCluster> = self
            .catalog
            .bgc_types
            .iter()
            .filter_map(|t| {
                counts.get(t.term.as_str()).map(|count| StatCluster {
                    bgc_type: t.term.clone(),
                    description: t.description.clone(),
                    count: *count,
                    css_class: t.css_class.clone(),
                })
            })
            .collect();
        clusters.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.bgc_type.cmp(&b.bgc_type)));
        clusters
    }

    /// Entries per genus, most common first.
    pub fn genus_stats(&self) -> Vec<TaxonStats> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in &self.catalog.entries {
            let genus = entry.taxonomy.genus.as_str();
            if !genus.is_empty() {
                *counts.entry(genus).or_default() += 1;
            }
        }

        let mut stats: Vec<TaxonStats> = counts
            .into_iter()
            .map(|(genus, count)| TaxonStats {
                genus: genus.to_string(),
                count,
            })
            .collect();
        // Stable sort keeps genera with equal counts in name order.
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }

    /// Type and phylum breakdown of a result set.
    pub fn result_stats(&self, ids: &[EntryId]) -> ResultStats {
        let mut by_type: HashMap<String, usize> = HashMap::new();
        let mut by_phylum: HashMap<String, usize> = HashMap::new();

        let mut seen = HashSet::new();
        for entry in ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.entry(*id))
        {
            for class in &entry.biosyn_classes {
                *by_type.entry(self.type_name(class)).or_default() += 1;
            }
            let phylum = &entry.taxonomy.phylum;
            if !phylum.is_empty() {
                *by_phylum.entry(phylum.clone()).or_default() += 1;
            }
        }

        ResultStats {
            clusters_by_type: LabelsAndCounts::from_counts(by_type),
            clusters_by_phylum: LabelsAndCounts::from_counts(by_phylum),
        }
    }

    fn entry(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.by_id
            .get(&id)
            .and_then(|index| self.catalog.entries.get(*index))
    }

    fn type_name(&self, term: &str) -> String {
        self.catalog
            .bgc_type(term)
            .map_or_else(|| term.to_string(), |t| t.name.clone())
    }

    fn summarize(&self, entry: &CatalogEntry) -> RepositoryEntry {
        let classes = entry
            .biosyn_classes
            .iter()
            .map(|class| match self.catalog.bgc_type(class) {
                Some(t) => ProductTag {
                    name: t.name.clone(),
                    css_class: t.css_class.clone(),
                },
                None => ProductTag {
                    name: class.clone(),
                    css_class: String::new(),
                },
            })
            .collect();

        RepositoryEntry {
            accession: entry.accession.clone(),
            minimal: entry.minimal,
            complete: entry
                .completeness
                .clone()
                .unwrap_or_else(|| UNKNOWN_COMPLETENESS.to_string()),
            products: entry.compounds.clone(),
            classes,
            organism: entry.taxonomy.name.clone(),
        }
    }
}

impl EntryStore for CatalogStore {
    fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
        let Some(handler) = self.handlers.get(category) else {
            debug!(category = %category, "No handler for search category");
            return Ok(Vec::new());
        };
        let ids = handler.lookup(&self.catalog, term)?;
        trace!(category = %category, term = %term, matches = ids.len(), "Catalog lookup");
        Ok(ids)
    }

    fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
        match self.handlers.get(category) {
            Some(handler) => handler.count(&self.catalog, term),
            None => Ok(0),
        }
    }
}
