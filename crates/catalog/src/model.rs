//! Catalog document model.
//!
//! A catalog is a single JSON document listing the BGC type hierarchy and
//! every repository entry:
//!
//! ```json
//! {
//!   "bgc_types": [
//!     {"term": "nrps", "name": "NRP", "description": "Nonribosomal peptide",
//!      "css_class": "nrps", "parent": null}
//!   ],
//!   "entries": [
//!     {"id": 1, "accession": "BGC0000001", "minimal": false,
//!      "completeness": "complete", "biosyn_classes": ["nrps"],
//!      "compounds": ["testomycin"],
//!      "taxonomy": {"superkingdom": "Bacteria", "phylum": "Actinobacteria",
//!                   "class": "Actinomycetia", "order": "Streptomycetales",
//!                   "family": "Streptomycetaceae", "genus": "Streptomyces",
//!                   "species": "coelicolor", "name": "Streptomyces coelicolor A3(2)"}}
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use mibig_query::EntryId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// A node of the BGC type hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgcType {
    /// Search key, e.g. `nrps`.
    pub term: String,
    /// Display name, e.g. `NRP`.
    pub name: String,
    /// Longer description, also matched by suggestions.
    #[serde(default)]
    pub description: String,
    /// Style class used by front ends.
    #[serde(default)]
    pub css_class: String,
    /// Term of the parent type; `None` for top-level types.
    #[serde(default)]
    pub parent: Option<String>,
}

/// Taxonomic lineage of the producing organism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// e.g. `Bacteria`.
    pub superkingdom: String,
    /// e.g. `Actinobacteria`.
    pub phylum: String,
    /// e.g. `Actinomycetia`.
    pub class: String,
    /// e.g. `Streptomycetales`.
    pub order: String,
    /// e.g. `Streptomycetaceae`.
    pub family: String,
    /// e.g. `Streptomyces`.
    pub genus: String,
    /// Species epithet, e.g. `coelicolor`.
    pub species: String,
    /// Full organism name.
    pub name: String,
}

/// Taxonomic ranks searchable as categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonRank {
    /// [`Taxonomy::superkingdom`]
    Superkingdom,
    /// [`Taxonomy::phylum`]
    Phylum,
    /// [`Taxonomy::class`]
    Class,
    /// [`Taxonomy::order`]
    Order,
    /// [`Taxonomy::family`]
    Family,
    /// [`Taxonomy::genus`]
    Genus,
    /// [`Taxonomy::species`]
    Species,
}

impl TaxonRank {
    /// All ranks from the root of the tree down.
    pub const ALL: [TaxonRank; 7] = [
        TaxonRank::Superkingdom,
        TaxonRank::Phylum,
        TaxonRank::Class,
        TaxonRank::Order,
        TaxonRank::Family,
        TaxonRank::Genus,
        TaxonRank::Species,
    ];

    /// Category key of the rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonRank::Superkingdom => "superkingdom",
            TaxonRank::Phylum => "phylum",
            TaxonRank::Class => "class",
            TaxonRank::Order => "order",
            TaxonRank::Family => "family",
            TaxonRank::Genus => "genus",
            TaxonRank::Species => "species",
        }
    }

    /// The lineage value at this rank.
    pub fn value<'a>(&self, taxonomy: &'a Taxonomy) -> &'a str {
        match self {
            TaxonRank::Superkingdom => &taxonomy.superkingdom,
            TaxonRank::Phylum => &taxonomy.phylum,
            TaxonRank::Class => &taxonomy.class,
            TaxonRank::Order => &taxonomy.order,
            TaxonRank::Family => &taxonomy.family,
            TaxonRank::Genus => &taxonomy.genus,
            TaxonRank::Species => &taxonomy.species,
        }
    }
}

/// One repository entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Numeric id returned by searches; positive and unique.
    pub id: EntryId,
    /// MIBiG accession, e.g. `BGC0000001`.
    pub accession: String,
    /// Whether the entry only carries the minimal annotation set.
    #[serde(default)]
    pub minimal: bool,
    /// Locus completeness, usually `complete` or `incomplete`.
    #[serde(default)]
    pub completeness: Option<String>,
    /// BGC type terms.
    #[serde(default)]
    pub biosyn_classes: Vec<String>,
    /// Compound names.
    #[serde(default)]
    pub compounds: Vec<String>,
    /// Producing organism.
    #[serde(default)]
    pub taxonomy: Taxonomy,
}

/// The full catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// The BGC type hierarchy.
    #[serde(default)]
    pub bgc_types: Vec<BgcType>,
    /// Repository entries, in document order.
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Parses and validates a catalog document.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            entries = catalog.entries.len(),
            bgc_types = catalog.bgc_types.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Checks the structural invariants of the document.
    pub fn validate(&self) -> CatalogResult<()> {
        let mut ids = HashSet::new();
        for entry in &self.entries {
            if entry.id == 0 {
                return Err(CatalogError::integrity(format!(
                    "entry {} has non-positive id 0",
                    entry.accession
                )));
            }
            if !ids.insert(entry.id) {
                return Err(CatalogError::integrity(format!(
                    "duplicate entry id {}",
                    entry.id
                )));
            }
        }

        let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
        for bgc_type in &self.bgc_types {
            if parents
                .insert(&bgc_type.term, bgc_type.parent.as_deref())
                .is_some()
            {
                return Err(CatalogError::integrity(format!(
                    "duplicate BGC type '{}'",
                    bgc_type.term
                )));
            }
        }

        for bgc_type in &self.bgc_types {
            if let Some(parent) = &bgc_type.parent {
                if !parents.contains_key(parent.as_str()) {
                    return Err(CatalogError::integrity(format!(
                        "BGC type '{}' has unknown parent '{}'",
                        bgc_type.term, parent
                    )));
                }
            }

            // A chain longer than the number of types must loop.
            let mut current = bgc_type.parent.as_deref();
            let mut steps = 0;
            while let Some(term) = current {
                steps += 1;
                if steps > self.bgc_types.len() {
                    return Err(CatalogError::integrity(format!(
                        "BGC type '{}' is part of a parent cycle",
                        bgc_type.term
                    )));
                }
                current = parents.get(term).copied().flatten();
            }
        }

        for entry in &self.entries {
            if let Some(class) = entry
                .biosyn_classes
                .iter()
                .find(|class| !parents.contains_key(class.as_str()))
            {
                return Err(CatalogError::integrity(format!(
                    "entry {} references unknown BGC type '{}'",
                    entry.accession, class
                )));
            }
        }

        Ok(())
    }

    /// Looks up a BGC type by term.
    pub fn bgc_type(&self, term: &str) -> Option<&BgcType> {
        self.bgc_types.iter().find(|t| t.term == term)
    }

    /// Expands a set of type terms to include every descendant type.
    pub fn with_subtypes<'a>(&'a self, roots: impl IntoIterator<Item = &'a str>) -> HashSet<&'a str> {
        let mut all: HashSet<&str> = roots.into_iter().collect();
        let mut frontier: Vec<&str> = all.iter().copied().collect();

        while let Some(term) = frontier.pop() {
            for child in &self.bgc_types {
                if child.parent.as_deref() == Some(term) && all.insert(&child.term) {
                    frontier.push(&child.term);
                }
            }
        }
        all
    }
}
