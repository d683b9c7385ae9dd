//! Response shapes produced by the catalog store.

use serde::{Deserialize, Serialize};

/// Completeness shown for entries that do not record one.
pub const UNKNOWN_COMPLETENESS: &str = "Unknown";

/// A BGC type label attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTag {
    /// Display name of the type.
    pub name: String,
    /// Style class of the type.
    pub css_class: String,
}

/// Summary of one entry, as listed in search results and the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// MIBiG accession.
    pub accession: String,
    /// Minimal annotation flag.
    pub minimal: bool,
    /// Completeness, or [`UNKNOWN_COMPLETENESS`].
    pub complete: String,
    /// Compound names.
    pub products: Vec<String>,
    /// Direct BGC types of the entry.
    pub classes: Vec<ProductTag>,
    /// Name of the producing organism.
    pub organism: String,
}

/// A term suggestion for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTerm {
    /// Value to search for.
    pub val: String,
    /// Human-readable label.
    pub desc: String,
}

/// Entry counts across the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounts {
    /// All entries.
    pub total: usize,
    /// Entries with only minimal annotation.
    pub minimal: usize,
    /// Entries with a complete locus.
    pub complete: usize,
    /// Entries with an incomplete locus.
    pub incomplete: usize,
}

/// Number of entries of one BGC type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCluster {
    /// Type term, `type` on the wire.
    #[serde(rename = "type")]
    pub bgc_type: String,
    /// Type description.
    pub description: String,
    /// Entries listing the type directly.
    pub count: usize,
    /// Style class of the type.
    pub css_class: String,
}

/// Number of entries from one genus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonStats {
    /// Genus name.
    pub genus: String,
    /// Entries from the genus.
    pub count: usize,
}

/// Parallel label and count lists, ready for charting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsAndCounts {
    /// Chart labels.
    pub labels: Vec<String>,
    /// Count for the label at the same index.
    pub data: Vec<usize>,
}

impl LabelsAndCounts {
    /// Builds the lists from `(label, count)` pairs, largest count first and
    /// ties broken by label.
    pub fn from_counts(counts: impl IntoIterator<Item = (String, usize)>) -> Self {
        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let (labels, data) = counts.into_iter().unzip();
        Self { labels, data }
    }
}

/// Breakdown of a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultStats {
    /// Matching entries per BGC type name.
    pub clusters_by_type: LabelsAndCounts,
    /// Matching entries per phylum.
    pub clusters_by_phylum: LabelsAndCounts,
}
