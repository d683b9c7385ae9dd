//! Per-category search handlers.
//!
//! A [`CatalogStore`](crate::CatalogStore) does not know any category itself;
//! it dispatches on the category key to a [`CategoryHandler`]. The standard
//! mapping is built by [`default_handlers`]:
//!
//! | Category | Handler | Suggestions match |
//! |----------|---------|-------------------|
//! | `type` | [`TypeHandler`] (includes subtypes) | prefix of term or description |
//! | `compound` | [`FieldHandler`] | prefix |
//! | `acc` | [`FieldHandler`] | substring |
//! | `superkingdom` ... `species` | [`FieldHandler`] | substring |
//! | `completeness` | [`FieldHandler`] | prefix |

use std::collections::{BTreeMap, BTreeSet, HashMap};

use mibig_query::{EntryId, StoreError, StoreResult};

use crate::model::{Catalog, CatalogEntry, TaxonRank};
use crate::pattern::IlikePattern;
use crate::summary::AvailableTerm;

/// Lookup, detection and suggestions for one search category.
pub trait CategoryHandler: Send + Sync {
    /// Ids of the entries matching `term`, in catalog order.
    fn lookup(&self, catalog: &Catalog, term: &str) -> StoreResult<Vec<EntryId>>;

    /// Count used for category detection; only whether it is non-zero matters.
    fn count(&self, catalog: &Catalog, term: &str) -> StoreResult<usize> {
        Ok(self.lookup(catalog, term)?.len())
    }

    /// Distinct values of the category matching the user's partial input.
    fn available(&self, catalog: &Catalog, term: &str) -> StoreResult<Vec<AvailableTerm>>;
}

/// Handler table keyed by category.
pub type HandlerMap = HashMap<String, Box<dyn CategoryHandler>>;

/// Builds the standard category to handler mapping.
pub fn default_handlers() -> HandlerMap {
    let mut handlers: HandlerMap = HashMap::new();
    handlers.insert("type".to_string(), Box::new(TypeHandler));
    handlers.insert(
        "compound".to_string(),
        Box::new(FieldHandler::new(EntryField::Compound, SuggestMatch::Prefix)),
    );
    handlers.insert(
        "acc".to_string(),
        Box::new(FieldHandler::new(EntryField::Accession, SuggestMatch::Substring)),
    );
    for rank in TaxonRank::ALL {
        handlers.insert(
            rank.as_str().to_string(),
            Box::new(FieldHandler::new(EntryField::Taxon(rank), SuggestMatch::Substring)),
        );
    }
    handlers.insert(
        "completeness".to_string(),
        Box::new(FieldHandler::new(EntryField::Completeness, SuggestMatch::Prefix)),
    );
    handlers
}

fn compile(pattern: Result<IlikePattern, regex::Error>) -> StoreResult<IlikePattern> {
    pattern.map_err(|e| StoreError::Backend {
        message: format!("invalid search pattern: {}", e),
        source: Some(Box::new(e)),
    })
}

/// How suggestions are matched against the user's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestMatch {
    /// Values starting with the input.
    Prefix,
    /// Values containing the input anywhere.
    Substring,
}

impl SuggestMatch {
    fn pattern(&self, term: &str) -> StoreResult<IlikePattern> {
        compile(match self {
            SuggestMatch::Prefix => IlikePattern::prefix(term),
            SuggestMatch::Substring => IlikePattern::substring(term),
        })
    }
}

/// Entry attribute a [`FieldHandler`] searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    /// The `BGC…` accession.
    Accession,
    /// Any of the entry's compound names.
    Compound,
    /// Locus completeness.
    Completeness,
    /// One rank of the producer's lineage.
    Taxon(TaxonRank),
}

impl EntryField {
    /// Values of the field for one entry. Missing values yield nothing.
    pub fn values<'a>(&self, entry: &'a CatalogEntry) -> Vec<&'a str> {
        match self {
            EntryField::Accession => vec![entry.accession.as_str()],
            EntryField::Compound => entry.compounds.iter().map(String::as_str).collect(),
            EntryField::Completeness => entry.completeness.as_deref().into_iter().collect(),
            EntryField::Taxon(rank) => vec![rank.value(&entry.taxonomy)],
        }
    }
}

/// Matches one entry attribute with `ILIKE` semantics.
#[derive(Debug, Clone, Copy)]
pub struct FieldHandler {
    field: EntryField,
    suggest: SuggestMatch,
}

impl FieldHandler {
    /// Creates a handler for `field`, suggesting values by `suggest`.
    pub fn new(field: EntryField, suggest: SuggestMatch) -> Self {
        Self { field, suggest }
    }
}

impl CategoryHandler for FieldHandler {
    fn lookup(&self, catalog: &Catalog, term: &str) -> StoreResult<Vec<EntryId>> {
        let pattern = compile(IlikePattern::new(term))?;
        Ok(catalog
            .entries
            .iter()
            .filter(|entry| {
                self.field
                    .values(entry)
                    .into_iter()
                    .any(|value| pattern.is_match(value))
            })
            .map(|entry| entry.id)
            .collect())
    }

    fn available(&self, catalog: &Catalog, term: &str) -> StoreResult<Vec<AvailableTerm>> {
        let pattern = self.suggest.pattern(term)?;
        let values: BTreeSet<&str> = catalog
            .entries
            .iter()
            .flat_map(|entry| self.field.values(entry))
            .filter(|value| pattern.is_match(value))
            .collect();
        Ok(values
            .into_iter()
            .map(|value| AvailableTerm {
                val: value.to_string(),
                desc: value.to_string(),
            })
            .collect())
    }
}

/// Matches BGC types, expanding each match to its subtypes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeHandler;

impl CategoryHandler for TypeHandler {
    fn lookup(&self, catalog: &Catalog, term: &str) -> StoreResult<Vec<EntryId>> {
        let pattern = compile(IlikePattern::new(term))?;
        let roots = catalog
            .bgc_types
            .iter()
            .filter(|t| pattern.is_match(&t.term))
            .map(|t| t.term.as_str());
        let types = catalog.with_subtypes(roots);
        if types.is_empty() {
            return Ok(Vec::new());
        }

        Ok(catalog
            .entries
            .iter()
            .filter(|entry| {
                entry
                    .biosyn_classes
                    .iter()
                    .any(|class| types.contains(class.as_str()))
            })
            .map(|entry| entry.id)
            .collect())
    }

    /// Counts matching types, not entries: a type with no entries still
    /// claims the term.
    fn count(&self, catalog: &Catalog, term: &str) -> StoreResult<usize> {
        let pattern = compile(IlikePattern::new(term))?;
        Ok(catalog
            .bgc_types
            .iter()
            .filter(|t| pattern.is_match(&t.term))
            .count())
    }

    fn available(&self, catalog: &Catalog, term: &str) -> StoreResult<Vec<AvailableTerm>> {
        let pattern = SuggestMatch::Prefix.pattern(term)?;
        let matching: BTreeMap<&str, &str> = catalog
            .bgc_types
            .iter()
            .filter(|t| pattern.is_match(&t.term) || pattern.is_match(&t.description))
            .map(|t| (t.term.as_str(), t.description.as_str()))
            .collect();
        Ok(matching
            .into_iter()
            .map(|(term, description)| AvailableTerm {
                val: term.to_string(),
                desc: description.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            &json!({
                "bgc_types": [
                    {"term": "ripp", "name": "RiPP", "description": "Ribosomally synthesized peptide", "css_class": "ripp", "parent": null},
                    {"term": "lanthipeptide", "name": "Lanthipeptide", "description": "Lanthipeptide", "css_class": "ripp", "parent": "ripp"},
                    {"term": "nrps", "name": "NRP", "description": "Nonribosomal peptide", "css_class": "nrps", "parent": null},
                    {"term": "other", "name": "Other", "description": "Other", "css_class": "other", "parent": null}
                ],
                "entries": [
                    {"id": 23, "accession": "BGC0000023", "completeness": "complete",
                     "biosyn_classes": ["lanthipeptide"], "compounds": ["nisin A", "nisin Z"],
                     "taxonomy": {"phylum": "Firmicutes", "genus": "Lactococcus", "species": "lactis"}},
                    {"id": 1, "accession": "BGC0000001", "completeness": "Incomplete",
                     "biosyn_classes": ["nrps"], "compounds": ["daptomycin"],
                     "taxonomy": {"phylum": "Actinobacteria", "genus": "Streptomyces", "species": "roseosporus"}},
                    {"id": 42, "accession": "BGC0000042",
                     "biosyn_classes": ["ripp", "nrps"], "compounds": ["nisinoid"],
                     "taxonomy": {"phylum": "Actinobacteria", "genus": "Streptomyces", "species": "coelicolor"}}
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    fn handler(category: &str) -> Box<dyn CategoryHandler> {
        default_handlers()
            .remove(category)
            .unwrap_or_else(|| panic!("no handler for {}", category))
    }

    fn vals(terms: Vec<AvailableTerm>) -> Vec<String> {
        terms.into_iter().map(|t| t.val).collect()
    }

    #[test]
    fn test_default_handler_keys() {
        let mut keys: Vec<String> = default_handlers().into_keys().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "acc",
                "class",
                "completeness",
                "compound",
                "family",
                "genus",
                "order",
                "phylum",
                "species",
                "superkingdom",
                "type"
            ]
        );
    }

    #[test]
    fn test_type_lookup_includes_subtypes() {
        let catalog = catalog();
        let types = handler("type");
        assert_eq!(types.lookup(&catalog, "ripp").unwrap(), vec![23, 42]);
        assert_eq!(types.lookup(&catalog, "lanthipeptide").unwrap(), vec![23]);
        assert_eq!(types.lookup(&catalog, "NRPS").unwrap(), vec![1, 42]);
        assert!(types.lookup(&catalog, "pks").unwrap().is_empty());
    }

    #[test]
    fn test_type_count_counts_types() {
        let catalog = catalog();
        let types = handler("type");
        assert_eq!(types.count(&catalog, "other").unwrap(), 1);
        assert!(types.lookup(&catalog, "other").unwrap().is_empty());
        assert_eq!(types.count(&catalog, "%p%").unwrap(), 3);
        assert_eq!(types.count(&catalog, "streptomyces").unwrap(), 0);
    }

    #[test]
    fn test_type_suggestions_match_term_or_description() {
        let catalog = catalog();
        let available = handler("type").available(&catalog, "ri").unwrap();
        assert_eq!(
            available,
            vec![AvailableTerm {
                val: "ripp".to_string(),
                desc: "Ribosomally synthesized peptide".to_string()
            }]
        );
        assert_eq!(
            vals(handler("type").available(&catalog, "non").unwrap()),
            vec!["nrps"]
        );
    }

    #[test]
    fn test_compound_lookup_deduplicates_entries() {
        let catalog = catalog();
        let compounds = handler("compound");
        assert_eq!(compounds.lookup(&catalog, "nisin%").unwrap(), vec![23, 42]);
        assert_eq!(compounds.lookup(&catalog, "NISIN A").unwrap(), vec![23]);
        assert_eq!(compounds.count(&catalog, "nisin_Z").unwrap(), 1);
    }

    #[test]
    fn test_compound_suggestions_are_prefix() {
        let catalog = catalog();
        assert_eq!(
            vals(handler("compound").available(&catalog, "nisin").unwrap()),
            vec!["nisin A", "nisin Z", "nisinoid"]
        );
        assert!(handler("compound").available(&catalog, "mycin").unwrap().is_empty());
    }

    #[test]
    fn test_taxon_lookup_and_suggestions() {
        let catalog = catalog();
        assert_eq!(handler("genus").lookup(&catalog, "streptomyces").unwrap(), vec![1, 42]);
        assert_eq!(handler("phylum").lookup(&catalog, "firmicutes").unwrap(), vec![23]);
        assert_eq!(
            vals(handler("genus").available(&catalog, "myces").unwrap()),
            vec!["Streptomyces"]
        );
        assert_eq!(
            vals(handler("species").available(&catalog, "OS").unwrap()),
            vec!["roseosporus"]
        );
    }

    #[test]
    fn test_accession_suggestions_are_substring() {
        let catalog = catalog();
        assert_eq!(
            vals(handler("acc").available(&catalog, "0002").unwrap()),
            vec!["BGC0000023"]
        );
        assert_eq!(handler("acc").lookup(&catalog, "bgc0000001").unwrap(), vec![1]);
    }

    #[test]
    fn test_completeness_skips_missing_values() {
        let catalog = catalog();
        let completeness = handler("completeness");
        assert_eq!(completeness.lookup(&catalog, "%complete").unwrap(), vec![23, 1]);
        assert_eq!(
            vals(completeness.available(&catalog, "in").unwrap()),
            vec!["Incomplete"]
        );
    }
}
