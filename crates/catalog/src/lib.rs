//! In-memory MIBiG catalog store.
//!
//! This crate implements the [`EntryStore`](mibig_query::EntryStore)
//! contract of `mibig-query` over a JSON catalog document, and adds the
//! read-only views a repository front end needs: term suggestions, entry
//! summaries and statistics.
//!
//! # Architecture
//!
//! - [`model`] - The catalog document and its integrity checks
//! - [`pattern`] - Case-insensitive `LIKE` matching
//! - [`handlers`] - Per-category lookup, detection and suggestions
//! - [`store`] - [`CatalogStore`], dispatching categories to handlers
//! - [`summary`] - Response shapes (entry summaries, statistics)
//! - [`error`] - Load errors
//!
//! # Example
//!
//! ```
//! use mibig_catalog::{Catalog, CatalogStore};
//! use mibig_query::{QueryConfig, QueryEngine};
//!
//! let catalog = Catalog::from_json(r#"{
//!     "bgc_types": [
//!         {"term": "ripp", "name": "RiPP", "description": "RiPP", "css_class": "ripp", "parent": null},
//!         {"term": "lanthipeptide", "name": "Lanthipeptide", "description": "Lanthipeptide",
//!          "css_class": "ripp", "parent": "ripp"}
//!     ],
//!     "entries": [
//!         {"id": 535, "accession": "BGC0000535", "biosyn_classes": ["lanthipeptide"],
//!          "compounds": ["nisin A"], "taxonomy": {"genus": "Lactococcus", "name": "Lactococcus lactis"}}
//!     ]
//! }"#).unwrap();
//!
//! let engine = QueryEngine::new(CatalogStore::with_default_handlers(catalog), QueryConfig::default());
//! let query = engine.parse("ripp lactococcus").unwrap();
//! let ids = engine.search(&query).unwrap();
//! assert_eq!(ids, vec![535]);
//! assert_eq!(engine.store().get(&ids)[0].products, vec!["nisin A"]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod handlers;
pub mod model;
pub mod pattern;
pub mod store;
pub mod summary;

// Re-export commonly used types at crate root
pub use error::{CatalogError, CatalogResult};
pub use handlers::{
    CategoryHandler, EntryField, FieldHandler, HandlerMap, SuggestMatch, TypeHandler,
    default_handlers,
};
pub use model::{BgcType, Catalog, CatalogEntry, TaxonRank, Taxonomy};
pub use pattern::IlikePattern;
pub use store::CatalogStore;
pub use summary::{
    AvailableTerm, LabelsAndCounts, ProductTag, RepositoryEntry, ResultStats, StatCluster,
    StatCounts, TaxonStats, UNKNOWN_COMPLETENESS,
};
