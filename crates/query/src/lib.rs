//! MIBiG boolean query language.
//!
//! This crate parses and evaluates the query language used to search the
//! MIBiG repository of biosynthetic gene clusters. A query combines
//! category-scoped terms with `AND`, `OR` and `EXCEPT`:
//!
//! ```text
//! [type]ripp AND ( streptomyces OR [genus]lactococcus ) EXCEPT [acc]BGC0000535
//! ```
//!
//! Terms without a `[category]` prefix are assigned one at evaluation time
//! by probing the store, and two terms with no keyword between them are
//! combined with `AND`.
//!
//! # Architecture
//!
//! - [`parser`] - Tokenizer and recursive-descent parser
//! - [`term`] - The [`QueryTerm`] tree and its JSON wire form
//! - [`query`] - The [`Query`] envelope (search type, return type, terms)
//! - [`store`] - The [`EntryStore`] contract evaluation runs against
//! - [`resolver`] - Category auto-detection for unscoped terms
//! - [`evaluator`] - Tree evaluation by set algebra over entry ids
//! - [`sets`] - Deterministic union, intersection and difference
//! - [`engine`] - [`QueryEngine`], a configured front for all of the above
//! - [`config`] - [`QueryConfig`] with environment variable fallbacks
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```
//! use mibig_query::{QueryTerm, parse_query};
//!
//! let term = parse_query("ripp AND ( streptomyces OR lactococcus )").unwrap();
//! assert_eq!(
//!     term,
//!     QueryTerm::and(
//!         QueryTerm::unknown("ripp"),
//!         QueryTerm::or(
//!             QueryTerm::unknown("streptomyces"),
//!             QueryTerm::unknown("lactococcus"),
//!         ),
//!     )
//! );
//! assert_eq!(term.query_text(), "( ripp AND ( streptomyces OR lactococcus ) )");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod query;
pub mod resolver;
pub mod sets;
pub mod store;
pub mod term;

// Re-export commonly used types at crate root
pub use config::QueryConfig;
pub use engine::QueryEngine;
pub use error::{QueryError, QueryResult, StoreError, StoreResult};
pub use evaluator::{Evaluator, evaluate};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse, parse_query, parse_query_with_max_depth, tokenize};
pub use query::{Query, QueryType, ReturnType};
pub use resolver::{
    CategoryResolver, DEFAULT_CATEGORY_PRIORITY, StoreCategoryResolver, UnresolvedCategoryPolicy,
};
pub use store::{EntryId, EntryStore};
pub use term::{Expression, Operation, Operator, QueryTerm, UNKNOWN_CATEGORY};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
