//! Configured entry point tying parser, resolver and evaluator together.

use tracing::debug;

use crate::config::QueryConfig;
use crate::error::QueryResult;
use crate::evaluator::Evaluator;
use crate::parser::parse_query_with_max_depth;
use crate::query::Query;
use crate::resolver::StoreCategoryResolver;
use crate::store::{EntryId, EntryStore};
use crate::term::QueryTerm;

/// Runs queries against a store using one [`QueryConfig`].
///
/// ```
/// use std::collections::HashMap;
/// use mibig_query::{EntryId, EntryStore, QueryConfig, QueryEngine, StoreResult};
///
/// struct Types(HashMap<&'static str, Vec<EntryId>>);
///
/// impl EntryStore for Types {
///     fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
///         Ok(match category {
///             "type" => self.0.get(term).cloned().unwrap_or_default(),
///             _ => Vec::new(),
///         })
///     }
///
///     fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
///         Ok(self.lookup(category, term)?.len())
///     }
/// }
///
/// let store = Types(HashMap::from([("ripp", vec![535]), ("nrps", vec![1070])]));
/// let engine = QueryEngine::new(store, QueryConfig::default());
/// let query = engine.parse("nrps OR ripp").unwrap();
/// assert_eq!(engine.search(&query).unwrap(), vec![535, 1070]);
/// ```
pub struct QueryEngine<S> {
    store: S,
    config: QueryConfig,
}

impl<S: EntryStore> QueryEngine<S> {
    /// Creates an engine over `store`.
    pub fn new(store: S, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The engine settings.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Parses a query string with the configured depth bound.
    pub fn parse(&self, input: &str) -> QueryResult<Query> {
        let terms = parse_query_with_max_depth(input, self.config.max_depth)?;
        Ok(Query::new(terms))
    }

    /// Returns the ids of entries matching the query's terms.
    pub fn search(&self, query: &Query) -> QueryResult<Vec<EntryId>> {
        let ids = self.evaluate(&query.terms)?;
        debug!(
            search = %query.query_type,
            query = %query.terms,
            matches = ids.len(),
            "Evaluated query"
        );
        Ok(ids)
    }

    /// Evaluates a bare term tree.
    pub fn evaluate(&self, term: &QueryTerm) -> QueryResult<Vec<EntryId>> {
        let resolver = self.resolver();
        Evaluator::new(&self.store, &resolver)
            .with_max_depth(self.config.max_depth)
            .evaluate(term)
    }

    /// Returns the query with every unknown category resolved.
    pub fn convert(&self, query: Query) -> QueryResult<Query> {
        let resolver = self.resolver();
        let terms = Evaluator::new(&self.store, &resolver)
            .with_max_depth(self.config.max_depth)
            .resolve_categories(&query.terms)?;
        Ok(Query { terms, ..query })
    }

    fn resolver(&self) -> StoreCategoryResolver<&S> {
        StoreCategoryResolver::new(&self.store)
            .with_candidates(self.config.category_priority())
            .with_policy(self.config.unresolved_category)
    }
}
