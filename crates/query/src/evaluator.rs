//! Query tree evaluation.
//!
//! Leaves are looked up in an [`EntryStore`]; operation nodes combine the
//! id lists of their children with the functions in [`crate::sets`]:
//!
//! | Operator | Combination |
//! |----------|-------------|
//! | `AND` | [`intersect`] |
//! | `OR` | [`union`] |
//! | `EXCEPT` | [`difference`] (left minus right) |
//!
//! Leaves with an unknown category are resolved when they are reached. The
//! tree passed in is never modified; [`Evaluator::resolve_categories`]
//! returns a resolved copy when one is wanted.

use tracing::trace;

use crate::error::{QueryError, QueryResult};
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::resolver::{CategoryResolver, StoreCategoryResolver};
use crate::sets::{difference, intersect, union};
use crate::store::{EntryId, EntryStore};
use crate::term::{Expression, Operation, Operator, QueryTerm, UNKNOWN_CATEGORY};

/// Walks query trees against a store.
pub struct Evaluator<'a, S: ?Sized, R: ?Sized> {
    store: &'a S,
    resolver: &'a R,
    max_depth: usize,
}

impl<'a, S, R> Evaluator<'a, S, R>
where
    S: EntryStore + ?Sized,
    R: CategoryResolver + ?Sized,
{
    /// Creates an evaluator with the default depth bound.
    pub fn new(store: &'a S, resolver: &'a R) -> Self {
        Self {
            store,
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the deepest tree the evaluator will walk.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Evaluates `term` to the ids of the matching entries.
    pub fn evaluate(&self, term: &QueryTerm) -> QueryResult<Vec<EntryId>> {
        self.evaluate_at(term, 1)
    }

    fn evaluate_at(&self, term: &QueryTerm, depth: usize) -> QueryResult<Vec<EntryId>> {
        self.check_depth(depth)?;
        match term {
            QueryTerm::Expression(expr) => self.evaluate_expression(expr),
            QueryTerm::Operation(op) => {
                let left = self.evaluate_at(&op.left, depth + 1)?;
                let right = self.evaluate_at(&op.right, depth + 1)?;
                let ids = match op.operator {
                    Operator::And => intersect(&left, &right),
                    Operator::Or => union(&left, &right),
                    Operator::Except => difference(&left, &right),
                };
                trace!(
                    operator = %op.operator,
                    left = left.len(),
                    right = right.len(),
                    result = ids.len(),
                    "Combined operation results"
                );
                Ok(ids)
            }
        }
    }

    fn evaluate_expression(&self, expr: &Expression) -> QueryResult<Vec<EntryId>> {
        let category = if expr.is_unresolved() {
            self.resolver.resolve_category(&expr.term)?
        } else {
            expr.category.clone()
        };

        // Passthrough resolution: nothing can match an unknown category.
        if category == UNKNOWN_CATEGORY {
            return Ok(Vec::new());
        }

        let ids = self.store.lookup(&category, &expr.term)?;
        trace!(category = %category, term = %expr.term, matches = ids.len(), "Looked up expression");
        Ok(ids)
    }

    /// Returns a copy of `term` with every unknown category resolved.
    pub fn resolve_categories(&self, term: &QueryTerm) -> QueryResult<QueryTerm> {
        self.resolve_at(term, 1)
    }

    fn resolve_at(&self, term: &QueryTerm, depth: usize) -> QueryResult<QueryTerm> {
        self.check_depth(depth)?;
        match term {
            QueryTerm::Expression(expr) if expr.is_unresolved() => {
                let category = self.resolver.resolve_category(&expr.term)?;
                Ok(QueryTerm::expression(category, expr.term.clone()))
            }
            QueryTerm::Expression(_) => Ok(term.clone()),
            QueryTerm::Operation(op) => Ok(QueryTerm::Operation(Operation::new(
                op.operator,
                self.resolve_at(&op.left, depth + 1)?,
                self.resolve_at(&op.right, depth + 1)?,
            ))),
        }
    }

    fn check_depth(&self, depth: usize) -> QueryResult<()> {
        if depth > self.max_depth {
            return Err(QueryError::malformed(format!(
                "query tree exceeds maximum depth of {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

/// Evaluates `term` with the default resolver and depth bound.
pub fn evaluate<S>(term: &QueryTerm, store: &S) -> QueryResult<Vec<EntryId>>
where
    S: EntryStore + ?Sized,
{
    let resolver = StoreCategoryResolver::new(store);
    Evaluator::new(store, &resolver).evaluate(term)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::parser::parse_query;
    use crate::resolver::UnresolvedCategoryPolicy;

    #[derive(Default)]
    struct MapStore {
        lookups: HashMap<(String, String), Vec<EntryId>>,
        broken: bool,
    }

    impl MapStore {
        fn with(mut self, category: &str, term: &str, ids: &[EntryId]) -> Self {
            self.lookups
                .insert((category.to_string(), term.to_string()), ids.to_vec());
            self
        }
    }

    impl EntryStore for MapStore {
        fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
            if self.broken {
                return Err(StoreError::backend("lookup failed"));
            }
            Ok(self
                .lookups
                .get(&(category.to_string(), term.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
            Ok(self
                .lookups
                .get(&(category.to_string(), term.to_string()))
                .map_or(0, Vec::len))
        }
    }

    fn clusters() -> MapStore {
        MapStore::default()
            .with("type", "ripp", &[535])
            .with("type", "nrps", &[1070])
            .with("genus", "streptomyces", &[1070, 12, 535])
            .with("genus", "lactococcus", &[77])
    }

    #[test]
    fn test_or_is_sorted_union() {
        let store = clusters();
        let term = parse_query("[type]nrps OR [type]ripp").unwrap();
        assert_eq!(evaluate(&term, &store).unwrap(), vec![535, 1070]);
    }

    #[test]
    fn test_and_of_disjoint_sets_is_empty() {
        let store = clusters();
        let term = parse_query("[type]nrps AND [type]ripp").unwrap();
        assert!(evaluate(&term, &store).unwrap().is_empty());
    }

    #[test]
    fn test_except() {
        let store = clusters();
        let term = parse_query("[genus]streptomyces EXCEPT [type]nrps").unwrap();
        assert_eq!(evaluate(&term, &store).unwrap(), vec![12, 535]);
    }

    #[test]
    fn test_unknown_category_resolves_lazily() {
        let store = clusters();
        let term = parse_query("ripp AND ( streptomyces OR lactococcus )").unwrap();
        assert_eq!(evaluate(&term, &store).unwrap(), vec![535]);
        // The parsed tree is left untouched.
        assert!(!term.is_resolved());
    }

    #[test]
    fn test_unresolvable_term_is_rejected() {
        let store = clusters();
        let err = evaluate(&QueryTerm::unknown("nothing"), &store).unwrap_err();
        assert!(matches!(err, QueryError::InvalidCategory { ref term } if term == "nothing"));
    }

    #[test]
    fn test_passthrough_yields_empty() {
        let store = clusters();
        let resolver =
            StoreCategoryResolver::new(&store).with_policy(UnresolvedCategoryPolicy::Passthrough);
        let evaluator = Evaluator::new(&store, &resolver);
        let term = parse_query("nothing OR ripp").unwrap();
        assert_eq!(evaluator.evaluate(&term).unwrap(), vec![535]);
        assert!(
            evaluator
                .evaluate(&QueryTerm::unknown("nothing"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_unsupported_category_is_empty() {
        let store = clusters();
        let term = QueryTerm::expression("kingdom", "ripp");
        assert!(evaluate(&term, &store).unwrap().is_empty());
    }

    #[test]
    fn test_store_errors_propagate() {
        let store = MapStore {
            broken: true,
            ..clusters()
        };
        let err = evaluate(&QueryTerm::expression("type", "nrps"), &store).unwrap_err();
        match err {
            QueryError::Store(StoreError::Backend { message, .. }) => {
                assert_eq!(message, "lookup failed")
            }
            other => panic!("Expected store error, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_bound() {
        let store = clusters();
        let resolver = StoreCategoryResolver::new(&store);
        let mut term = QueryTerm::expression("type", "ripp");
        for _ in 0..5 {
            term = QueryTerm::or(term, QueryTerm::expression("type", "nrps"));
        }
        assert_eq!(term.depth(), 6);

        let evaluator = Evaluator::new(&store, &resolver).with_max_depth(6);
        assert_eq!(evaluator.evaluate(&term).unwrap(), vec![535, 1070]);

        let evaluator = Evaluator::new(&store, &resolver).with_max_depth(5);
        let err = evaluator.evaluate(&term).unwrap_err();
        assert!(err.to_string().contains("maximum depth of 5"));
        assert!(evaluator.resolve_categories(&term).is_err());
    }

    #[test]
    fn test_resolve_categories() {
        let store = clusters();
        let resolver = StoreCategoryResolver::new(&store);
        let evaluator = Evaluator::new(&store, &resolver);
        let term = parse_query("ripp ( [compound]x OR streptomyces )").unwrap();
        let resolved = evaluator.resolve_categories(&term).unwrap();
        assert!(resolved.is_resolved());
        assert_eq!(
            resolved.query_text(),
            "( [type]ripp AND ( [compound]x OR [genus]streptomyces ) )"
        );
    }

    #[test]
    fn test_resolve_categories_rejects_unknown_term() {
        let store = clusters();
        let resolver = StoreCategoryResolver::new(&store);
        let evaluator = Evaluator::new(&store, &resolver);
        let term = parse_query("ripp nothing").unwrap();
        assert!(matches!(
            evaluator.resolve_categories(&term),
            Err(QueryError::InvalidCategory { .. })
        ));
    }
}
