//! Entry store contract.
//!
//! The evaluator never talks to a database directly. Everything it needs
//! from the backing store is expressed by [`EntryStore`]: resolving a
//! category-scoped term to entry ids, and counting matches for category
//! auto-detection.

use std::sync::Arc;

use crate::error::StoreResult;

/// Identifier of a catalog entry.
pub type EntryId = u64;

/// Backing store consulted during evaluation.
///
/// Implementations must be shareable across request threads.
pub trait EntryStore: Send + Sync {
    /// Returns the ids of entries matching `term` within `category`.
    ///
    /// A category the store has no lookup for yields an empty list, not an
    /// error. Errors are reserved for failures of the store itself.
    fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>>;

    /// Counts how many records of `category` match `term`.
    ///
    /// Used to guess the category of unscoped terms; only whether the count
    /// is non-zero matters.
    fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize>;
}

impl<S: EntryStore + ?Sized> EntryStore for &S {
    fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
        (**self).lookup(category, term)
    }

    fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
        (**self).category_exists(category, term)
    }
}

impl<S: EntryStore + ?Sized> EntryStore for Arc<S> {
    fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
        (**self).lookup(category, term)
    }

    fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
        (**self).category_exists(category, term)
    }
}

impl<S: EntryStore + ?Sized> EntryStore for Box<S> {
    fn lookup(&self, category: &str, term: &str) -> StoreResult<Vec<EntryId>> {
        (**self).lookup(category, term)
    }

    fn category_exists(&self, category: &str, term: &str) -> StoreResult<usize> {
        (**self).category_exists(category, term)
    }
}
