//! Category auto-detection for unscoped search terms.
//!
//! A bare term such as `nrps` carries the category [`UNKNOWN_CATEGORY`].
//! Before it can be looked up, a [`CategoryResolver`] decides which category
//! it belongs to. [`StoreCategoryResolver`] probes the store with a fixed,
//! ordered list of candidates and picks the first one with any match.

use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::store::EntryStore;
use crate::term::UNKNOWN_CATEGORY;

/// Candidate categories probed for unscoped terms, highest priority first.
pub const DEFAULT_CATEGORY_PRIORITY: [&str; 5] = ["type", "acc", "compound", "genus", "species"];

/// What to do when no candidate category matches a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnresolvedCategoryPolicy {
    /// Fail with [`QueryError::InvalidCategory`].
    #[default]
    Reject,
    /// Keep the category as `unknown`; the term then matches nothing.
    Passthrough,
}

/// Picks a concrete category for a term whose category is unknown.
pub trait CategoryResolver {
    /// Returns the resolved category key. Under
    /// [`UnresolvedCategoryPolicy::Passthrough`] this may be
    /// [`UNKNOWN_CATEGORY`].
    fn resolve_category(&self, term: &str) -> QueryResult<String>;
}

/// Resolver backed by an [`EntryStore`]'s existence counts.
#[derive(Debug, Clone)]
pub struct StoreCategoryResolver<S> {
    store: S,
    candidates: Vec<String>,
    policy: UnresolvedCategoryPolicy,
}

impl<S: EntryStore> StoreCategoryResolver<S> {
    /// Creates a resolver with the default candidate order and the
    /// [`UnresolvedCategoryPolicy::Reject`] policy.
    pub fn new(store: S) -> Self {
        Self {
            store,
            candidates: DEFAULT_CATEGORY_PRIORITY
                .iter()
                .map(|c| c.to_string())
                .collect(),
            policy: UnresolvedCategoryPolicy::default(),
        }
    }

    /// Replaces the candidate categories, highest priority first.
    pub fn with_candidates<I, C>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the policy applied when no candidate matches.
    pub fn with_policy(mut self, policy: UnresolvedCategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The candidate categories in probing order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

impl<S: EntryStore> CategoryResolver for StoreCategoryResolver<S> {
    fn resolve_category(&self, term: &str) -> QueryResult<String> {
        for category in &self.candidates {
            if self.store.category_exists(category, term)? > 0 {
                debug!(term = %term, category = %category, "Resolved search category");
                return Ok(category.clone());
            }
        }

        match self.policy {
            UnresolvedCategoryPolicy::Reject => Err(QueryError::InvalidCategory {
                term: term.to_string(),
            }),
            UnresolvedCategoryPolicy::Passthrough => {
                debug!(term = %term, "No search category matched, leaving unresolved");
                Ok(UNKNOWN_CATEGORY.to_string())
            }
        }
    }
}
