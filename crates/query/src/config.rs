//! Query engine configuration.
//!
//! [`QueryConfig`] is a set of `clap` arguments so front ends can flatten it
//! into their own command line, with environment variable fallbacks.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MIBIG_MAX_DEPTH` | 200 | Deepest query tree accepted |
//! | `MIBIG_UNRESOLVED_CATEGORY` | reject | `reject` or `passthrough` |
//! | `MIBIG_CATEGORY_PRIORITY` | type,acc,compound,genus,species | Candidate categories for unscoped terms |
//!
//! # Example
//!
//! ```rust
//! use mibig_query::{QueryConfig, UnresolvedCategoryPolicy};
//!
//! let config = QueryConfig {
//!     unresolved_category: UnresolvedCategoryPolicy::Passthrough,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::collections::HashSet;

use clap::Args;

use crate::parser::DEFAULT_MAX_DEPTH;
use crate::resolver::{DEFAULT_CATEGORY_PRIORITY, UnresolvedCategoryPolicy};

/// Settings for parsing and evaluating queries.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct QueryConfig {
    /// Maximum depth of a query tree; also caps parenthesis nesting and the
    /// number of operands in one chain.
    #[arg(long, env = "MIBIG_MAX_DEPTH", default_value = "200")]
    pub max_depth: usize,

    /// What to do with terms no candidate category matches.
    #[arg(
        long,
        env = "MIBIG_UNRESOLVED_CATEGORY",
        value_enum,
        default_value = "reject"
    )]
    pub unresolved_category: UnresolvedCategoryPolicy,

    /// Candidate categories for unscoped terms (comma-separated, highest priority first).
    #[arg(
        long,
        env = "MIBIG_CATEGORY_PRIORITY",
        default_value = "type,acc,compound,genus,species"
    )]
    pub category_priority: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unresolved_category: UnresolvedCategoryPolicy::Reject,
            category_priority: DEFAULT_CATEGORY_PRIORITY.join(","),
        }
    }
}

impl QueryConfig {
    /// The candidate categories in probing order.
    pub fn category_priority(&self) -> Vec<String> {
        self.category_priority
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        let priority = self.category_priority();
        if priority.is_empty() {
            errors.push("Category priority cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for category in &priority {
            if !seen.insert(category.as_str()) {
                errors.push(format!("Category '{}' listed more than once", category));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses a small depth bound so depth errors are cheap to trigger.
    pub fn for_testing() -> Self {
        Self {
            max_depth: 16,
            ..Default::default()
        }
    }
}
