//! Test infrastructure for the catalog store.

pub mod fixtures;

pub use fixtures::*;
