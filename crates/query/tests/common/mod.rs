//! Test infrastructure for the query engine.

pub mod fixtures;

pub use fixtures::*;
