//! Set operations over entry id lists.
//!
//! Inputs may be unsorted and contain duplicates; every result is
//! deduplicated. Ordering is deterministic:
//!
//! | Operation | Result order |
//! |-----------|--------------|
//! | [`intersect`] | order of first appearance in `b` |
//! | [`union`] | ascending |
//! | [`difference`] | order of first appearance in `a` |

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

/// Elements present in both `a` and `b`.
pub fn intersect<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let in_a: HashSet<&T> = a.iter().collect();
    let mut seen = HashSet::with_capacity(in_a.len().min(b.len()));
    b.iter()
        .filter(|item| in_a.contains(item) && seen.insert(*item))
        .cloned()
        .collect()
}

/// Elements present in either `a` or `b`, sorted ascending.
pub fn union<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Ord + Clone,
{
    a.iter()
        .chain(b.iter())
        .collect::<BTreeSet<&T>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Elements of `a` that are not in `b`.
pub fn difference<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let in_b: HashSet<&T> = b.iter().collect();
    let mut seen = HashSet::with_capacity(a.len());
    a.iter()
        .filter(|item| !in_b.contains(item) && seen.insert(*item))
        .cloned()
        .collect()
}
