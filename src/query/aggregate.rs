//! Grouping and per-group aggregates.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{Result, TabulaError};

/// Rows sharing one extracted key.
#[derive(Clone, Debug)]
pub struct Group<K, R> {
    key: K,
    rows: Vec<R>,
}

impl<K, R> Group<K, R> {
    /// Builds a group directly; used by `group_by` and by callers deriving
    /// their own groupings.
    pub fn new(key: K, rows: Vec<R>) -> Self {
        Self { key, rows }
    }

    /// The group key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The member rows, in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of member rows. Zero for an empty group; counting never fails.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Sum of the extracted field across the group.
    ///
    /// Fails with [`TabulaError::EmptyGroup`] on zero rows rather than
    /// defaulting to zero, so a malformed grouping surfaces at the caller.
    pub fn sum<F>(&self, extract: F) -> Result<f64>
    where
        F: Fn(&R) -> f64,
    {
        if self.rows.is_empty() {
            return Err(TabulaError::EmptyGroup { operation: "sum" });
        }
        Ok(self.rows.iter().map(extract).sum())
    }

    /// Arithmetic mean of the extracted field across the group.
    ///
    /// Fails with [`TabulaError::EmptyGroup`] on zero rows; never 0 or NaN.
    pub fn average<F>(&self, extract: F) -> Result<f64>
    where
        F: Fn(&R) -> f64,
    {
        if self.rows.is_empty() {
            return Err(TabulaError::EmptyGroup {
                operation: "average",
            });
        }
        let total: f64 = self.rows.iter().map(&extract).sum();
        Ok(total / self.rows.len() as f64)
    }

    /// Consumes the group, yielding its rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

/// Groups `rows` by extracted key, preserving first-encounter key order.
///
/// Key equality is value equality. The output order is deterministic: the
/// group for a key sits at the position where that key first appeared in
/// the input, and rows within a group keep input order. Callers wanting
/// key-sorted output add an explicit sort stage afterwards.
pub fn group_by<R, K, F>(rows: Vec<R>, key: F) -> Vec<Group<K, R>>
where
    K: Eq + Hash + Clone,
    F: Fn(&R) -> K,
{
    let mut index: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<Group<K, R>> = Vec::new();
    for row in rows {
        let k = key(&row);
        match index.get(&k) {
            Some(&slot) => groups[slot].rows.push(row),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push(Group::new(k, vec![row]));
            }
        }
    }
    groups
}
