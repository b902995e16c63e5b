//! Named, typed, immutable in-memory tables.

use std::any::{type_name, Any};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{Result, TabulaError};
use crate::query::pipeline::Pipeline;

struct TableEntry {
    rows: Box<dyn Any + Send + Sync>,
    row_type: &'static str,
    len: usize,
}

/// Registry of fully materialized tables, keyed by name.
///
/// Tables are registered once at session start and read-only afterwards.
/// Because nothing mutates post-registration, a shared `&RowStore` can
/// serve independent pipelines from multiple threads without locking.
#[derive(Default)]
pub struct RowStore {
    tables: FxHashMap<String, TableEntry>,
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rows` under `name`, replacing any previous table with
    /// that name. Row order is preserved exactly as supplied.
    pub fn register<T>(&mut self, name: impl Into<String>, rows: Vec<T>)
    where
        T: Any + Send + Sync,
    {
        let name = name.into();
        let len = rows.len();
        debug!(table = %name, rows = len, "table registered");
        self.tables.insert(
            name,
            TableEntry {
                rows: Box::new(rows),
                row_type: type_name::<T>(),
                len,
            },
        );
    }

    /// Full, order-preserving row slice for a named table.
    ///
    /// Fails with [`TabulaError::UnknownTable`] for an unregistered name
    /// and [`TabulaError::TableType`] when `T` is not the registered row
    /// type.
    pub fn rows<T: Any>(&self, name: &str) -> Result<&[T]> {
        let entry = self
            .tables
            .get(name)
            .ok_or_else(|| TabulaError::UnknownTable {
                table: name.to_owned(),
            })?;
        entry
            .rows
            .downcast_ref::<Vec<T>>()
            .map(Vec::as_slice)
            .ok_or_else(|| TabulaError::TableType {
                table: name.to_owned(),
                requested: type_name::<T>(),
                registered: entry.row_type,
            })
    }

    /// Starts a pipeline over a cloned snapshot of the named table.
    pub fn scan<T>(&self, name: &str) -> Result<Pipeline<'_, T>>
    where
        T: Any + Clone,
    {
        let rows = self.rows::<T>(name)?.to_vec();
        Ok(Pipeline::from_source(format!("scan({name})"), rows))
    }

    /// Whether a table with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Registered table names, sorted for deterministic output.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of rows in a named table.
    pub fn row_count(&self, name: &str) -> Result<usize> {
        self.tables
            .get(name)
            .map(|entry| entry.len)
            .ok_or_else(|| TabulaError::UnknownTable {
                table: name.to_owned(),
            })
    }
}
