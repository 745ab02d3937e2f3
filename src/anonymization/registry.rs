//! Memoizing transform registry
//!
//! The registry owns one [`TransformTable`] per [`TransformKind`]. Repeated
//! values are served from the table, which keeps every value mapped to
//! the same output for the whole run and avoids re-hashing.
//!
//! Keys and outputs are raw bytes, so values that are not valid UTF-8
//! are memoized like any other.
//!
//! Tables live as long as the registry. Nothing is evicted and nothing is
//! persisted: a run is one batch of log files, not a long-lived service.

use crate::anonymization::anonymizer::TransformKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Memoization table for a single transform kind
///
/// Once a key is written its value never changes.
#[derive(Debug, Default)]
pub struct TransformTable {
    entries: HashMap<Vec<u8>, Vec<u8>>,
    hits: u64,
    misses: u64,
}

impl TransformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored output for `value`, computing and storing it on a miss
    pub fn get_or_compute<F>(&mut self, value: &[u8], compute: F) -> &[u8]
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        if self.entries.contains_key(value) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let computed = compute(value);
            self.entries.insert(value.to_vec(), computed);
        }
        &self.entries[value]
    }

    /// Look up a previously computed output without computing
    pub fn get(&self, value: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.entries.get(value.as_ref()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Counters for one transform table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    /// Distinct values stored
    pub entries: usize,
    /// Lookups answered from the table
    pub hits: u64,
    /// Lookups that computed a new output
    pub misses: u64,
}

/// Snapshot of all transform tables, keyed by kind name
pub type RegistryStats = BTreeMap<TransformKind, TableStats>;

/// Registry of memoized field transforms
///
/// Created empty by the caller and injected into the engine; it is the
/// only state shared across all lines and files of a run. Access is
/// through `&mut self`, so a single owner serializes every update.
///
/// # Examples
///
/// ```
/// use loganon::anonymization::anonymizer::TransformKind;
/// use loganon::anonymization::registry::TransformRegistry;
///
/// let mut registry = TransformRegistry::new();
/// let first = registry.transform(TransformKind::Ip, "10.0.0.1");
/// let second = registry.transform(TransformKind::Ip, "10.0.0.1");
/// assert_eq!(first, b"40.0.0.1");
/// assert_eq!(first, second);
/// ```
#[derive(Debug)]
pub struct TransformRegistry {
    tables: HashMap<TransformKind, TransformTable>,
}

impl TransformRegistry {
    /// Create a registry with one empty table per kind
    pub fn new() -> Self {
        let tables = TransformKind::ALL
            .iter()
            .map(|kind| (*kind, TransformTable::new()))
            .collect();
        Self { tables }
    }

    /// Transform `value` with `kind`, consulting the kind's table first
    pub fn transform(&mut self, kind: TransformKind, value: impl AsRef<[u8]>) -> Vec<u8> {
        self.table_mut(kind)
            .get_or_compute(value.as_ref(), |v| kind.apply(v))
            .to_vec()
    }

    /// Table for `kind`
    pub fn table(&self, kind: TransformKind) -> Option<&TransformTable> {
        self.tables.get(&kind)
    }

    fn table_mut(&mut self, kind: TransformKind) -> &mut TransformTable {
        self.tables.entry(kind).or_default()
    }

    /// Per-kind counters
    pub fn stats(&self) -> RegistryStats {
        self.tables
            .iter()
            .map(|(kind, table)| (*kind, table.stats()))
            .collect()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
