//! Data models for the frequency table.
//!
//! This module contains the core data structures: the ordered residue-pair
//! key and the aligned, insertion-ordered frequency table built from it.

use std::collections::HashMap;
use std::fmt;

/// An ordered pair of residue labels identifying one interaction.
///
/// Order is significant: `(A, B)` and `(B, A)` are distinct keys and no
/// normalization is performed. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResiduePair {
    pub first: String,
    pub second: String,
}

impl ResiduePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for ResiduePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.first, self.second)
    }
}

/// An aligned table of frequency rows keyed by [`ResiduePair`].
///
/// Every row has exactly `columns` values, positionally matching the input
/// sources; slots a source never reported stay 0.0. Keys iterate in
/// first-seen order across all sources, which is the order both the TSV
/// emitter and the heatmap renderer consume.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    columns: usize,
    index: HashMap<ResiduePair, usize>,
    entries: Vec<(ResiduePair, Vec<f64>)>,
}

impl FrequencyTable {
    /// Create an empty table with a fixed column count.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Number of value columns (one per input source).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of interaction keys currently in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set the value for `pair` in column `column`.
    ///
    /// A pair seen for the first time is appended with a zeroed row, so
    /// discovery order is preserved. Writing the same pair/column twice
    /// keeps the later value.
    ///
    /// # Panics
    /// Panics if `column >= columns`; the aggregator only passes source
    /// indices, which are in range by construction.
    pub fn set(&mut self, pair: ResiduePair, column: usize, value: f64) {
        assert!(column < self.columns, "column index out of range");

        let idx = match self.index.get(&pair) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(pair.clone(), idx);
                self.entries.push((pair, vec![0.0; self.columns]));
                idx
            }
        };
        self.entries[idx].1[column] = value;
    }

    /// Look up the row for a pair.
    #[allow(dead_code)] // Utility accessor (output paths iterate instead)
    pub fn get(&self, pair: &ResiduePair) -> Option<&[f64]> {
        self.index.get(pair).map(|&idx| self.entries[idx].1.as_slice())
    }

    /// Drop every row whose maximum value does not strictly exceed
    /// `cutoff`. A row sitting exactly at the cutoff is dropped. Surviving
    /// rows keep their relative order.
    pub fn retain_above(&mut self, cutoff: f64) {
        self.entries
            .retain(|(_, row)| row.iter().any(|&v| v > cutoff));

        // Retained positions have shifted; rebuild the index.
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (pair, _))| (pair.clone(), idx))
            .collect();
    }

    /// Iterate entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResiduePair, &[f64])> {
        self.entries
            .iter()
            .map(|(pair, row)| (pair, row.as_slice()))
    }

    /// Copy the rows into a dense matrix, in table order.
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.entries.iter().map(|(_, row)| row.clone()).collect()
    }

    /// Row labels in table order, one per entry.
    pub fn row_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(pair, _)| pair.to_string())
            .collect()
    }
}
