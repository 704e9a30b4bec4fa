//! Value counts and other label rankings.

use std::cmp::Ordering;

use arrow::array::StringArray;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::utils::arrow::string_column;

/// Labels paired with a value, ordered by value descending then label ascending
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking<T> {
    entries: Vec<(String, T)>,
}

/// Occurrences per label
pub type ValueCounts = Ranking<usize>;

/// Percentage per label
pub type Percentages = Ranking<f64>;

impl<T> Default for Ranking<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialOrd> Ranking<T> {
    /// Sort arbitrary entries into a ranking
    #[must_use]
    pub fn from_unsorted(mut entries: Vec<(String, T)>) -> Self {
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { entries }
    }
}

impl<T> Ranking<T> {
    /// Wrap entries that are already in the desired order
    #[must_use]
    pub fn from_sorted(entries: Vec<(String, T)>) -> Self {
        Self { entries }
    }

    /// The first `n` entries
    #[must_use]
    pub fn head(&self, n: usize) -> Self
    where
        T: Clone,
    {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Keep the entries matching a predicate, preserving order
    #[must_use]
    pub fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&str, &T) -> bool,
    {
        self.entries.retain(|(label, value)| keep(label, value));
        self
    }

    /// Value for a label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Labels in ranking order
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Iterate over `(label, value)` pairs in ranking order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    /// Number of labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no labels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Ranking<f64> {
    /// Values in ranking order
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }
}

impl ValueCounts {
    /// Sum of all counts, i.e. the number of non-missing values
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Each count as a percentage of the total, same order
    #[must_use]
    pub fn percentages(&self) -> Percentages {
        let total = self.total();
        if total == 0 {
            return Ranking::default();
        }
        Ranking::from_sorted(
            self.entries
                .iter()
                .map(|(l, c)| (l.clone(), *c as f64 * 100.0 / total as f64))
                .collect(),
        )
    }

    /// Counts as floats, for charting
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, c)| *c as f64).collect()
    }
}

/// Count the non-missing values of a text column
#[must_use]
pub fn value_counts(array: &StringArray) -> ValueCounts {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for value in array.iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }
    Ranking::from_unsorted(
        counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect_vec(),
    )
}

/// Count the non-missing values of a text column, labels in order of first appearance
#[must_use]
pub fn value_counts_in_order(array: &StringArray) -> ValueCounts {
    let mut position: FxHashMap<&str, usize> = FxHashMap::default();
    let mut entries: Vec<(String, usize)> = Vec::new();
    for value in array.iter().flatten() {
        match position.get(value) {
            Some(&idx) => entries[idx].1 += 1,
            None => {
                position.insert(value, entries.len());
                entries.push((value.to_string(), 1));
            }
        }
    }
    Ranking::from_sorted(entries)
}

/// Count the non-missing values of a named text column
pub fn value_counts_of(batch: &RecordBatch, column: &str) -> Result<ValueCounts> {
    Ok(value_counts(string_column(batch, column)?))
}
