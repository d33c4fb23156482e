// src/episode/occurrence.rs — Occurrence intervals and the one-symbol index

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A closed interval `[start, end]` of 0-based positions in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

impl Occurrence {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Trivial occurrence of a single symbol at `position`.
    pub fn at(position: usize) -> Self {
        Self::new(position, position)
    }

    pub fn overlaps(&self, other: &Occurrence) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

impl From<(usize, usize)> for Occurrence {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Per-symbol occurrence lists, iterated in first-appearance order.
#[derive(Debug, Clone)]
pub struct OccurrenceIndex<K> {
    entries: IndexMap<K, Vec<Occurrence>>,
}

impl<K: Eq + Hash> Default for OccurrenceIndex<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Eq + Hash> OccurrenceIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key` was seen at `position`.
    pub fn record(&mut self, key: K, position: usize) {
        self.entries
            .entry(key)
            .or_default()
            .push(Occurrence::at(position));
    }

    /// Occurrences of `key`, or an empty slice for unseen keys.
    pub fn occurrences(&self, key: &K) -> &[Occurrence] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn frequency(&self, key: &K) -> usize {
        self.occurrences(key).len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Occurrence])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

/// Scan `sequence` once, building the occurrence index and returning the
/// symbols seen at least `min_frequency` times, in first-appearance order.
pub fn select_frequent_symbols<T, K, F>(
    sequence: &[T],
    key_of: F,
    min_frequency: usize,
) -> (Vec<K>, OccurrenceIndex<K>)
where
    K: Clone + Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index = OccurrenceIndex::new();
    for (position, item) in sequence.iter().enumerate() {
        index.record(key_of(item), position);
    }

    let frequent = index
        .iter()
        .filter(|(_, occurrences)| occurrences.len() >= min_frequency)
        .map(|(key, _)| key.clone())
        .collect();

    (frequent, index)
}
