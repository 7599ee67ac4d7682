use std::collections::{HashMap, HashSet};

/// How n-gram occurrences are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// Count every occurrence (needed for frequency ranking)
    Counting,
    /// Record presence only
    Unique,
}

impl CountMode {
    /// Counting is only worth its memory when the output is ranked
    pub fn for_output(sorted: bool) -> Self {
        if sorted {
            Self::Counting
        } else {
            Self::Unique
        }
    }
}

/// Accumulated n-grams for one session
///
/// Entries are only ever added or incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NgramTable {
    /// n-gram -> occurrence count (always >= 1)
    Counts(HashMap<String, u64>),
    /// n-gram presence
    Unique(HashSet<String>),
}

impl NgramTable {
    pub fn new(mode: CountMode) -> Self {
        match mode {
            CountMode::Counting => Self::Counts(HashMap::new()),
            CountMode::Unique => Self::Unique(HashSet::new()),
        }
    }

    /// Records one occurrence of `key`
    pub fn record(&mut self, key: String) {
        match self {
            Self::Counts(counts) => *counts.entry(key).or_insert(0) += 1,
            Self::Unique(keys) => {
                keys.insert(key);
            }
        }
    }

    /// Occurrence count of `key`; presence-only tables report 1 for known keys
    pub fn count(&self, key: &str) -> Option<u64> {
        match self {
            Self::Counts(counts) => counts.get(key).copied(),
            Self::Unique(keys) => keys.contains(key).then_some(1),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.count(key).is_some()
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        match self {
            Self::Counts(counts) => counts.len(),
            Self::Unique(keys) => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in the table's native (unspecified) order
    pub fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Counts(counts) => Box::new(counts.keys().map(String::as_str)),
            Self::Unique(keys) => Box::new(keys.iter().map(String::as_str)),
        }
    }

    /// `(key, count)` pairs in native order; presence-only entries count as 1
    pub fn entries(&self) -> Box<dyn Iterator<Item = (&str, u64)> + '_> {
        match self {
            Self::Counts(counts) => Box::new(counts.iter().map(|(k, c)| (k.as_str(), *c))),
            Self::Unique(keys) => Box::new(keys.iter().map(|k| (k.as_str(), 1))),
        }
    }
}
