use crate::config::NgramRange;
use crate::monitor::ProgressHandle;
use crate::ngram::table::{CountMode, NgramTable};
use crate::pipeline::TextUnit;
use std::collections::HashSet;

/// Reduces text units into a word set and an n-gram table
///
/// Tokens are whitespace-delimited fields taken verbatim (no case folding, no
/// punctuation stripping). Every unit is a hard boundary: no n-gram spans two units.
#[derive(Debug)]
pub struct NgramEngine {
    range: NgramRange,
    words: HashSet<String>,
    table: NgramTable,
    units: usize,
}

impl NgramEngine {
    pub fn new(range: NgramRange, mode: CountMode) -> Self {
        Self {
            range,
            words: HashSet::new(),
            table: NgramTable::new(mode),
            units: 0,
        }
    }

    /// Adds one document's text
    ///
    /// For a unit of `L` tokens, every start index `i` in `0..=L-min` yields one
    /// n-gram for each length `n` in `min..=max` with `i + n <= L`. Units shorter
    /// than `min` contribute their words but no n-grams.
    pub fn ingest(&mut self, text: &str) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        self.units += 1;

        for token in &tokens {
            if !self.words.contains(*token) {
                self.words.insert((*token).to_string());
            }
        }

        let NgramRange { min, max } = self.range;
        if tokens.len() < min {
            return;
        }

        for start in 0..=tokens.len() - min {
            for n in min..=max {
                let end = start + n;
                if end > tokens.len() {
                    break;
                }
                self.table.record(tokens[start..end].join(" "));
            }
        }
    }

    /// Ingests a batch of units, reporting progress after each one
    pub fn ingest_all(&mut self, units: &[TextUnit], progress: &ProgressHandle) {
        progress.reset(units.len() as u64);
        for (i, unit) in units.iter().enumerate() {
            self.ingest(unit.as_str());
            progress.advance_to(i as u64 + 1);
        }
    }

    /// Number of distinct tokens seen across all units
    pub fn unique_words(&self) -> usize {
        self.words.len()
    }

    /// Number of distinct n-grams recorded
    pub fn unique_ngrams(&self) -> usize {
        self.table.len()
    }

    /// Number of units ingested
    pub fn units(&self) -> usize {
        self.units
    }

    pub fn table(&self) -> &NgramTable {
        &self.table
    }

    pub fn into_table(self) -> NgramTable {
        self.table
    }
}
