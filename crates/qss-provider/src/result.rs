//! Measurement results.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Histogram of measured bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring`, zero if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most frequent outcome. Ties go to the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// Outcomes sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable();
        entries
    }

    /// Probability of each outcome.
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return FxHashMap::default();
        }
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64 / total as f64))
            .collect()
    }
}

impl From<FxHashMap<String, u64>> for Counts {
    fn from(map: FxHashMap<String, u64>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{k}': {v}")?;
        }
        write!(f, "}}")
    }
}
