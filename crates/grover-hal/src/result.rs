//! Measurement counts and probability distributions.
//!
//! Bitstrings are written most-significant classical bit first: the last
//! character is clbit 0. This matches how marked states are written.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Histogram of measured bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring`, zero if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries sorted by count, highest first. Ties are broken by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequently observed bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.sorted().into_iter().next()
    }

    /// Iterate over `(bitstring, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Result of executing a circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Shots executed.
    pub shots: u32,
    /// Wall-clock execution time, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

/// Normalized probabilities over bitstrings. Entries sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    probabilities: BTreeMap<String, f64>,
}

impl Distribution {
    /// Normalize a histogram. An empty histogram gives an empty distribution.
    pub fn from_counts(counts: &Counts) -> Self {
        let total = counts.total_shots();
        if total == 0 {
            return Self::default();
        }
        let probabilities = counts
            .iter()
            .map(|(bits, n)| (bits.to_string(), n as f64 / total as f64))
            .collect();
        Self { probabilities }
    }

    /// Build from explicit probabilities, dropping zero entries.
    ///
    /// The caller is responsible for the entries summing to 1.
    pub fn from_probabilities(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let probabilities = entries.into_iter().filter(|(_, p)| *p > 0.0).collect();
        Self { probabilities }
    }

    /// Probability of `bitstring`, zero if absent.
    pub fn probability(&self, bitstring: &str) -> f64 {
        self.probabilities.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Combined probability of `bitstrings`.
    pub fn mass<S: AsRef<str>>(&self, bitstrings: &[S]) -> f64 {
        bitstrings.iter().map(|b| self.probability(b.as_ref())).sum()
    }

    /// Entries sorted by probability, highest first.
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most likely bitstring.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.sorted().into_iter().next()
    }

    /// Iterate in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of bitstrings with non-zero probability.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether the distribution has no entries.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 1);

        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.most_frequent(), Some(("01", 5)));
    }

    #[test]
    fn test_counts_sorted_breaks_ties_by_bitstring() {
        let counts: Counts = [("11".to_string(), 4), ("00".to_string(), 4), ("01".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(counts.sorted(), vec![("00", 4), ("11", 4), ("01", 1)]);
    }

    #[test]
    fn test_distribution_from_counts() {
        let counts: Counts = [("011".to_string(), 30), ("100".to_string(), 70)]
            .into_iter()
            .collect();
        let dist = Distribution::from_counts(&counts);

        assert!((dist.probability("011") - 0.3).abs() < 1e-12);
        assert!((dist.mass(&["011", "100"]) - 1.0).abs() < 1e-12);
        assert_eq!(dist.probability("000"), 0.0);
        assert_eq!(dist.most_likely().map(|(b, _)| b), Some("100"));
    }

    #[test]
    fn test_empty_counts_give_empty_distribution() {
        assert!(Distribution::from_counts(&Counts::new()).is_empty());
    }

    #[test]
    fn test_distribution_serializes_as_map() {
        let dist = Distribution::from_probabilities([("1".to_string(), 1.0), ("0".to_string(), 0.0)]);
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"1":1.0}"#);
    }
}
