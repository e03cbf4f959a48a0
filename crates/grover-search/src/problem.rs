//! Marked states and the search problem they define.
//!
//! A marked state is written most-significant qubit first: the last
//! character of the string is qubit 0. `"011"` therefore sets qubits 0 and 1
//! and names basis index 3.

use std::fmt;
use std::str::FromStr;

use grover_ir::QubitId;
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Largest register a search problem may span.
///
/// At this width a single marked state needs 3216 optimal rounds, which
/// stays inside [`MAX_AMPLIFICATION_GATES`](crate::MAX_AMPLIFICATION_GATES).
pub const MAX_QUBITS: u32 = 24;

/// One solution bit-string of a search problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarkedState(String);

impl MarkedState {
    /// Parse a bit-string over `{0, 1}`.
    pub fn parse(bits: &str) -> SearchResult<Self> {
        if bits.is_empty() {
            return Err(SearchError::InvalidInput(
                "marked state must contain at least one bit".into(),
            ));
        }
        if let Some(bad) = bits.chars().find(|c| !matches!(c, '0' | '1')) {
            return Err(SearchError::InvalidInput(format!(
                "marked state '{bits}' contains non-binary character '{bad}'"
            )));
        }
        if bits.len() > MAX_QUBITS as usize {
            return Err(SearchError::InvalidInput(format!(
                "marked state '{bits}' spans {} qubits, at most {MAX_QUBITS} are supported",
                bits.len()
            )));
        }
        Ok(Self(bits.to_owned()))
    }

    /// The bit-string as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of qubits the state spans.
    pub fn num_qubits(&self) -> u32 {
        self.0.len() as u32
    }

    /// Value of `qubit` in this state.
    ///
    /// # Panics
    ///
    /// Panics if `qubit` is outside the state.
    pub fn bit(&self, qubit: QubitId) -> bool {
        let bytes = self.0.as_bytes();
        bytes[bytes.len() - 1 - qubit.0 as usize] == b'1'
    }

    /// Basis-state index named by this bit-string.
    pub fn index(&self) -> u64 {
        self.0
            .bytes()
            .fold(0, |acc, b| (acc << 1) | u64::from(b == b'1'))
    }

    /// Qubits whose bit is `0`, in ascending order.
    ///
    /// These are the open controls of the state's phase flip.
    pub fn zero_qubits(&self) -> Vec<QubitId> {
        (0..self.num_qubits())
            .map(QubitId)
            .filter(|&q| !self.bit(q))
            .collect()
    }
}

impl fmt::Display for MarkedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MarkedState {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MarkedState {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MarkedState> for String {
    fn from(state: MarkedState) -> Self {
        state.0
    }
}

/// An ordered, non-empty set of equal-length marked states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchProblem {
    marked: Vec<MarkedState>,
    num_qubits: u32,
}

impl SearchProblem {
    /// Parse and validate a list of marked bit-strings.
    pub fn new<S: AsRef<str>>(states: &[S]) -> SearchResult<Self> {
        let marked = states
            .iter()
            .map(|s| MarkedState::parse(s.as_ref()))
            .collect::<SearchResult<Vec<_>>>()?;
        Self::from_states(marked)
    }

    /// Validate already-parsed marked states.
    pub fn from_states(marked: Vec<MarkedState>) -> SearchResult<Self> {
        let Some(first) = marked.first() else {
            return Err(SearchError::InvalidInput(
                "at least one marked state is required".into(),
            ));
        };
        let num_qubits = first.num_qubits();

        for (i, state) in marked.iter().enumerate() {
            if state.num_qubits() != num_qubits {
                return Err(SearchError::InvalidInput(format!(
                    "marked states must share one length: '{first}' has {num_qubits} bits, '{state}' has {}",
                    state.num_qubits()
                )));
            }
            if marked[..i].contains(state) {
                return Err(SearchError::InvalidInput(format!(
                    "marked state '{state}' is listed more than once"
                )));
            }
        }

        Ok(Self { marked, num_qubits })
    }

    /// Number of qubits (common length of the marked states).
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The marked states in the order given.
    pub fn marked_states(&self) -> &[MarkedState] {
        &self.marked
    }

    /// Number of marked states.
    pub fn num_marked(&self) -> usize {
        self.marked.len()
    }

    /// Size of the search space, `2^n`.
    pub fn search_space_size(&self) -> u64 {
        1 << self.num_qubits
    }

    /// Whether the basis state `index` is one of the marked states.
    pub fn is_marked(&self, index: u64) -> bool {
        self.marked.iter().any(|s| s.index() == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_reads_last_char_as_qubit_zero() {
        let s = MarkedState::parse("011").unwrap();
        assert_eq!(s.index(), 3);
        assert!(s.bit(QubitId(0)));
        assert!(s.bit(QubitId(1)));
        assert!(!s.bit(QubitId(2)));

        assert_eq!(MarkedState::parse("100").unwrap().index(), 4);
    }

    #[test]
    fn test_zero_qubits() {
        let s = MarkedState::parse("0110").unwrap();
        assert_eq!(s.zero_qubits(), vec![QubitId(0), QubitId(3)]);
        assert!(MarkedState::parse("111").unwrap().zero_qubits().is_empty());
    }

    #[test]
    fn test_rejects_non_binary() {
        let err = MarkedState::parse("01a").unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(msg) if msg.contains("'a'")));
    }

    #[test]
    fn test_rejects_empty_string() {
        assert!(matches!(
            MarkedState::parse(""),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_too_wide() {
        let wide = "1".repeat(MAX_QUBITS as usize + 1);
        assert!(matches!(
            MarkedState::parse(&wide),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_problem_attributes() {
        let p = SearchProblem::new(&["011", "100"]).unwrap();
        assert_eq!(p.num_qubits(), 3);
        assert_eq!(p.num_marked(), 2);
        assert_eq!(p.search_space_size(), 8);
        assert!(p.is_marked(3));
        assert!(p.is_marked(4));
        assert!(!p.is_marked(0));
    }

    #[test]
    fn test_problem_rejects_unequal_lengths() {
        assert!(matches!(
            SearchProblem::new(&["01", "101"]),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_problem_rejects_empty() {
        let none: [&str; 0] = [];
        assert!(matches!(
            SearchProblem::new(&none),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_problem_rejects_duplicates() {
        assert!(matches!(
            SearchProblem::new(&["10", "10"]),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_marked_state_serde_validates() {
        let s: MarkedState = serde_json::from_str("\"101\"").unwrap();
        assert_eq!(s.as_str(), "101");
        assert!(serde_json::from_str::<MarkedState>("\"12\"").is_err());
    }
}
