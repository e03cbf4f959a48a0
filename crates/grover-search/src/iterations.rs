//! Iteration count and success probability of amplitude amplification.

use std::f64::consts::PI;

use tracing::warn;

use crate::error::{SearchError, SearchResult};

/// Optimal number of Grover rounds, `floor(pi/4 * sqrt(2^n / m))`.
///
/// When more than a quarter of the space is marked the formula keeps
/// returning small counts (possibly zero) and a warning is logged, since
/// amplification gains little over plain sampling in that regime.
///
/// ```
/// use grover_search::optimal_iterations;
///
/// assert_eq!(optimal_iterations(3, 2).unwrap(), 1);
/// assert_eq!(optimal_iterations(10, 1).unwrap(), 25);
/// ```
pub fn optimal_iterations(num_qubits: u32, num_marked: u64) -> SearchResult<u64> {
    if num_marked == 0 {
        return Err(SearchError::DivisionByZero);
    }

    let space = 2f64.powi(num_qubits as i32);
    let marked = num_marked as f64;
    if marked > space / 4.0 {
        warn!(
            num_qubits,
            num_marked, "More than a quarter of the search space is marked"
        );
    }

    let k = (PI / 4.0 * (space / marked).sqrt()).floor();
    Ok(k as u64)
}

/// Probability of measuring a marked state after `iterations` rounds.
///
/// `sin^2((2k + 1) * theta)` with `sin(theta) = sqrt(m / 2^n)`.
pub fn success_probability(num_qubits: u32, num_marked: u64, iterations: u64) -> f64 {
    if num_marked == 0 {
        return 0.0;
    }
    let space = 2f64.powi(num_qubits as i32);
    let theta = (num_marked as f64 / space).sqrt().min(1.0).asin();
    let angle = (2.0 * iterations as f64 + 1.0) * theta;
    angle.sin().powi(2)
}
