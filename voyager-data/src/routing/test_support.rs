//! Test utilities for distance oracles.
//!
//! This module provides [`StubDistanceOracle`], a deterministic test double
//! for [`DistanceOracle`] that returns pre-configured responses without
//! making HTTP requests.

use std::time::Duration;

use geo::Coord;
use voyager_core::{DistanceError, DistanceOracle, TravelEstimate, TravelEstimateMatrix};

/// Stub `DistanceOracle` for testing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use voyager_core::{DistanceOracle, TravelEstimate};
/// use voyager_data::routing::test_support::StubDistanceOracle;
///
/// let leg = TravelEstimate::new(2.0, Duration::from_secs(240));
/// let oracle = StubDistanceOracle::with_matrix(vec![
///     vec![Some(TravelEstimate::ZERO), Some(leg)],
///     vec![Some(leg), Some(TravelEstimate::ZERO)],
/// ]);
///
/// let estimate = oracle.estimate(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 })?;
/// assert_eq!(estimate.duration_minutes(), 4);
/// # Ok::<(), voyager_core::DistanceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubDistanceOracle {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Matrix(TravelEstimateMatrix),
    Error(DistanceError),
}

impl StubDistanceOracle {
    /// Create an oracle that returns the given matrix for any non-empty input.
    ///
    /// Pair estimates read the `[0][1]` cell.
    #[must_use]
    pub const fn with_matrix(matrix: TravelEstimateMatrix) -> Self {
        Self {
            response: StubResponse::Matrix(matrix),
        }
    }

    /// Create an oracle that returns the given error for any non-empty input.
    ///
    /// Empty input still returns `DistanceError::EmptyInput`.
    #[must_use]
    pub const fn with_error(error: DistanceError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }

    /// Create an oracle returning a uniform matrix of the given size.
    ///
    /// The diagonal is zero and every other cell is one kilometre and one
    /// minute.
    #[must_use]
    pub fn with_unit_matrix(size: usize) -> Self {
        Self::with_matrix(build_unit_matrix(size))
    }
}

fn build_unit_matrix(size: usize) -> TravelEstimateMatrix {
    (0..size)
        .map(|i| (0..size).map(|j| Some(unit_estimate(i, j))).collect())
        .collect()
}

const fn unit_estimate(i: usize, j: usize) -> TravelEstimate {
    if i == j {
        TravelEstimate::ZERO
    } else {
        TravelEstimate::new(1.0, Duration::from_secs(60))
    }
}

impl DistanceOracle for StubDistanceOracle {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        let matrix = self.estimate_matrix(&[from, to])?;
        matrix
            .first()
            .and_then(|row| row.get(1))
            .copied()
            .flatten()
            .ok_or(DistanceError::NoRoute)
    }

    fn estimate_matrix(&self, points: &[Coord<f64>]) -> Result<TravelEstimateMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }

        match &self.response {
            StubResponse::Matrix(matrix) => Ok(matrix.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
