//! Distance oracle trait and travel estimate types.

use std::time::Duration;

use geo::Coord;

use super::error::DistanceError;

/// Travel distance and duration for one ordered pair of points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelEstimate {
    /// Route length in kilometres.
    pub distance_km: f64,
    /// Expected travel time.
    pub duration: Duration,
}

impl TravelEstimate {
    /// Estimate for a point and itself.
    pub const ZERO: Self = Self {
        distance_km: 0.0,
        duration: Duration::ZERO,
    };

    /// Construct an estimate.
    #[must_use]
    pub const fn new(distance_km: f64, duration: Duration) -> Self {
        Self {
            distance_km,
            duration,
        }
    }

    /// Travel time in whole minutes, rounded up.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use voyager_core::TravelEstimate;
    ///
    /// let estimate = TravelEstimate::new(1.2, Duration::from_secs(61));
    /// assert_eq!(estimate.duration_minutes(), 2);
    /// ```
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        let minutes = self.duration.as_secs().div_ceil(60);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

/// Square matrix of estimates; `None` marks a pair with no route.
pub type TravelEstimateMatrix = Vec<Vec<Option<TravelEstimate>>>;

/// Supply travel estimates between coordinates.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use voyager_core::{DistanceError, DistanceOracle, TravelEstimate};
///
/// struct Manhattan;
///
/// impl DistanceOracle for Manhattan {
///     fn estimate(
///         &self,
///         from: Coord<f64>,
///         to: Coord<f64>,
///     ) -> Result<TravelEstimate, DistanceError> {
///         let km = (from.x - to.x).abs() + (from.y - to.y).abs();
///         Ok(TravelEstimate::new(km, Duration::from_secs(60)))
///     }
/// }
///
/// let points = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];
/// let matrix = Manhattan.estimate_matrix(&points)?;
/// assert_eq!(matrix.len(), 2);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceOracle {
    /// Estimate travel from `from` to `to`.
    ///
    /// # Errors
    /// Returns [`DistanceError::NoRoute`] when the points are not connected and
    /// other variants when the oracle itself fails.
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError>;

    /// Estimate travel between every ordered pair of `points`.
    ///
    /// `matrix[i][j]` is the estimate from `points[i]` to `points[j]`. The
    /// default implementation calls [`DistanceOracle::estimate`] per pair;
    /// remote oracles override it with a single batch request.
    ///
    /// # Errors
    /// Returns [`DistanceError::EmptyInput`] when `points` is empty and
    /// propagates any error other than [`DistanceError::NoRoute`].
    fn estimate_matrix(
        &self,
        points: &[Coord<f64>],
    ) -> Result<TravelEstimateMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        points
            .iter()
            .map(|&from| {
                points
                    .iter()
                    .map(|&to| match self.estimate(from, to) {
                        Ok(estimate) => Ok(Some(estimate)),
                        Err(DistanceError::NoRoute) => Ok(None),
                        Err(err) => Err(err),
                    })
                    .collect()
            })
            .collect()
    }
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &T {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        (**self).estimate(from, to)
    }

    fn estimate_matrix(
        &self,
        points: &[Coord<f64>],
    ) -> Result<TravelEstimateMatrix, DistanceError> {
        (**self).estimate_matrix(points)
    }
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for Box<T> {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        (**self).estimate(from, to)
    }

    fn estimate_matrix(
        &self,
        points: &[Coord<f64>],
    ) -> Result<TravelEstimateMatrix, DistanceError> {
        (**self).estimate_matrix(points)
    }
}
