//! Great-circle distance estimates at a fixed speed.

use std::time::Duration;

use geo::Coord;

use super::{DistanceError, DistanceOracle, TravelEstimate};

/// Default speed for straight-line travel estimates.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Great-circle distance in kilometres between two WGS84 coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voyager_core::straight_line_km;
///
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let london = Coord { x: -0.1276, y: 51.5072 };
/// let km = straight_line_km(paris, london);
/// assert!((340.0..350.0).contains(&km));
/// ```
#[must_use]
pub fn straight_line_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.y,
            longitude: from.x,
        },
        haversine::Location {
            latitude: to.y,
            longitude: to.x,
        },
        haversine::Units::Kilometers,
    )
}

/// [`DistanceOracle`] that assumes straight-line travel at a fixed speed.
///
/// Never fails. Identical points produce [`TravelEstimate::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLineOracle {
    speed_kmh: f64,
}

impl Default for StraightLineOracle {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl StraightLineOracle {
    /// Create an oracle travelling at `speed_kmh`.
    ///
    /// Non-positive or non-finite speeds fall back to the default.
    #[must_use]
    pub fn new(speed_kmh: f64) -> Self {
        if speed_kmh.is_finite() && speed_kmh > 0.0 {
            Self { speed_kmh }
        } else {
            Self::default()
        }
    }

    /// Configured speed.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Estimate for a known distance.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance over speed in fractional hours"
    )]
    pub fn estimate_for_km(&self, distance_km: f64) -> TravelEstimate {
        let secs = distance_km / self.speed_kmh * SECONDS_PER_HOUR;
        let duration = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        TravelEstimate::new(distance_km, duration)
    }
}

impl DistanceOracle for StraightLineOracle {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        if from == to {
            return Ok(TravelEstimate::ZERO);
        }
        Ok(self.estimate_for_km(straight_line_km(from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identical_points_are_free() {
        let point = Coord { x: 13.4, y: 52.5 };
        let estimate = StraightLineOracle::default()
            .estimate(point, point)
            .expect("never fails");
        assert_eq!(estimate, TravelEstimate::ZERO);
    }

    #[rstest]
    fn thirty_km_at_thirty_kmh_is_an_hour() {
        let estimate = StraightLineOracle::new(30.0).estimate_for_km(30.0);
        assert_eq!(estimate.duration, Duration::from_secs(3600));
        assert_eq!(estimate.duration_minutes(), 60);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::INFINITY)]
    fn invalid_speed_uses_default(#[case] speed: f64) {
        assert_eq!(StraightLineOracle::new(speed).speed_kmh(), DEFAULT_SPEED_KMH);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = Coord { x: 2.29, y: 48.85 };
        let b = Coord { x: 2.35, y: 48.86 };
        let there = straight_line_km(a, b);
        let back = straight_line_km(b, a);
        assert!((there - back).abs() < 1e-9);
        assert!(there > 4.0 && there < 5.0);
    }
}
