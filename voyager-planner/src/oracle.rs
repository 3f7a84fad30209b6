//! Request-scoped view over a [`DistanceOracle`].
//!
//! A [`TravelOracle`] lives for one planning run. It caches every answer by
//! coordinate pair, short-circuits identical points and substitutes a
//! straight-line estimate whenever the wrapped oracle fails.

use std::collections::HashMap;

use geo::Coord;
use voyager_core::{
    DistanceError, DistanceOracle, Location, PlanWarning, StraightLineOracle, TravelEstimate,
};

type PairKey = (u64, u64, u64, u64);

fn pair_key(from: Coord<f64>, to: Coord<f64>) -> PairKey {
    (
        from.x.to_bits(),
        from.y.to_bits(),
        to.x.to_bits(),
        to.y.to_bits(),
    )
}

/// One resolved travel leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLeg {
    /// Leg length in kilometres.
    pub distance_km: f64,
    /// Travel time in whole minutes, rounded up.
    pub minutes: u32,
    /// Whether this is a straight-line fallback estimate.
    pub degraded: bool,
}

impl TravelLeg {
    /// A leg between a point and itself.
    pub const ZERO: Self = Self {
        distance_km: 0.0,
        minutes: 0,
        degraded: false,
    };

    fn from_estimate(estimate: TravelEstimate, degraded: bool) -> Self {
        Self {
            distance_km: estimate.distance_km,
            minutes: estimate.duration_minutes(),
            degraded,
        }
    }
}

/// Caching, degrading adapter used by every planner component.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voyager_core::{Location, LocationCategory, StraightLineOracle};
/// use voyager_planner::TravelOracle;
///
/// let hotel = Location::new("Hotel", LocationCategory::Accommodation)
///     .with_coordinates(Coord { x: 2.35, y: 48.85 });
/// let museum = Location::new("Museum", LocationCategory::Attraction)
///     .with_coordinates(Coord { x: 2.33, y: 48.86 });
///
/// let base = StraightLineOracle::default();
/// let mut oracle = TravelOracle::new(&base, 30.0);
/// let leg = oracle.travel(&hotel, &museum)?;
/// assert!(leg.distance_km > 1.0);
/// assert!(!leg.degraded);
/// # Ok::<(), voyager_core::DistanceError>(())
/// ```
pub struct TravelOracle<'a, O: DistanceOracle + ?Sized> {
    oracle: &'a O,
    fallback: StraightLineOracle,
    cache: HashMap<PairKey, TravelLeg>,
    warnings: Vec<PlanWarning>,
}

impl<O: DistanceOracle + ?Sized> std::fmt::Debug for TravelOracle<'_, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelOracle")
            .field("fallback", &self.fallback)
            .field("cached", &self.cache.len())
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl<'a, O: DistanceOracle + ?Sized> TravelOracle<'a, O> {
    /// Wrap `oracle`, degrading to straight lines at `fallback_speed_kmh`.
    pub fn new(oracle: &'a O, fallback_speed_kmh: f64) -> Self {
        Self {
            oracle,
            fallback: StraightLineOracle::new(fallback_speed_kmh),
            cache: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Travel from `from` to `to`.
    ///
    /// Oracle failures never surface here: the leg is estimated from the
    /// straight-line distance instead and a
    /// [`PlanWarning::DegradedDistance`] is recorded once per pair.
    ///
    /// # Errors
    /// Returns [`DistanceError::MissingCoordinates`] when either location is
    /// unresolved.
    pub fn travel(&mut self, from: &Location, to: &Location) -> Result<TravelLeg, DistanceError> {
        let start = coordinates_of(from)?;
        let end = coordinates_of(to)?;
        if start == end {
            return Ok(TravelLeg::ZERO);
        }
        let key = pair_key(start, end);
        if let Some(leg) = self.cache.get(&key) {
            return Ok(*leg);
        }
        let leg = match self.oracle.estimate(start, end) {
            Ok(estimate) => TravelLeg::from_estimate(estimate, false),
            Err(err) => {
                log::warn!(
                    "distance lookup from {:?} to {:?} failed, using straight line: {err}",
                    from.name,
                    to.name
                );
                self.warnings.push(PlanWarning::DegradedDistance {
                    from: from.name.clone(),
                    to: to.name.clone(),
                });
                let km = voyager_core::straight_line_km(start, end);
                TravelLeg::from_estimate(self.fallback.estimate_for_km(km), true)
            }
        };
        self.cache.insert(key, leg);
        Ok(leg)
    }

    /// Distance from `from` to `to`, or `None` when either is unresolved.
    pub fn distance_km(&mut self, from: &Location, to: &Location) -> Option<f64> {
        self.travel(from, to).ok().map(|leg| leg.distance_km)
    }

    /// Fill the cache with one matrix request over `locations`.
    ///
    /// Unresolved locations are skipped. A failed batch is only logged; the
    /// affected pairs are looked up individually later.
    pub fn prefetch(&mut self, locations: &[&Location]) {
        let points: Vec<Coord<f64>> = locations.iter().filter_map(|l| l.coordinates).collect();
        if points.len() < 2 {
            return;
        }
        match self.oracle.estimate_matrix(&points) {
            Ok(matrix) => {
                for (&from, row) in points.iter().zip(matrix) {
                    for (&to, cell) in points.iter().zip(row) {
                        if let Some(estimate) = cell.filter(|_| from != to) {
                            self.cache
                                .entry(pair_key(from, to))
                                .or_insert_with(|| TravelLeg::from_estimate(estimate, false));
                        }
                    }
                }
            }
            Err(err) => {
                log::debug!("batch distance lookup for {} points failed: {err}", points.len());
            }
        }
    }

    /// Warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[PlanWarning] {
        &self.warnings
    }

    /// Consume the adapter, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<PlanWarning> {
        self.warnings
    }
}

fn coordinates_of(location: &Location) -> Result<Coord<f64>, DistanceError> {
    location
        .coordinates
        .ok_or_else(|| DistanceError::MissingCoordinates {
            name: location.name.clone(),
        })
}
