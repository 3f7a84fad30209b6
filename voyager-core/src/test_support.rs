//! Test doubles and location builders shared by unit and behaviour tests.

use std::cell::Cell;
use std::collections::HashMap;
use std::time::Duration;

use geo::Coord;

use crate::{
    DistanceError, DistanceOracle, Location, LocationCategory, MealType, StraightLineOracle,
    TravelEstimate,
};

/// An attraction at `(x, y)`.
#[must_use]
pub fn attraction(name: &str, x: f64, y: f64) -> Location {
    Location::new(name, LocationCategory::Attraction).with_coordinates(Coord { x, y })
}

/// A restaurant serving `meal_type` at `(x, y)`.
#[must_use]
pub fn restaurant(name: &str, x: f64, y: f64, meal_type: MealType) -> Location {
    Location::new(name, LocationCategory::Restaurant)
        .with_coordinates(Coord { x, y })
        .with_meal_type(meal_type)
}

/// An accommodation at `(x, y)`.
#[must_use]
pub fn accommodation(name: &str, x: f64, y: f64) -> Location {
    Location::new(name, LocationCategory::Accommodation).with_coordinates(Coord { x, y })
}

/// Deterministic oracle: one kilometre and one minute between distinct points.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitDistanceOracle;

impl DistanceOracle for UnitDistanceOracle {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        if from == to {
            return Ok(TravelEstimate::ZERO);
        }
        Ok(TravelEstimate::new(1.0, Duration::from_secs(60)))
    }
}

type PairKey = (u64, u64, u64, u64);

fn pair_key(from: Coord<f64>, to: Coord<f64>) -> PairKey {
    (from.x.to_bits(), from.y.to_bits(), to.x.to_bits(), to.y.to_bits())
}

/// Oracle backed by a symmetric table of road distances.
///
/// Durations derive from a fixed speed. Pairs missing from the table report
/// [`DistanceError::Unavailable`]; identical points are always zero.
#[derive(Debug, Clone)]
pub struct TableDistanceOracle {
    legs: HashMap<PairKey, f64>,
    speed: StraightLineOracle,
}

impl Default for TableDistanceOracle {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl TableDistanceOracle {
    /// Create an empty table travelling at `speed_kmh`.
    #[must_use]
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            legs: HashMap::new(),
            speed: StraightLineOracle::new(speed_kmh),
        }
    }

    /// Record `km` between the coordinates of `a` and `b`, both directions.
    ///
    /// Unresolved locations are ignored.
    #[must_use]
    pub fn with_leg(mut self, a: &Location, b: &Location, km: f64) -> Self {
        if let (Some(from), Some(to)) = (a.coordinates, b.coordinates) {
            self.legs.insert(pair_key(from, to), km);
            self.legs.insert(pair_key(to, from), km);
        }
        self
    }
}

impl DistanceOracle for TableDistanceOracle {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        if from == to {
            return Ok(TravelEstimate::ZERO);
        }
        self.legs
            .get(&pair_key(from, to))
            .map(|&km| self.speed.estimate_for_km(km))
            .ok_or_else(|| DistanceError::Unavailable {
                message: format!("no table entry for ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y),
            })
    }
}

/// Oracle that fails every query with the configured error.
#[derive(Debug, Clone)]
pub struct FailingDistanceOracle {
    error: DistanceError,
}

impl Default for FailingDistanceOracle {
    fn default() -> Self {
        Self::new(DistanceError::Unavailable {
            message: "oracle offline".to_owned(),
        })
    }
}

impl FailingDistanceOracle {
    /// Fail with `error`.
    #[must_use]
    pub const fn new(error: DistanceError) -> Self {
        Self { error }
    }
}

impl DistanceOracle for FailingDistanceOracle {
    fn estimate(&self, _: Coord<f64>, _: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        Err(self.error.clone())
    }
}

/// Wrapper counting how often the inner oracle is consulted.
#[derive(Debug, Default)]
pub struct CountingDistanceOracle<O> {
    inner: O,
    calls: Cell<usize>,
}

impl<O> CountingDistanceOracle<O> {
    /// Wrap `inner`.
    pub const fn new(inner: O) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Number of single estimates served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<O: DistanceOracle> DistanceOracle for CountingDistanceOracle<O> {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        self.calls.set(self.calls.get().saturating_add(1));
        self.inner.estimate(from, to)
    }
}
