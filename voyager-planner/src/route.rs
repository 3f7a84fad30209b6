//! Nearest-neighbour ordering of a day's stops.

use voyager_core::{DistanceOracle, Location};

use crate::TravelOracle;

/// Order `stops` greedily, always moving to the closest unvisited stop.
///
/// The tour begins at `start`. Equidistant stops are taken in input order and
/// a stop with unknown distance counts as infinitely far. Zero or one stop is
/// returned unchanged without consulting the oracle.
///
/// # Examples
/// ```
/// use voyager_core::StraightLineOracle;
/// use voyager_core::test_support::{accommodation, attraction};
/// use voyager_planner::{TravelOracle, order_by_proximity};
///
/// let hotel = accommodation("Hotel", 0.0, 0.0);
/// let stops = vec![
///     attraction("Far", 0.0, 0.3),
///     attraction("Near", 0.0, 0.1),
///     attraction("Middle", 0.0, 0.2),
/// ];
/// let base = StraightLineOracle::default();
/// let mut oracle = TravelOracle::new(&base, 30.0);
///
/// let ordered = order_by_proximity(stops, &hotel, &mut oracle);
/// let names: Vec<_> = ordered.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Near", "Middle", "Far"]);
/// ```
pub fn order_by_proximity<O: DistanceOracle + ?Sized>(
    stops: Vec<Location>,
    start: &Location,
    oracle: &mut TravelOracle<'_, O>,
) -> Vec<Location> {
    if stops.len() <= 1 {
        return stops;
    }
    let mut remaining = stops;
    let mut ordered: Vec<Location> = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let current = ordered.last().unwrap_or(start);
        let next = nearest_index(current, &remaining, oracle);
        ordered.push(remaining.remove(next));
    }
    ordered
}

fn nearest_index<O: DistanceOracle + ?Sized>(
    current: &Location,
    candidates: &[Location],
    oracle: &mut TravelOracle<'_, O>,
) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let km = oracle
            .distance_km(current, candidate)
            .unwrap_or(f64::INFINITY);
        if best.is_none_or(|(_, best_km)| km < best_km) {
            best = Some((index, km));
        }
    }
    best.map_or(0, |(index, _)| index)
}

/// Total distance of visiting `ordered` from `start`, without returning.
///
/// Legs with unknown distance are skipped.
#[expect(
    clippy::float_arithmetic,
    reason = "summing leg lengths in kilometres"
)]
pub fn tour_distance_km<O: DistanceOracle + ?Sized>(
    start: &Location,
    ordered: &[Location],
    oracle: &mut TravelOracle<'_, O>,
) -> f64 {
    let mut total = 0.0;
    let mut current = start;
    for stop in ordered {
        total += oracle.distance_km(current, stop).unwrap_or(0.0);
        current = stop;
    }
    total
}
