//! Property-based tests for itinerary assembly.
//!
//! # Invariants tested
//!
//! - **Partition completeness:** every validated attraction is planned exactly once.
//! - **Time monotonicity:** each stop starts at least one buffer after the previous ends.
//! - **Meal exclusivity:** at most one lunch and one dinner per day.
//! - **Determinism:** identical inputs give identical itineraries.
//! - **Radius invariant:** no planned stop lies beyond the sanity radius.

use std::collections::HashMap;

use geo::Coord;
use proptest::prelude::*;
use voyager_core::test_support::{accommodation, attraction, restaurant};
use voyager_core::{
    Itinerary, Location, MealSlot, MealType, PlanConfig, PlanRequest, StraightLineOracle,
    TripMetadata, straight_line_km,
};
use voyager_planner::build_itinerary;

const HOTEL: Coord<f64> = Coord { x: 0.0, y: 0.0 };

fn config() -> PlanConfig {
    PlanConfig::default().with_allow_empty_days(true)
}

/// Offsets up to three degrees, i.e. some candidates beyond 200 km.
fn offset() -> impl Strategy<Value = (f64, f64)> {
    (-3.0_f64..3.0_f64, -3.0_f64..3.0_f64)
}

fn attractions_strategy() -> impl Strategy<Value = Vec<Location>> {
    proptest::collection::vec((offset(), 30_u32..=300_u32), 1..=12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, ((x, y), minutes))| {
                attraction(&format!("Sight {i}"), x, y).with_duration_minutes(minutes)
            })
            .collect()
    })
}

fn restaurants_strategy() -> impl Strategy<Value = Vec<Location>> {
    let meal_type = prop_oneof![
        Just(MealType::Any),
        Just(MealType::Lunch),
        Just(MealType::Dinner),
        Just(MealType::Breakfast),
    ];
    proptest::collection::vec((offset(), meal_type), 0..=5).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, ((x, y), meal))| restaurant(&format!("Table {i}"), x, y, meal))
            .collect()
    })
}

fn request_strategy() -> impl Strategy<Value = PlanRequest> {
    (
        attractions_strategy(),
        restaurants_strategy(),
        1_u32..=4_u32,
        proptest::option::of(1_usize..=4_usize),
    )
        .prop_map(|(attractions, restaurants, days, cap)| PlanRequest {
            trip: TripMetadata {
                destination: "Nowhere".to_owned(),
                days,
                ..TripMetadata::default()
            },
            accommodation: accommodation("Base", HOTEL.x, HOTEL.y),
            attractions,
            restaurants,
            attractions_per_day: cap,
        })
}

fn within_sanity_radius(location: &Location, config: &PlanConfig) -> bool {
    location
        .coordinates
        .is_some_and(|point| straight_line_km(HOTEL, point) <= config.sanity_radius_km)
}

fn plan(request: &PlanRequest) -> Option<Itinerary> {
    build_itinerary(request, &config(), &StraightLineOracle::default()).ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every attraction within the sanity radius is planned exactly once.
    #[test]
    fn partition_is_complete(request in request_strategy()) {
        let config = config();
        let expected: Vec<&str> = request
            .attractions
            .iter()
            .filter(|a| within_sanity_radius(a, &config))
            .map(|a| a.name.as_str())
            .collect();
        let Some(itinerary) = plan(&request) else {
            prop_assert!(expected.is_empty(), "planning failed with valid attractions");
            return Ok(());
        };

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for day in &itinerary.days {
            for stop in day.attractions() {
                *seen.entry(stop.location.name.as_str()).or_default() += 1;
            }
        }
        prop_assert_eq!(seen.len(), expected.len());
        for name in expected {
            prop_assert_eq!(seen.get(name).copied(), Some(1), "{} not planned once", name);
        }
        prop_assert_eq!(itinerary.days.len(), usize::try_from(request.trip.days).unwrap_or(0));
    }

    /// Property: stops never overlap and always leave room for the buffer.
    #[test]
    fn stop_times_are_monotonic(request in request_strategy()) {
        let buffer = config().buffer_minutes;
        if let Some(itinerary) = plan(&request) {
            for day in &itinerary.days {
                for pair in day.stops.windows(2) {
                    let [previous, next] = pair else { continue };
                    prop_assert!(previous.end >= previous.start);
                    prop_assert!(
                        next.start.minutes() >= previous.end.minutes() + buffer,
                        "day {}: {} starts at {} but {} ends at {}",
                        day.day, next.location.name, next.start, previous.location.name, previous.end
                    );
                }
            }
        }
    }

    /// Property: no day holds two lunches or two dinners.
    #[test]
    fn meals_are_exclusive(request in request_strategy()) {
        if let Some(itinerary) = plan(&request) {
            for day in &itinerary.days {
                for slot in MealSlot::ALL {
                    let count = day.stops.iter().filter(|s| s.meal == Some(slot)).count();
                    prop_assert!(count <= 1, "day {} has {} {} stops", day.day, count, slot);
                }
            }
        }
    }

    /// Property: repeated runs give identical results.
    #[test]
    fn planning_is_deterministic(request in request_strategy()) {
        let oracle = StraightLineOracle::default();
        let first = build_itinerary(&request, &config(), &oracle);
        let second = build_itinerary(&request, &config(), &oracle);
        prop_assert_eq!(first, second);
    }

    /// Property: nothing planned lies beyond the sanity radius.
    #[test]
    fn stops_respect_sanity_radius(request in request_strategy()) {
        let config = config();
        if let Some(itinerary) = plan(&request) {
            for stop in itinerary.stops() {
                prop_assert!(
                    within_sanity_radius(&stop.location, &config),
                    "{} is outside the sanity radius",
                    stop.location.name
                );
            }
            for rejected in &itinerary.rejected {
                prop_assert!(rejected.distance_km.is_none_or(|km| km > config.sanity_radius_km));
            }
        }
    }
}
