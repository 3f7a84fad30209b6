//! Shared fixtures for planner integration tests.

use voyager_core::test_support::{accommodation, attraction, restaurant};
use voyager_core::{Location, MealType, PlanRequest, TripMetadata};

/// Hotel near the centre of Lisbon.
pub fn lisbon_hotel() -> Location {
    accommodation("Hotel Avenida", -9.1450, 38.7190)
}

/// Four attractions within a few kilometres of [`lisbon_hotel`].
pub fn lisbon_attractions() -> Vec<Location> {
    vec![
        attraction("Castelo de São Jorge", -9.1334, 38.7139).with_duration_minutes(90),
        attraction("Mosteiro dos Jerónimos", -9.2068, 38.6979).with_duration_text("2 hours"),
        attraction("Torre de Belém", -9.2160, 38.6916).with_duration_text("1 hour"),
        attraction("Oceanário", -9.0937, 38.7633).with_duration_text("2-3 hours"),
    ]
}

/// One lunch-only and one dinner-only restaurant near the hotel.
pub fn lisbon_restaurants() -> Vec<Location> {
    vec![
        restaurant("Cervejaria Ramiro", -9.1357, 38.7211, MealType::Lunch),
        restaurant("Time Out Market", -9.1459, 38.7069, MealType::Dinner),
    ]
}

/// A request over the Lisbon fixtures.
pub fn lisbon_request(days: u32) -> PlanRequest {
    PlanRequest {
        trip: TripMetadata {
            destination: "Lisbon".to_owned(),
            days,
            trip_type: "cultural".to_owned(),
            ..TripMetadata::default()
        },
        accommodation: lisbon_hotel(),
        attractions: lisbon_attractions(),
        restaurants: lisbon_restaurants(),
        attractions_per_day: None,
    }
}
