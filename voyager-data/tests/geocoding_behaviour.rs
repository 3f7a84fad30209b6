//! Behavioural tests for resolving candidate coordinates.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voyager_core::test_support::attraction;
use voyager_core::{GeocodeError, Location, LocationCategory, PlanRequest, TripMetadata};
use voyager_data::geocoding::test_support::StubGeocoder;
use voyager_data::{ResolutionSummary, resolve_request};

/// World state for geocoding scenarios.
#[derive(Debug, Default)]
struct GeocodingWorld {
    geocoder: RefCell<StubGeocoder>,
    request: RefCell<Option<PlanRequest>>,
    summary: RefCell<Option<ResolutionSummary>>,
}

#[fixture]
fn world() -> GeocodingWorld {
    GeocodingWorld::default()
}

#[given("a gazetteer of Lisbon sights")]
fn given_gazetteer(world: &GeocodingWorld) {
    world.geocoder.replace(
        StubGeocoder::new()
            .with_place("Hotel Avenida", -9.1450, 38.7190)
            .with_place("Torre de Belém", -9.2160, 38.6916)
            .with_place("Time Out Market", -9.1459, 38.7069),
    );
}

#[given("a geocoding service that is offline")]
fn given_offline(world: &GeocodingWorld) {
    world
        .geocoder
        .replace(StubGeocoder::new().with_error(GeocodeError::NetworkError {
            url: "https://api.openrouteservice.org/geocode/search".to_owned(),
            message: "connection refused".to_owned(),
        }));
}

#[given("a Lisbon trip with unresolved candidates")]
fn given_trip(world: &GeocodingWorld) {
    world.request.replace(Some(PlanRequest {
        trip: TripMetadata {
            destination: "Lisbon".to_owned(),
            days: 1,
            ..TripMetadata::default()
        },
        accommodation: Location::new("Hotel Avenida", LocationCategory::Accommodation),
        attractions: vec![
            attraction("Castelo de São Jorge", -9.1334, 38.7139),
            Location::new("Torre de Belém", LocationCategory::Attraction),
            Location::new("Palácio Imaginário", LocationCategory::Attraction),
        ],
        restaurants: vec![Location::new("Time Out Market", LocationCategory::Restaurant)],
        attractions_per_day: None,
    }));
}

#[when("I resolve the request")]
fn resolve(world: &GeocodingWorld) {
    let mut borrow = world.request.borrow_mut();
    let request = borrow.as_mut().expect("request prepared");
    let summary = resolve_request(request, &*world.geocoder.borrow());
    world.summary.replace(Some(summary));
}

#[then("the accommodation has coordinates")]
fn then_accommodation(world: &GeocodingWorld) {
    let borrow = world.request.borrow();
    let request = borrow.as_ref().expect("request prepared");
    assert!(request.accommodation.is_resolved());
}

#[then("one attraction remains unresolved")]
fn then_one_unresolved(world: &GeocodingWorld) {
    let borrow = world.request.borrow();
    let request = borrow.as_ref().expect("request prepared");
    let unresolved: Vec<&str> = request
        .attractions
        .iter()
        .filter(|a| !a.is_resolved())
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(unresolved, ["Palácio Imaginário"]);
    let summary = world.summary.borrow().expect("summary recorded");
    assert_eq!(summary.resolved, 3);
    assert_eq!(summary.missed, 1);
}

#[then("every lookup is reported as failed")]
fn then_all_failed(world: &GeocodingWorld) {
    let summary = world.summary.borrow().expect("summary recorded");
    assert_eq!(summary.failed, 4);
    assert_eq!(summary.already_resolved, 1);
    assert_eq!(world.geocoder.borrow().calls(), 4);
}

#[scenario(path = "tests/features/geocoding.feature", index = 0)]
fn known_places_resolve(world: GeocodingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geocoding.feature", index = 1)]
fn outage_leaves_candidates_unresolved(world: GeocodingWorld) {
    let _ = world;
}
