//! Tests for itinerary assembly.

use super::*;
use rstest::{fixture, rstest};
use voyager_core::test_support::{
    FailingDistanceOracle, UnitDistanceOracle, accommodation, attraction, restaurant,
};
use voyager_core::{
    LocationCategory, MealSlot, MealType, PlanConfigError, StraightLineOracle, TripMetadata,
};

fn trip(days: u32) -> TripMetadata {
    TripMetadata {
        destination: "Lisbon".to_owned(),
        days,
        ..TripMetadata::default()
    }
}

fn attractions(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| {
            let offset = f64::from(u32::try_from(i).expect("small index")) * 0.001;
            attraction(&format!("Sight {i}"), offset, 0.01)
        })
        .collect()
}

#[fixture]
fn request() -> PlanRequest {
    PlanRequest {
        trip: trip(2),
        accommodation: accommodation("Hotel", 0.0, 0.0),
        attractions: attractions(4),
        restaurants: vec![
            restaurant("North", 0.0, 0.02, MealType::Any),
            restaurant("East", 0.02, 0.0, MealType::Any),
            restaurant("South", 0.0, -0.02, MealType::Any),
            restaurant("West", -0.02, 0.0, MealType::Any),
        ],
        attractions_per_day: None,
    }
}

fn day_sizes(itinerary: &Itinerary) -> Vec<usize> {
    itinerary.days.iter().map(DayPlan::attraction_count).collect()
}

#[rstest]
fn plans_every_day(request: PlanRequest) {
    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle).expect("plan");

    assert_eq!(itinerary.days.len(), 2);
    assert_eq!(day_sizes(&itinerary), [2, 2]);
    assert_eq!(
        itinerary.days.iter().map(|d| d.day).collect::<Vec<_>>(),
        [1, 2]
    );
    assert!(itinerary.rejected.is_empty());
    assert!(itinerary.all_warnings().next().is_none());
    assert_eq!(itinerary.trip, request.trip);
}

#[rstest]
fn restaurants_rotate_across_days(request: PlanRequest) {
    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle).expect("plan");

    let mut meals: Vec<&str> = itinerary
        .stops()
        .filter(|s| s.is_meal())
        .map(|s| s.location.name.as_str())
        .collect();
    assert_eq!(meals.len(), 4);
    meals.sort_unstable();
    meals.dedup();
    assert_eq!(meals.len(), 4, "no restaurant reused while others are free");
}

#[rstest]
#[case(5, 2, None, vec![2, 3])]
#[case(5, 2, Some(1), vec![1, 4])]
#[case(3, 3, None, vec![1, 1, 1])]
#[case(7, 3, Some(3), vec![3, 3, 1])]
fn partitions_with_remainder_on_last_day(
    mut request: PlanRequest,
    #[case] count: usize,
    #[case] days: u32,
    #[case] cap: Option<usize>,
    #[case] expected: Vec<usize>,
) {
    request.attractions = attractions(count);
    request.trip.days = days;
    request.attractions_per_day = cap;

    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle).expect("plan");

    assert_eq!(day_sizes(&itinerary), expected);
}

#[rstest]
fn unresolved_accommodation_is_fatal(mut request: PlanRequest) {
    request.accommodation = Location::new("Nowhere Inn", LocationCategory::Accommodation);

    let err = build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle)
        .expect_err("unresolved accommodation");

    assert_eq!(
        err,
        PlanError::AccommodationUnresolved {
            name: "Nowhere Inn".to_owned()
        }
    );
}

#[rstest]
fn zero_days_is_invalid(mut request: PlanRequest) {
    request.trip.days = 0;
    let err = build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle)
        .expect_err("zero days");
    assert!(matches!(err, PlanError::InvalidRequest { .. }));
}

#[rstest]
fn invalid_config_is_reported(request: PlanRequest) {
    let config = PlanConfig::default().with_sanity_radius_km(0.0);
    let err = build_itinerary(&request, &config, &UnitDistanceOracle).expect_err("bad config");
    assert!(matches!(
        err,
        PlanError::InvalidConfig(PlanConfigError::NonPositive { .. })
    ));
}

#[rstest]
fn all_rejected_is_no_attractions(mut request: PlanRequest) {
    request.attractions = vec![
        Location::new("Ghost", LocationCategory::Attraction),
        attraction("Madrid", -3.70, 40.41),
    ];

    let err = build_itinerary(&request, &PlanConfig::default(), &StraightLineOracle::default())
        .expect_err("nothing to plan");

    let PlanError::NoAttractions { rejected } = err else {
        panic!("expected NoAttractions, got {err:?}");
    };
    let reasons: Vec<_> = rejected.iter().map(|r| (r.name.as_str(), r.reason)).collect();
    assert_eq!(
        reasons,
        [
            ("Ghost", RejectionReason::MissingCoordinates),
            ("Madrid", RejectionReason::ExceedsSanityRadius),
        ]
    );
}

#[rstest]
fn empty_day_is_fatal_by_default(mut request: PlanRequest) {
    request.attractions = attractions(1);
    let err = build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle)
        .expect_err("second day empty");
    assert_eq!(
        err,
        PlanError::InsufficientAttractions {
            day: 2,
            validated: 1,
            days: 2
        }
    );
}

#[rstest]
fn empty_days_can_be_allowed(mut request: PlanRequest) {
    request.attractions = attractions(1);
    let config = PlanConfig::default().with_allow_empty_days(true);

    let itinerary = build_itinerary(&request, &config, &UnitDistanceOracle).expect("plan");

    let second = itinerary.days.get(1).expect("second day");
    assert_eq!(second.attraction_count(), 0);
    assert_eq!(second.warnings.first(), Some(&PlanWarning::EmptyDay { day: 2 }));
    assert!(second.meal(MealSlot::Lunch).is_some());
}

#[rstest]
fn distant_restaurants_fall_back(mut request: PlanRequest) {
    request.restaurants = vec![restaurant("Far Grill", 0.0, 1.0, MealType::Any)];

    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &StraightLineOracle::default())
            .expect("plan");

    assert!(
        itinerary
            .warnings
            .contains(&PlanWarning::RestaurantFilterFallback { radius_km: 50.0 })
    );
    assert!(itinerary.stops().any(|s| s.location.name == "Far Grill"));
}

#[rstest]
fn unresolved_restaurants_are_warned(mut request: PlanRequest) {
    request
        .restaurants
        .push(Location::new("Mystery Diner", LocationCategory::Restaurant));

    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle).expect("plan");

    assert!(itinerary.warnings.contains(&PlanWarning::MissingCoordinates {
        name: "Mystery Diner".to_owned(),
        category: LocationCategory::Restaurant,
    }));
}

#[rstest]
fn unmet_dietary_preferences_are_relaxed(mut request: PlanRequest) {
    request.trip.dietary_preferences = vec!["kosher".to_owned()];

    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle).expect("plan");

    assert!(itinerary.warnings.contains(&PlanWarning::DietaryFilterRelaxed {
        preferences: vec!["kosher".to_owned()],
    }));
    assert_eq!(itinerary.stops().filter(|s| s.is_meal()).count(), 4);
}

#[rstest]
fn dietary_preferences_restrict_restaurants(mut request: PlanRequest) {
    request.trip.dietary_preferences = vec!["vegan".to_owned()];
    request.restaurants.push(
        restaurant("Leaf", 0.01, 0.01, MealType::Any).with_dietary(["vegan", "vegetarian"]),
    );

    let itinerary =
        build_itinerary(&request, &PlanConfig::default(), &UnitDistanceOracle).expect("plan");

    assert!(
        itinerary
            .stops()
            .filter(|s| s.is_meal())
            .all(|s| s.location.name == "Leaf")
    );
}

#[rstest]
fn oracle_failures_degrade_with_warnings(request: PlanRequest) {
    let itinerary = build_itinerary(
        &request,
        &PlanConfig::default(),
        &FailingDistanceOracle::default(),
    )
    .expect("plan despite oracle failure");

    assert_eq!(day_sizes(&itinerary), [2, 2]);
    assert!(
        itinerary
            .warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::DegradedDistance { .. }))
    );
}

#[rstest]
fn planner_applies_its_configuration(request: PlanRequest) {
    let config = PlanConfig::default().with_day_start(voyager_core::ClockTime::from_minutes(480));
    let planner = GreedyPlanner::with_config(UnitDistanceOracle, config);

    let itinerary = planner.plan(&request).expect("plan");

    assert_eq!(planner.config().day_start.to_string(), "08:00");
    let first = itinerary
        .days
        .first()
        .and_then(|d| d.stops.first())
        .expect("first stop");
    assert_eq!(first.start.to_string(), "08:00");
}

#[rstest]
#[case(0, 3, 1)]
#[case(2, 3, 1)]
#[case(7, 3, 2)]
#[case(9, 3, 3)]
fn default_cap_is_floor_with_minimum_one(
    #[case] validated: usize,
    #[case] days: u32,
    #[case] expected: usize,
) {
    assert_eq!(default_per_day(validated, days), expected);
}
