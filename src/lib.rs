//! Facade crate for the Voyager itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the greedy planner
//! and the OpenRouteService integration behind feature flags.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use voyager_core::{
    ClockTime, DayPlan, DistanceError, DistanceOracle, GeocodeError, Geocoder, Itinerary,
    Location, LocationCategory, MealSlot, MealType, MealWindow, PlanConfig, PlanConfigError,
    PlanError, PlanRequest, PlanWarning, Planner, RejectedCandidate, RejectionReason,
    ScheduledStop, StraightLineOracle, TravelEstimate, TravelEstimateMatrix, TripMetadata,
};

#[cfg(feature = "test-support")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub use voyager_core::test_support;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use voyager_planner::{GreedyPlanner, build_itinerary};

#[cfg(feature = "routing-ors")]
#[cfg_attr(docsrs, doc(cfg(feature = "routing-ors")))]
pub use voyager_data::{OrsConfig, OrsDistanceOracle, OrsGeocoder, resolve_request};
