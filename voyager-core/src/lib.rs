//! Core domain types for the Voyager itinerary engine.
//!
//! The engine turns candidate [`Location`]s into a day-by-day [`Itinerary`].
//! This crate holds the plain data records the engine consumes and produces,
//! the immutable [`PlanConfig`] passed into every planning run, and the traits
//! at its boundaries: [`DistanceOracle`] for travel estimates, [`Geocoder`] for
//! resolving coordinates and [`Planner`] for the engine itself.
//!
//! Failures are split in two. Hard failures abort a run and surface as
//! [`PlanError`]; soft failures are recorded as [`PlanWarning`]s alongside a
//! successful result.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
pub mod config;
pub mod distance;
pub mod geocoder;
pub mod itinerary;
pub mod location;
pub mod planner;
pub mod warning;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use clock::{ClockTime, ParseClockTimeError};
pub use config::{MealWindow, PlanConfig, PlanConfigError};
pub use distance::{
    DistanceError, DistanceOracle, StraightLineOracle, TravelEstimate, TravelEstimateMatrix,
    straight_line_km,
};
pub use geocoder::{GeocodeError, Geocoder};
pub use itinerary::{
    BudgetLevel, DayPlan, Itinerary, RejectedCandidate, RejectionReason, ScheduledStop,
    TripMetadata,
};
pub use location::{
    DurationEstimate, Location, LocationCategory, LocationDetails, MealSlot, MealType,
};
pub use planner::{PlanError, PlanRequest, Planner};
pub use warning::PlanWarning;
