//! Greedy itinerary engine for Voyager.
//!
//! This crate provides [`GreedyPlanner`], the default implementation of the
//! [`Planner`](voyager_core::Planner) trait, and the components it is built
//! from:
//!
//! - [`filter_by_radius`] and [`filter_by_dietary`] narrow candidate lists.
//! - [`order_by_proximity`] orders a day's attractions by nearest neighbour.
//! - [`schedule_day`] assigns clock times and inserts meals.
//! - [`build_itinerary`] partitions attractions across days and merges the
//!   per-day plans.
//!
//! All travel lookups go through a request-scoped [`TravelOracle`], which
//! caches estimates and degrades to straight-line distances when the
//! underlying [`DistanceOracle`](voyager_core::DistanceOracle) fails.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assembler;
mod filter;
mod oracle;
mod route;
mod schedule;

pub use assembler::{GreedyPlanner, build_itinerary};
pub use filter::{DietaryFilterOutcome, RadiusFilterOutcome, filter_by_dietary, filter_by_radius};
pub use oracle::{TravelLeg, TravelOracle};
pub use route::{order_by_proximity, tour_distance_km};
pub use schedule::{RestaurantPool, schedule_day};
