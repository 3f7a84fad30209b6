//! Travel estimates between geocoded points.
//!
//! The [`DistanceOracle`] trait abstracts whatever service supplies travel
//! distance and duration for an ordered pair of coordinates. Callers ask for a
//! single [`TravelEstimate`] or a full matrix over a set of points.
//!
//! [`StraightLineOracle`] is a dependency-free implementation based on
//! great-circle distance and a fixed speed. Planners fall back to it when a
//! remote oracle is unavailable.

mod error;
mod oracle;
mod straight_line;

pub use error::DistanceError;
pub use oracle::{DistanceOracle, TravelEstimate, TravelEstimateMatrix};
pub use straight_line::{StraightLineOracle, straight_line_km};
