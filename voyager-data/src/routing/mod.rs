//! OpenRouteService matrix-backed distance oracle.
//!
//! [`OrsDistanceOracle`] implements [`voyager_core::DistanceOracle`] by
//! posting the requested points to the matrix API and converting metres and
//! seconds into [`voyager_core::TravelEstimate`] values.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use voyager_core::DistanceOracle;
//! use voyager_data::OrsConfig;
//! use voyager_data::routing::OrsDistanceOracle;
//!
//! let config = OrsConfig::new("my-api-key")
//!     .with_profile("foot-walking")
//!     .with_timeout(Duration::from_secs(10));
//! let oracle = OrsDistanceOracle::with_config(config)?;
//!
//! let estimate = oracle.estimate(
//!     Coord { x: -9.1334, y: 38.7139 },
//!     Coord { x: -9.2160, y: 38.6916 },
//! )?;
//! println!("{:.1} km in {} min", estimate.distance_km, estimate.duration_minutes());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::OrsDistanceOracle;
