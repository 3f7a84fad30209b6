//! Place-name resolution for candidates without coordinates.
//!
//! [`OrsGeocoder`] implements [`voyager_core::Geocoder`] over the
//! OpenRouteService search API. [`resolve_missing_coordinates`] and
//! [`resolve_request`] fill in coordinates before planning; anything that
//! stays unresolved is excluded by the planner later.

mod provider;
mod resolve;

#[doc(hidden)]
pub mod test_support;

pub use provider::OrsGeocoder;
pub use resolve::{ResolutionSummary, resolve_missing_coordinates, resolve_request};
