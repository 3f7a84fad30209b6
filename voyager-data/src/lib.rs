//! OpenRouteService adapters for the Voyager engine.
//!
//! Responsibilities:
//! - Implement [`voyager_core::DistanceOracle`] over the OpenRouteService
//!   matrix API.
//! - Implement [`voyager_core::Geocoder`] over the OpenRouteService search
//!   API and fill in coordinates for unresolved candidates.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `voyager-planner`).
//! - Translate transport failures into core error types; never panic on
//!   malformed responses.
//!
//! Invariants:
//! - Adapters are `Send + Sync` and hold no mutable state.
//! - The API key is never logged.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
pub mod geocoding;
mod ors;
pub mod routing;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, OrsBuildError, OrsConfig,
};
pub use geocoding::{OrsGeocoder, ResolutionSummary, resolve_missing_coordinates, resolve_request};
pub use routing::OrsDistanceOracle;
