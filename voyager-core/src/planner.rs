//! Planning requests, hard failures and the [`Planner`] trait.

use thiserror::Error;

use crate::{Itinerary, Location, PlanConfigError, RejectedCandidate, TripMetadata};

/// Everything needed to plan one trip.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use voyager_core::{Location, LocationCategory, PlanRequest, TripMetadata};
///
/// let request = PlanRequest {
///     trip: TripMetadata {
///         destination: "Lisbon".into(),
///         days: 2,
///         ..TripMetadata::default()
///     },
///     accommodation: Location::new("Hotel", LocationCategory::Accommodation)
///         .with_coordinates(Coord { x: -9.14, y: 38.71 }),
///     attractions: Vec::new(),
///     restaurants: Vec::new(),
///     attractions_per_day: None,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Trip metadata; `days` sets the itinerary length.
    pub trip: TripMetadata,
    /// Where every day starts.
    pub accommodation: Location,
    /// Candidate attractions in preference order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attractions: Vec<Location>,
    /// Candidate restaurants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub restaurants: Vec<Location>,
    /// Attractions per day; derived from the validated count when absent.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub attractions_per_day: Option<usize>,
}

impl PlanRequest {
    /// Check the structural parameters of the request.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidRequest`] when `days` or
    /// `attractions_per_day` is zero.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.trip.days == 0 {
            return Err(PlanError::InvalidRequest {
                reason: "days must be at least 1".to_owned(),
            });
        }
        if self.attractions_per_day == Some(0) {
            return Err(PlanError::InvalidRequest {
                reason: "attractions_per_day must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Hard failures that abort a planning run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Request parameters were invalid, e.g. zero days.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong.
        reason: String,
    },
    /// The supplied configuration failed validation.
    #[error("invalid configuration")]
    InvalidConfig(#[from] PlanConfigError),
    /// The accommodation has no coordinates.
    #[error("accommodation {name:?} has no coordinates")]
    AccommodationUnresolved {
        /// Accommodation name.
        name: String,
    },
    /// No attraction survived validation.
    #[error("no attractions survived validation ({} rejected)", rejected.len())]
    NoAttractions {
        /// Every rejected candidate.
        rejected: Vec<RejectedCandidate>,
    },
    /// A day would have no attractions.
    #[error("day {day} has no attractions: {validated} attractions for {days} days")]
    InsufficientAttractions {
        /// First empty day.
        day: u32,
        /// Attractions that survived validation.
        validated: usize,
        /// Requested trip length.
        days: u32,
    },
}

/// Build an itinerary from a request.
///
/// Implementations return [`PlanError`] for hard failures rather than
/// panicking. Planners must be `Send + Sync` so one instance can serve
/// concurrent requests.
pub trait Planner: Send + Sync {
    /// Plan `request`, producing an itinerary or a hard failure.
    ///
    /// # Errors
    /// Returns [`PlanError`] when the request cannot be planned.
    fn plan(&self, request: &PlanRequest) -> Result<Itinerary, PlanError>;
}
