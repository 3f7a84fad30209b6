//! Soft failures recorded alongside a successful plan.

use thiserror::Error;

use crate::{ClockTime, LocationCategory, MealSlot};

/// A recoverable problem encountered while planning.
///
/// Warnings never abort a run. Day-specific warnings are attached to the
/// affected [`DayPlan`](crate::DayPlan); the rest live on the
/// [`Itinerary`](crate::Itinerary).
///
/// # Examples
/// ```
/// use voyager_core::{MealSlot, PlanWarning};
///
/// let warning = PlanWarning::MealUnavailable { day: 2, meal: MealSlot::Dinner };
/// assert_eq!(warning.to_string(), "dinner unavailable, day 2");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum PlanWarning {
    /// A candidate had no coordinates and was skipped.
    #[error("{category} {name:?} has no coordinates")]
    MissingCoordinates {
        /// Candidate name.
        name: String,
        /// Candidate category.
        category: LocationCategory,
    },
    /// No restaurant could fill a meal slot.
    #[error("{meal} unavailable, day {day}")]
    MealUnavailable {
        /// Affected day.
        day: u32,
        /// Unfilled slot.
        meal: MealSlot,
    },
    /// A meal was placed after its window had closed.
    #[error("{meal} outside its window at {start}, day {day}")]
    MealOutsideWindow {
        /// Affected day.
        day: u32,
        /// Slot placed late.
        meal: MealSlot,
        /// Actual start time.
        start: ClockTime,
    },
    /// No restaurant lay within the radius, so every located one inside the
    /// sanity radius was used.
    #[error("no restaurants within {radius_km} km, using all located restaurants")]
    RestaurantFilterFallback {
        /// The radius that matched nothing.
        radius_km: f64,
    },
    /// No restaurant met every dietary preference, so the filter was dropped.
    #[error("no restaurants match dietary preferences [{}]", .preferences.join(", "))]
    DietaryFilterRelaxed {
        /// Preferences that could not be honoured.
        preferences: Vec<String>,
    },
    /// The distance oracle failed and a straight-line estimate was used.
    #[error("straight-line estimate used from {from:?} to {to:?}")]
    DegradedDistance {
        /// Origin name.
        from: String,
        /// Destination name.
        to: String,
    },
    /// A day was planned without attractions.
    #[error("no attractions scheduled, day {day}")]
    EmptyDay {
        /// Affected day.
        day: u32,
    },
}

impl PlanWarning {
    /// The day this warning concerns, if it is day-specific.
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        match self {
            Self::MealUnavailable { day, .. }
            | Self::MealOutsideWindow { day, .. }
            | Self::EmptyDay { day } => Some(*day),
            Self::MissingCoordinates { .. }
            | Self::RestaurantFilterFallback { .. }
            | Self::DietaryFilterRelaxed { .. }
            | Self::DegradedDistance { .. } => None,
        }
    }
}
