//! The planned trip produced by a [`Planner`](crate::Planner).

use std::fmt;

use crate::{ClockTime, Location, LocationCategory, MealSlot, PlanWarning};

/// How much the traveller intends to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BudgetLevel {
    /// Cheapest options.
    Budget,
    /// Moderate spending.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "medium"))]
    MidRange,
    /// Top-end options.
    #[cfg_attr(feature = "serde", serde(alias = "luxury"))]
    Premium,
}

/// Descriptive facts about the trip, echoed into the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripMetadata {
    /// Destination city or region.
    pub destination: String,
    /// Number of days to plan; must be at least one.
    pub days: u32,
    /// Free-text theme such as `cultural` or `family`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trip_type: String,
    /// Spending level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub budget: BudgetLevel,
    /// Dietary preferences restaurants must honour.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub dietary_preferences: Vec<String>,
}

/// One timed entry in a [`DayPlan`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledStop {
    /// The place visited.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub location: Location,
    /// Meal slot filled by this stop, if it is a meal.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub meal: Option<MealSlot>,
    /// Arrival time.
    pub start: ClockTime,
    /// Departure time.
    pub end: ClockTime,
    /// Travel time from the previous stop, or from the accommodation.
    pub travel_minutes: u32,
    /// Travel distance from the previous stop, or from the accommodation.
    pub travel_distance_km: f64,
}

impl ScheduledStop {
    /// Whether this stop fills a meal slot.
    #[must_use]
    pub const fn is_meal(&self) -> bool {
        self.meal.is_some()
    }

    /// Time spent at the stop in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.start.minutes_until(self.end)
    }
}

/// The schedule for a single day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayPlan {
    /// One-based day index.
    pub day: u32,
    /// Stops in visiting order with non-decreasing start times.
    pub stops: Vec<ScheduledStop>,
    /// Soft failures specific to this day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<PlanWarning>,
}

impl DayPlan {
    /// Create an empty plan for `day`.
    #[must_use]
    pub const fn new(day: u32) -> Self {
        Self {
            day,
            stops: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Attraction stops in visiting order.
    pub fn attractions(&self) -> impl Iterator<Item = &ScheduledStop> {
        self.stops
            .iter()
            .filter(|stop| stop.location.category == LocationCategory::Attraction)
    }

    /// Number of attractions visited.
    #[must_use]
    pub fn attraction_count(&self) -> usize {
        self.attractions().count()
    }

    /// The stop filling `slot`, if one was scheduled.
    #[must_use]
    pub fn meal(&self, slot: MealSlot) -> Option<&ScheduledStop> {
        self.stops.iter().find(|stop| stop.meal == Some(slot))
    }

    /// Total travel minutes across the day.
    #[must_use]
    pub fn total_travel_minutes(&self) -> u32 {
        self.stops
            .iter()
            .fold(0_u32, |acc, stop| acc.saturating_add(stop.travel_minutes))
    }
}

/// Why a candidate was excluded from the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RejectionReason {
    /// No coordinates were available.
    MissingCoordinates,
    /// Further from the accommodation than the sanity radius.
    ExceedsSanityRadius,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingCoordinates => "missing coordinates",
            Self::ExceedsSanityRadius => "exceeds sanity radius",
        })
    }
}

/// A candidate that failed validation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectedCandidate {
    /// Candidate name.
    pub name: String,
    /// Candidate category.
    pub category: LocationCategory,
    /// Reason for rejection.
    pub reason: RejectionReason,
    /// Measured distance from the accommodation, when known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub distance_km: Option<f64>,
}

impl RejectedCandidate {
    /// Reject `location` for `reason`.
    #[must_use]
    pub fn new(location: &Location, reason: RejectionReason, distance_km: Option<f64>) -> Self {
        Self {
            name: location.name.clone(),
            category: location.category,
            reason,
            distance_km,
        }
    }
}

/// A complete multi-day plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    /// Trip metadata from the request.
    pub trip: TripMetadata,
    /// One plan per day, in order.
    pub days: Vec<DayPlan>,
    /// Candidates excluded during validation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rejected: Vec<RejectedCandidate>,
    /// Soft failures that are not tied to a day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<PlanWarning>,
}

impl Itinerary {
    /// Every scheduled stop across all days.
    pub fn stops(&self) -> impl Iterator<Item = &ScheduledStop> {
        self.days.iter().flat_map(|day| day.stops.iter())
    }

    /// Run-level and day-level warnings together.
    pub fn all_warnings(&self) -> impl Iterator<Item = &PlanWarning> {
        self.warnings
            .iter()
            .chain(self.days.iter().flat_map(|day| day.warnings.iter()))
    }
}
