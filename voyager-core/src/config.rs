//! Tunable constants for a planning run.
//!
//! [`PlanConfig`] is an immutable value passed into each planning call, so
//! two runs with different settings never interfere.

use thiserror::Error;

use crate::{ClockTime, MealSlot};

/// Interval within which a meal should start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MealWindow {
    /// Earliest start.
    pub start: ClockTime,
    /// Latest start.
    pub end: ClockTime,
}

impl MealWindow {
    /// Construct a window from its bounds.
    #[must_use]
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Whether `time` lies within the window, bounds included.
    #[must_use]
    pub const fn contains(&self, time: ClockTime) -> bool {
        time.minutes() >= self.start.minutes() && time.minutes() <= self.end.minutes()
    }

    /// Whether the window has opened by `time`.
    #[must_use]
    pub const fn has_opened(&self, time: ClockTime) -> bool {
        time.minutes() >= self.start.minutes()
    }
}

/// Settings controlling the itinerary engine.
///
/// # Examples
/// ```
/// use voyager_core::{ClockTime, PlanConfig};
///
/// let config = PlanConfig::default()
///     .with_day_start(ClockTime::from_minutes(8 * 60))
///     .with_buffer_minutes(20);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.restaurant_radius_km, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanConfig {
    /// When the first stop of each day begins.
    pub day_start: ClockTime,
    /// Fixed slack added to every travel leg after the first.
    pub buffer_minutes: u32,
    /// Visit length for attractions without a usable estimate.
    pub default_activity_minutes: u32,
    /// Length of every meal.
    pub meal_minutes: u32,
    /// Lunch start window.
    pub lunch: MealWindow,
    /// Dinner start window.
    pub dinner: MealWindow,
    /// Maximum restaurant distance from the accommodation.
    pub restaurant_radius_km: f64,
    /// Maximum attraction distance from the accommodation.
    pub sanity_radius_km: f64,
    /// Speed used for straight-line estimates when the oracle fails.
    pub fallback_speed_kmh: f64,
    /// Plan days without attractions instead of failing.
    pub allow_empty_days: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            day_start: ClockTime::from_minutes(9 * 60),
            buffer_minutes: 15,
            default_activity_minutes: 120,
            meal_minutes: 60,
            lunch: MealWindow::new(
                ClockTime::from_minutes(11 * 60 + 30),
                ClockTime::from_minutes(14 * 60),
            ),
            dinner: MealWindow::new(
                ClockTime::from_minutes(17 * 60 + 30),
                ClockTime::from_minutes(20 * 60),
            ),
            restaurant_radius_km: 50.0,
            sanity_radius_km: 200.0,
            fallback_speed_kmh: 30.0,
            allow_empty_days: false,
        }
    }
}

impl PlanConfig {
    /// Override the daily start time.
    #[must_use]
    pub const fn with_day_start(mut self, day_start: ClockTime) -> Self {
        self.day_start = day_start;
        self
    }

    /// Override the inter-stop buffer.
    #[must_use]
    pub const fn with_buffer_minutes(mut self, minutes: u32) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    /// Override the default attraction length.
    #[must_use]
    pub const fn with_default_activity_minutes(mut self, minutes: u32) -> Self {
        self.default_activity_minutes = minutes;
        self
    }

    /// Override the window for `slot`.
    #[must_use]
    pub const fn with_meal_window(mut self, slot: MealSlot, window: MealWindow) -> Self {
        match slot {
            MealSlot::Lunch => self.lunch = window,
            MealSlot::Dinner => self.dinner = window,
        }
        self
    }

    /// Override the restaurant radius.
    #[must_use]
    pub const fn with_restaurant_radius_km(mut self, radius_km: f64) -> Self {
        self.restaurant_radius_km = radius_km;
        self
    }

    /// Override the attraction sanity radius.
    #[must_use]
    pub const fn with_sanity_radius_km(mut self, radius_km: f64) -> Self {
        self.sanity_radius_km = radius_km;
        self
    }

    /// Override the straight-line fallback speed.
    #[must_use]
    pub const fn with_fallback_speed_kmh(mut self, speed_kmh: f64) -> Self {
        self.fallback_speed_kmh = speed_kmh;
        self
    }

    /// Allow days without attractions.
    #[must_use]
    pub const fn with_allow_empty_days(mut self, allow: bool) -> Self {
        self.allow_empty_days = allow;
        self
    }

    /// The start window for `slot`.
    #[must_use]
    pub const fn window(&self, slot: MealSlot) -> MealWindow {
        match slot {
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    /// Returns [`PlanConfigError`] for inverted or overlapping meal windows,
    /// non-positive radii or speeds, and zero-length activities or meals.
    pub fn validate(&self) -> Result<(), PlanConfigError> {
        for slot in MealSlot::ALL {
            let window = self.window(slot);
            if window.end < window.start {
                return Err(PlanConfigError::InvertedMealWindow {
                    meal: slot,
                    start: window.start,
                    end: window.end,
                });
            }
        }
        if self.dinner.start <= self.lunch.end {
            return Err(PlanConfigError::OverlappingMealWindows);
        }
        check_positive("restaurant_radius_km", self.restaurant_radius_km)?;
        check_positive("sanity_radius_km", self.sanity_radius_km)?;
        check_positive("fallback_speed_kmh", self.fallback_speed_kmh)?;
        if self.default_activity_minutes == 0 {
            return Err(PlanConfigError::ZeroDuration {
                field: "default_activity_minutes",
            });
        }
        if self.meal_minutes == 0 {
            return Err(PlanConfigError::ZeroDuration {
                field: "meal_minutes",
            });
        }
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), PlanConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlanConfigError::NonPositive { field, value })
    }
}

/// Errors returned by [`PlanConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanConfigError {
    /// A meal window ends before it starts.
    #[error("{meal} window {start}-{end} ends before it starts")]
    InvertedMealWindow {
        /// Affected slot.
        meal: MealSlot,
        /// Configured start.
        start: ClockTime,
        /// Configured end.
        end: ClockTime,
    },
    /// Dinner opens before lunch closes.
    #[error("dinner window must open after the lunch window closes")]
    OverlappingMealWindows,
    /// A distance or speed was zero, negative or not finite.
    #[error("{field} must be a positive number, got {value}")]
    NonPositive {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// An activity or meal length was zero.
    #[error("{field} must be greater than zero")]
    ZeroDuration {
        /// Setting name.
        field: &'static str,
    },
}
