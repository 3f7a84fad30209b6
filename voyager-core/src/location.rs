//! Candidate places a trip can visit.
//!
//! A [`Location`] is an attraction, the chosen accommodation or a restaurant.
//! Candidates arrive from an upstream generator and may lack coordinates until
//! a [`Geocoder`](crate::Geocoder) resolves them.

use std::fmt;

use geo::Coord;

/// Role a location plays within a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocationCategory {
    /// A place to spend time at.
    Attraction,
    /// The trip's base; every day starts here.
    Accommodation,
    /// Somewhere to eat.
    Restaurant,
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attraction => "attraction",
            Self::Accommodation => "accommodation",
            Self::Restaurant => "restaurant",
        })
    }
}

/// Meals a restaurant advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MealType {
    /// Breakfast only; never scheduled into a lunch or dinner slot.
    Breakfast,
    /// Lunch only.
    Lunch,
    /// Dinner only.
    Dinner,
    /// Any meal.
    #[default]
    Any,
}

impl MealType {
    /// Whether a restaurant of this type can fill `slot`.
    ///
    /// # Examples
    /// ```
    /// use voyager_core::{MealSlot, MealType};
    ///
    /// assert!(MealType::Any.serves(MealSlot::Dinner));
    /// assert!(!MealType::Lunch.serves(MealSlot::Dinner));
    /// ```
    #[must_use]
    pub const fn serves(self, slot: MealSlot) -> bool {
        matches!(
            (self, slot),
            (Self::Any, _) | (Self::Lunch, MealSlot::Lunch) | (Self::Dinner, MealSlot::Dinner)
        )
    }
}

/// Meal slots the scheduler fills each day, in the order they are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MealSlot {
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
}

impl MealSlot {
    /// Every slot in placement order.
    pub const ALL: [Self; 2] = [Self::Lunch, Self::Dinner];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        })
    }
}

/// How long a visit is expected to take.
///
/// Generators emit either a number of minutes or free text such as
/// `"1-2 hours"`. Text is interpreted by [`DurationEstimate::minutes`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DurationEstimate {
    /// An exact number of minutes.
    Minutes(u32),
    /// Free text, e.g. `"2 hours"` or `"half day"`.
    Text(String),
}

const HALF_OR_FULL_DAY_MINUTES: u32 = 240;

impl DurationEstimate {
    /// Estimated visit length in minutes, or `None` when it cannot be read.
    ///
    /// Text uses its first number and unit: `"1-2 hours"` is 60 minutes,
    /// `"1.5 hours"` is 90 and `"45 minutes"` is 45. `"half day"` and
    /// `"full day"` are both 240 minutes. Zero is treated as unknown.
    ///
    /// # Examples
    /// ```
    /// use voyager_core::DurationEstimate;
    ///
    /// assert_eq!(DurationEstimate::Text("1-2 hours".into()).minutes(), Some(60));
    /// assert_eq!(DurationEstimate::Text("half day".into()).minutes(), Some(240));
    /// assert_eq!(DurationEstimate::Text("a while".into()).minutes(), None);
    /// ```
    #[must_use]
    pub fn minutes(&self) -> Option<u32> {
        match self {
            Self::Minutes(0) => None,
            Self::Minutes(minutes) => Some(*minutes),
            Self::Text(text) => parse_duration_text(text),
        }
    }
}

fn parse_duration_text(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    if lower.contains("half") || lower.contains("full") {
        return Some(HALF_OR_FULL_DAY_MINUTES);
    }
    let number: String = lower
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = number.parse::<f64>().ok()?;
    let in_minutes = lower.contains("min") && !lower.contains("hour");
    let minutes = if in_minutes {
        value
    } else {
        scale_hours(value)
    };
    clamp_minutes(minutes)
}

#[expect(
    clippy::float_arithmetic,
    reason = "fractional hour estimates such as 1.5 hours are converted to minutes"
)]
fn scale_hours(hours: f64) -> f64 {
    hours * 60.0
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and range-checked before the cast"
)]
fn clamp_minutes(minutes: f64) -> Option<u32> {
    let rounded = minutes.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

/// Descriptive attributes carried through to the rendered itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocationDetails {
    /// Short free-text description.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// Price tier label such as `$$`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub price_tier: Option<String>,
    /// Expected visit length.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub duration: Option<DurationEstimate>,
    /// Meals a restaurant serves; absent means any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub meal_type: Option<MealType>,
    /// Cuisine label for restaurants.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cuisine: Option<String>,
    /// Dietary tags such as `vegetarian`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub dietary: Vec<String>,
}

/// A named place, optionally resolved to coordinates.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voyager_core::{Location, LocationCategory};
///
/// let museum = Location::new("Museum", LocationCategory::Attraction)
///     .with_coordinates(Coord { x: 2.33, y: 48.86 })
///     .with_duration_minutes(90);
///
/// assert!(museum.is_resolved());
/// assert_eq!(museum.activity_minutes(120), 90);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Display name; also used as the geocoding query.
    pub name: String,
    /// Role within the trip.
    pub category: LocationCategory,
    /// Resolved position, if known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub coordinates: Option<Coord<f64>>,
    /// Descriptive attributes.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub details: LocationDetails,
}

impl Location {
    /// Construct an unresolved location with no details.
    #[must_use]
    pub fn new(name: impl Into<String>, category: LocationCategory) -> Self {
        Self {
            name: name.into(),
            category,
            coordinates: None,
            details: LocationDetails::default(),
        }
    }

    /// Set the resolved coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coord<f64>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Set an exact visit length in minutes.
    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.details.duration = Some(DurationEstimate::Minutes(minutes));
        self
    }

    /// Set a free-text visit length.
    #[must_use]
    pub fn with_duration_text(mut self, text: impl Into<String>) -> Self {
        self.details.duration = Some(DurationEstimate::Text(text.into()));
        self
    }

    /// Set the meals a restaurant serves.
    #[must_use]
    pub const fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.details.meal_type = Some(meal_type);
        self
    }

    /// Replace the dietary tags.
    #[must_use]
    pub fn with_dietary<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.dietary = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether coordinates are known.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }

    /// Visit length in minutes, falling back to `default_minutes`.
    #[must_use]
    pub fn activity_minutes(&self, default_minutes: u32) -> u32 {
        self.details
            .duration
            .as_ref()
            .and_then(DurationEstimate::minutes)
            .unwrap_or(default_minutes)
    }

    /// Whether this restaurant can fill `slot`.
    ///
    /// Non-restaurants never serve meals. A restaurant without a meal type
    /// serves any slot.
    #[must_use]
    pub fn serves(&self, slot: MealSlot) -> bool {
        self.category == LocationCategory::Restaurant
            && self.details.meal_type.unwrap_or_default().serves(slot)
    }

    /// Whether the dietary tags cover every preference, ignoring case.
    ///
    /// An empty preference list matches everything.
    ///
    /// # Examples
    /// ```
    /// use voyager_core::{Location, LocationCategory};
    ///
    /// let cafe = Location::new("Cafe", LocationCategory::Restaurant)
    ///     .with_dietary(["Vegan", "gluten-free"]);
    /// assert!(cafe.matches_dietary(&["vegan".to_owned()]));
    /// assert!(!cafe.matches_dietary(&["halal".to_owned()]));
    /// ```
    #[must_use]
    pub fn matches_dietary(&self, preferences: &[String]) -> bool {
        preferences.iter().all(|wanted| {
            self.details
                .dietary
                .iter()
                .any(|tag| tag.trim().eq_ignore_ascii_case(wanted.trim()))
        })
    }
}
