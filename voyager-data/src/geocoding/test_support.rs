//! Test utilities for geocoders.
//!
//! This module provides [`StubGeocoder`], an in-memory gazetteer that
//! answers [`Geocoder`] lookups without network access.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use geo::Coord;
use voyager_core::{GeocodeError, Geocoder};

/// Stub `Geocoder` for testing.
///
/// Names match case-insensitively. Unknown names resolve to `Ok(None)`
/// unless an error has been configured, in which case every lookup fails.
///
/// # Example
///
/// ```
/// use voyager_core::Geocoder;
/// use voyager_data::geocoding::test_support::StubGeocoder;
///
/// let geocoder = StubGeocoder::new().with_place("Louvre", 2.3376, 48.8606);
///
/// assert!(geocoder.resolve("louvre", "Paris")?.is_some());
/// assert!(geocoder.resolve("Atlantis", "Paris")?.is_none());
/// assert_eq!(geocoder.calls(), 2);
/// # Ok::<(), voyager_core::GeocodeError>(())
/// ```
#[derive(Debug, Default)]
pub struct StubGeocoder {
    places: HashMap<String, Coord<f64>>,
    error: Option<GeocodeError>,
    calls: Cell<usize>,
    last_context: RefCell<Option<String>>,
}

impl StubGeocoder {
    /// Create an empty gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at longitude `x` and latitude `y`.
    #[must_use]
    pub fn with_place(mut self, name: &str, x: f64, y: f64) -> Self {
        self.places.insert(name.to_lowercase(), Coord { x, y });
        self
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub fn with_error(mut self, error: GeocodeError) -> Self {
        self.error = Some(error);
        self
    }

    /// Number of lookups performed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Context passed to the most recent lookup.
    #[must_use]
    pub fn last_context(&self) -> Option<String> {
        self.last_context.borrow().clone()
    }
}

impl Geocoder for StubGeocoder {
    fn resolve(&self, name: &str, context: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        self.calls.set(self.calls.get().saturating_add(1));
        self.last_context.replace(Some(context.to_owned()));
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.places.get(&name.trim().to_lowercase()).copied())
    }
}
