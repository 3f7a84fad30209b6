//! Fill in coordinates for candidates before planning.

use voyager_core::{Geocoder, Location, PlanRequest};

/// Counts from a resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// Candidates that already had coordinates.
    pub already_resolved: usize,
    /// Candidates given coordinates by the geocoder.
    pub resolved: usize,
    /// Candidates the geocoder found no match for.
    pub missed: usize,
    /// Candidates whose lookup failed.
    pub failed: usize,
}

impl ResolutionSummary {
    /// Candidates still without coordinates.
    #[must_use]
    pub const fn unresolved(&self) -> usize {
        self.missed.saturating_add(self.failed)
    }

    fn absorb(&mut self, other: Self) {
        self.already_resolved = self.already_resolved.saturating_add(other.already_resolved);
        self.resolved = self.resolved.saturating_add(other.resolved);
        self.missed = self.missed.saturating_add(other.missed);
        self.failed = self.failed.saturating_add(other.failed);
    }
}

/// Geocode every candidate in `candidates` that lacks coordinates.
///
/// `context` qualifies each search, typically the trip destination. Misses
/// and lookup errors are logged and leave the candidate unresolved.
///
/// # Examples
/// ```
/// use voyager_core::{Location, LocationCategory};
/// use voyager_data::geocoding::test_support::StubGeocoder;
/// use voyager_data::resolve_missing_coordinates;
///
/// let geocoder = StubGeocoder::new().with_place("Castelo de São Jorge", -9.1334, 38.7139);
/// let mut candidates = vec![
///     Location::new("Castelo de São Jorge", LocationCategory::Attraction),
///     Location::new("Atlantis", LocationCategory::Attraction),
/// ];
///
/// let summary = resolve_missing_coordinates(&mut candidates, "Lisbon", &geocoder);
///
/// assert_eq!(summary.resolved, 1);
/// assert_eq!(summary.missed, 1);
/// assert!(candidates[0].is_resolved());
/// ```
pub fn resolve_missing_coordinates<G: Geocoder + ?Sized>(
    candidates: &mut [Location],
    context: &str,
    geocoder: &G,
) -> ResolutionSummary {
    let mut summary = ResolutionSummary::default();
    for candidate in candidates.iter_mut() {
        if candidate.is_resolved() {
            summary.already_resolved = summary.already_resolved.saturating_add(1);
            continue;
        }
        match geocoder.resolve(&candidate.name, context) {
            Ok(Some(point)) => {
                log::debug!("resolved {:?} to ({}, {})", candidate.name, point.y, point.x);
                candidate.coordinates = Some(point);
                summary.resolved = summary.resolved.saturating_add(1);
            }
            Ok(None) => {
                log::warn!("no geocoding match for {:?} in {context:?}", candidate.name);
                summary.missed = summary.missed.saturating_add(1);
            }
            Err(err) => {
                log::warn!("geocoding {:?} failed: {err}", candidate.name);
                summary.failed = summary.failed.saturating_add(1);
            }
        }
    }
    summary
}

/// Geocode the accommodation, attractions and restaurants of `request`
/// within its destination.
pub fn resolve_request<G: Geocoder + ?Sized>(
    request: &mut PlanRequest,
    geocoder: &G,
) -> ResolutionSummary {
    let context = request.trip.destination.clone();
    let mut summary = resolve_missing_coordinates(
        std::slice::from_mut(&mut request.accommodation),
        &context,
        geocoder,
    );
    summary.absorb(resolve_missing_coordinates(
        &mut request.attractions,
        &context,
        geocoder,
    ));
    summary.absorb(resolve_missing_coordinates(
        &mut request.restaurants,
        &context,
        geocoder,
    ));
    log::info!(
        "geocoding resolved {} of {} unresolved candidates",
        summary.resolved,
        summary.resolved.saturating_add(summary.unresolved())
    );
    summary
}
