//! Candidate filtering by distance and dietary preference.

use voyager_core::{DistanceOracle, Location};

use crate::TravelOracle;

/// Result of [`filter_by_radius`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadiusFilterOutcome {
    /// Candidates within the radius, in input order.
    pub kept: Vec<Location>,
    /// Candidates without coordinates.
    pub missing_coordinates: Vec<Location>,
    /// Candidates beyond the radius with their measured distance.
    pub out_of_radius: Vec<(Location, f64)>,
}

impl RadiusFilterOutcome {
    /// Every candidate that has coordinates, kept or not, in input order
    /// within each group.
    #[must_use]
    pub fn into_located(self) -> Vec<Location> {
        let mut located = self.kept;
        located.extend(self.out_of_radius.into_iter().map(|(location, _)| location));
        located
    }
}

/// Split `candidates` by distance from `reference`.
///
/// Candidates at most `max_km` away are kept. Distances come from `oracle`,
/// so they fall back to straight lines when the wrapped oracle fails. An empty
/// `kept` list is not an error.
pub fn filter_by_radius<O: DistanceOracle + ?Sized>(
    candidates: Vec<Location>,
    reference: &Location,
    max_km: f64,
    oracle: &mut TravelOracle<'_, O>,
) -> RadiusFilterOutcome {
    let mut outcome = RadiusFilterOutcome::default();
    for candidate in candidates {
        match oracle.distance_km(reference, &candidate) {
            None => {
                log::warn!("{} {:?} has no coordinates", candidate.category, candidate.name);
                outcome.missing_coordinates.push(candidate);
            }
            Some(km) if km <= max_km => outcome.kept.push(candidate),
            Some(km) => {
                log::debug!(
                    "{:?} is {km:.1} km from {:?}, beyond {max_km} km",
                    candidate.name,
                    reference.name
                );
                outcome.out_of_radius.push((candidate, km));
            }
        }
    }
    outcome
}

/// Result of [`filter_by_dietary`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DietaryFilterOutcome {
    /// Restaurants to plan with.
    pub restaurants: Vec<Location>,
    /// Whether no restaurant matched and the filter was dropped.
    pub relaxed: bool,
}

/// Keep restaurants whose dietary tags cover every preference.
///
/// With no preferences every restaurant matches. When none match, the whole
/// list is returned with `relaxed` set so meals are not lost.
#[must_use]
pub fn filter_by_dietary(restaurants: Vec<Location>, preferences: &[String]) -> DietaryFilterOutcome {
    if preferences.is_empty() || restaurants.is_empty() {
        return DietaryFilterOutcome {
            restaurants,
            relaxed: false,
        };
    }
    let (matching, others): (Vec<_>, Vec<_>) = restaurants
        .into_iter()
        .partition(|restaurant| restaurant.matches_dietary(preferences));
    if matching.is_empty() {
        log::warn!(
            "no restaurant matches dietary preferences {preferences:?}, ignoring them"
        );
        DietaryFilterOutcome {
            restaurants: others,
            relaxed: true,
        }
    } else {
        DietaryFilterOutcome {
            restaurants: matching,
            relaxed: false,
        }
    }
}
