//! Whole-trip assembly and the [`GreedyPlanner`].
//!
//! The assembler validates attractions against the accommodation, partitions
//! the survivors across days, then orders and schedules each day in turn. One
//! [`TravelOracle`] and one [`RestaurantPool`] are shared across the days so
//! distance lookups are cached and restaurants rotate through the trip.

use voyager_core::{
    DayPlan, DistanceOracle, Itinerary, Location, PlanConfig, PlanError, PlanRequest,
    PlanWarning, Planner, RejectedCandidate, RejectionReason,
};

use crate::{
    RestaurantPool, TravelOracle, filter_by_dietary, filter_by_radius, order_by_proximity,
    schedule_day, tour_distance_km,
};

/// Plan `request` with `config`, consulting `oracle` for travel estimates.
///
/// # Errors
/// Returns [`PlanError::InvalidRequest`] or [`PlanError::InvalidConfig`] for
/// malformed input, [`PlanError::AccommodationUnresolved`] when the
/// accommodation has no coordinates, [`PlanError::NoAttractions`] when every
/// attraction is rejected and [`PlanError::InsufficientAttractions`] when a
/// day would be empty and `config.allow_empty_days` is unset.
pub fn build_itinerary<O: DistanceOracle + ?Sized>(
    request: &PlanRequest,
    config: &PlanConfig,
    oracle: &O,
) -> Result<Itinerary, PlanError> {
    config.validate()?;
    request.validate()?;
    let accommodation = &request.accommodation;
    if !accommodation.is_resolved() {
        return Err(PlanError::AccommodationUnresolved {
            name: accommodation.name.clone(),
        });
    }
    let days = request.trip.days;
    log::info!(
        "planning {days} day(s) in {:?} from {} attraction candidates",
        request.trip.destination,
        request.attractions.len()
    );

    let mut travel = TravelOracle::new(oracle, config.fallback_speed_kmh);
    let mut warnings = Vec::new();

    let (validated, rejected) = validate_attractions(request, config, &mut travel);
    if validated.is_empty() {
        return Err(PlanError::NoAttractions { rejected });
    }
    let validated_count = validated.len();
    let per_day = request
        .attractions_per_day
        .unwrap_or_else(|| default_per_day(validated_count, days));
    let chunks = partition(validated, days, per_day);
    if let Some(empty) = first_empty_day(&chunks)
        && !config.allow_empty_days
    {
        return Err(PlanError::InsufficientAttractions {
            day: empty,
            validated: validated_count,
            days,
        });
    }

    let restaurants = prepare_restaurants(request, config, &mut travel, &mut warnings);
    let mut pool = RestaurantPool::new(restaurants);
    log::debug!(
        "{validated_count} attractions at {per_day} per day, {} restaurants",
        pool.len()
    );

    let mut plans = Vec::with_capacity(chunks.len());
    for (day, chunk) in (1..=days).zip(chunks) {
        plans.push(plan_day(day, chunk, &mut pool, accommodation, config, &mut travel));
    }

    warnings.extend(travel.into_warnings());
    Ok(Itinerary {
        trip: request.trip.clone(),
        days: plans,
        rejected,
        warnings,
    })
}

fn plan_day<O: DistanceOracle + ?Sized>(
    day: u32,
    attractions: Vec<Location>,
    pool: &mut RestaurantPool,
    accommodation: &Location,
    config: &PlanConfig,
    travel: &mut TravelOracle<'_, O>,
) -> DayPlan {
    let mut stops: Vec<&Location> = Vec::with_capacity(attractions.len().saturating_add(1));
    stops.push(accommodation);
    stops.extend(attractions.iter());
    travel.prefetch(&stops);

    let ordered = order_by_proximity(attractions, accommodation, travel);
    log::debug!(
        "day {day}: {} attractions over {:.1} km",
        ordered.len(),
        tour_distance_km(accommodation, &ordered, travel)
    );
    let mut plan = schedule_day(day, &ordered, pool, accommodation, config, travel);
    if ordered.is_empty() {
        log::warn!("day {day} has no attractions");
        plan.warnings.insert(0, PlanWarning::EmptyDay { day });
    }
    plan
}

/// Split attractions into those usable for planning and those rejected.
fn validate_attractions<O: DistanceOracle + ?Sized>(
    request: &PlanRequest,
    config: &PlanConfig,
    travel: &mut TravelOracle<'_, O>,
) -> (Vec<Location>, Vec<RejectedCandidate>) {
    let outcome = filter_by_radius(
        request.attractions.clone(),
        &request.accommodation,
        config.sanity_radius_km,
        travel,
    );
    let mut rejected: Vec<RejectedCandidate> = outcome
        .missing_coordinates
        .iter()
        .map(|l| RejectedCandidate::new(l, RejectionReason::MissingCoordinates, None))
        .collect();
    rejected.extend(outcome.out_of_radius.iter().map(|(l, km)| {
        RejectedCandidate::new(l, RejectionReason::ExceedsSanityRadius, Some(*km))
    }));
    for entry in &rejected {
        log::warn!("rejected {:?}: {}", entry.name, entry.reason);
    }
    (outcome.kept, rejected)
}

/// Restaurants for the whole trip after dietary and radius filtering.
fn prepare_restaurants<O: DistanceOracle + ?Sized>(
    request: &PlanRequest,
    config: &PlanConfig,
    travel: &mut TravelOracle<'_, O>,
    warnings: &mut Vec<PlanWarning>,
) -> Vec<Location> {
    let preferences = &request.trip.dietary_preferences;
    let dietary = filter_by_dietary(request.restaurants.clone(), preferences);
    if dietary.relaxed {
        warnings.push(PlanWarning::DietaryFilterRelaxed {
            preferences: preferences.clone(),
        });
    }
    let outcome = filter_by_radius(
        dietary.restaurants,
        &request.accommodation,
        config.restaurant_radius_km,
        travel,
    );
    warnings.extend(
        outcome
            .missing_coordinates
            .iter()
            .map(|l| PlanWarning::MissingCoordinates {
                name: l.name.clone(),
                category: l.category,
            }),
    );
    if !outcome.kept.is_empty() {
        return outcome.kept;
    }
    let fallback: Vec<Location> = outcome
        .out_of_radius
        .into_iter()
        .filter(|(_, km)| *km <= config.sanity_radius_km)
        .map(|(location, _)| location)
        .collect();
    if !fallback.is_empty() {
        log::warn!(
            "no restaurants within {} km, using all located restaurants",
            config.restaurant_radius_km
        );
        warnings.push(PlanWarning::RestaurantFilterFallback {
            radius_km: config.restaurant_radius_km,
        });
    }
    fallback
}

/// `max(1, validated / days)`.
fn default_per_day(validated: usize, days: u32) -> usize {
    usize::try_from(days)
        .ok()
        .and_then(|d| validated.checked_div(d))
        .unwrap_or(0)
        .max(1)
}

/// Split `attractions` in order into `days` chunks of `per_day`; the last
/// chunk absorbs any remainder.
fn partition(attractions: Vec<Location>, days: u32, per_day: usize) -> Vec<Vec<Location>> {
    let mut remaining = attractions.into_iter();
    let mut chunks = Vec::new();
    for day in 1..=days {
        let chunk: Vec<Location> = if day == days {
            remaining.by_ref().collect()
        } else {
            remaining.by_ref().take(per_day).collect()
        };
        chunks.push(chunk);
    }
    chunks
}

fn first_empty_day(chunks: &[Vec<Location>]) -> Option<u32> {
    (1_u32..)
        .zip(chunks)
        .find_map(|(day, chunk)| chunk.is_empty().then_some(day))
}

/// Configuration-holding [`Planner`] backed by a [`DistanceOracle`].
///
/// # Examples
/// ```
/// use voyager_core::test_support::{accommodation, attraction, restaurant};
/// use voyager_core::{MealType, PlanRequest, Planner, StraightLineOracle, TripMetadata};
/// use voyager_planner::GreedyPlanner;
///
/// let planner = GreedyPlanner::new(StraightLineOracle::default());
/// let request = PlanRequest {
///     trip: TripMetadata { destination: "Porto".into(), days: 1, ..TripMetadata::default() },
///     accommodation: accommodation("Hotel", -8.61, 41.15),
///     attractions: vec![attraction("Tower", -8.6146, 41.1458)],
///     restaurants: vec![restaurant("Tasca", -8.611, 41.147, MealType::Any)],
///     attractions_per_day: None,
/// };
///
/// let itinerary = planner.plan(&request)?;
/// assert_eq!(itinerary.days.len(), 1);
/// # Ok::<(), voyager_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedyPlanner<O> {
    oracle: O,
    config: PlanConfig,
}

impl<O: DistanceOracle> GreedyPlanner<O> {
    /// Construct a planner using default configuration.
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, PlanConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(oracle: O, config: PlanConfig) -> Self {
        Self { oracle, config }
    }

    /// The configuration applied to every plan.
    #[must_use]
    pub const fn config(&self) -> &PlanConfig {
        &self.config
    }
}

impl<O> Planner for GreedyPlanner<O>
where
    O: DistanceOracle + Send + Sync,
{
    fn plan(&self, request: &PlanRequest) -> Result<Itinerary, PlanError> {
        build_itinerary(request, &self.config, &self.oracle)
    }
}

#[cfg(test)]
mod tests;
