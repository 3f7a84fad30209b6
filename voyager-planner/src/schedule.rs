//! Clock times and meal insertion for one day.

use voyager_core::{
    ClockTime, DayPlan, DistanceOracle, Location, MealSlot, PlanConfig, PlanWarning,
    ScheduledStop,
};

use crate::{TravelLeg, TravelOracle};

/// Restaurants shared by every day of a trip.
///
/// Each pick prefers restaurants not yet used on any day. Once all matching
/// restaurants have been used, the nearest one is reused so meals are never
/// dropped while a candidate exists.
#[derive(Debug, Clone, Default)]
pub struct RestaurantPool {
    candidates: Vec<Location>,
    used: Vec<bool>,
}

impl RestaurantPool {
    /// Create a pool with no restaurant used yet.
    #[must_use]
    pub fn new(candidates: Vec<Location>) -> Self {
        let used = vec![false; candidates.len()];
        Self { candidates, used }
    }

    /// Number of restaurants in the pool.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool has no restaurants.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The restaurants in the pool.
    #[must_use]
    pub fn candidates(&self) -> &[Location] {
        &self.candidates
    }

    /// Choose the restaurant for `slot` nearest to `near` and mark it used.
    ///
    /// Returns `None` when no restaurant serves `slot`.
    pub fn pick<O: DistanceOracle + ?Sized>(
        &mut self,
        slot: MealSlot,
        near: &Location,
        oracle: &mut TravelOracle<'_, O>,
    ) -> Option<Location> {
        let mut best_fresh: Option<(usize, f64)> = None;
        let mut best_used: Option<(usize, f64)> = None;
        for (index, (candidate, &used)) in self.candidates.iter().zip(&self.used).enumerate() {
            if !candidate.serves(slot) {
                continue;
            }
            let km = oracle.distance_km(near, candidate).unwrap_or(f64::INFINITY);
            let best = if used {
                &mut best_used
            } else {
                &mut best_fresh
            };
            if best.is_none_or(|(_, best_km)| km < best_km) {
                *best = Some((index, km));
            }
        }
        let (index, _) = best_fresh.or(best_used)?;
        if let Some(flag) = self.used.get_mut(index) {
            *flag = true;
        }
        self.candidates.get(index).cloned()
    }
}

struct DayBuilder<'c> {
    plan: DayPlan,
    config: &'c PlanConfig,
    cursor: ClockTime,
    current: Location,
    pending: Vec<MealSlot>,
}

impl<'c> DayBuilder<'c> {
    fn new(day: u32, accommodation: &Location, config: &'c PlanConfig) -> Self {
        Self {
            plan: DayPlan::new(day),
            config,
            cursor: config.day_start,
            current: accommodation.clone(),
            pending: MealSlot::ALL.to_vec(),
        }
    }

    fn leg_to<O: DistanceOracle + ?Sized>(
        &self,
        to: &Location,
        oracle: &mut TravelOracle<'_, O>,
    ) -> TravelLeg {
        oracle.travel(&self.current, to).unwrap_or_else(|err| {
            log::warn!("no travel estimate to {:?}: {err}", to.name);
            TravelLeg::ZERO
        })
    }

    /// Arrival time at the next stop after travelling `leg`.
    fn arrival(&self, leg: &TravelLeg) -> ClockTime {
        if self.plan.stops.is_empty() {
            self.config.day_start
        } else {
            self.cursor
                .add_minutes(leg.minutes)
                .add_minutes(self.config.buffer_minutes)
        }
    }

    fn push(
        &mut self,
        location: Location,
        meal: Option<MealSlot>,
        start: ClockTime,
        duration_minutes: u32,
        leg: TravelLeg,
    ) {
        let end = start.add_minutes(duration_minutes);
        self.plan.stops.push(ScheduledStop {
            location: location.clone(),
            meal,
            start,
            end,
            travel_minutes: leg.minutes,
            travel_distance_km: leg.distance_km,
        });
        self.cursor = end;
        self.current = location;
    }

    fn visit<O: DistanceOracle + ?Sized>(
        &mut self,
        attraction: &Location,
        oracle: &mut TravelOracle<'_, O>,
    ) {
        let leg = self.leg_to(attraction, oracle);
        let start = self.arrival(&leg);
        let minutes = attraction.activity_minutes(self.config.default_activity_minutes);
        self.push(attraction.clone(), None, start, minutes, leg);
    }

    /// Place `slot` now, no earlier than `earliest`.
    fn eat<O: DistanceOracle + ?Sized>(
        &mut self,
        slot: MealSlot,
        earliest: ClockTime,
        pool: &mut RestaurantPool,
        oracle: &mut TravelOracle<'_, O>,
    ) {
        let day = self.plan.day;
        let Some(restaurant) = pool.pick(slot, &self.current, oracle) else {
            log::warn!("{slot} unavailable, day {day}");
            self.plan
                .warnings
                .push(PlanWarning::MealUnavailable { day, meal: slot });
            return;
        };
        let leg = self.leg_to(&restaurant, oracle);
        let start = self.arrival(&leg).max(earliest);
        let window = self.config.window(slot);
        if !window.contains(start) {
            log::debug!("{slot} at {start} falls outside {}-{}, day {day}", window.start, window.end);
            self.plan.warnings.push(PlanWarning::MealOutsideWindow {
                day,
                meal: slot,
                start,
            });
        }
        self.push(restaurant, Some(slot), start, self.config.meal_minutes, leg);
    }

    /// When `next` would start, with its travel leg.
    fn projected_end<O: DistanceOracle + ?Sized>(
        &self,
        next: &Location,
        oracle: &mut TravelOracle<'_, O>,
    ) -> ClockTime {
        let leg = self.leg_to(next, oracle);
        self.arrival(&leg)
            .add_minutes(next.activity_minutes(self.config.default_activity_minutes))
    }

    /// Place pending meals before visiting `next`.
    ///
    /// A meal is due once its window has opened by the cursor, or when `next`
    /// would run past the end of the window; the latter waits for the window
    /// to open.
    fn eat_due_meals<O: DistanceOracle + ?Sized>(
        &mut self,
        next: &Location,
        pool: &mut RestaurantPool,
        oracle: &mut TravelOracle<'_, O>,
    ) {
        while let Some(&slot) = self.pending.first() {
            let window = self.config.window(slot);
            let earliest = if window.has_opened(self.cursor) {
                ClockTime::MIDNIGHT
            } else if self.projected_end(next, oracle) > window.end {
                window.start
            } else {
                break;
            };
            self.pending.remove(0);
            self.eat(slot, earliest, pool, oracle);
        }
    }

    /// Place the remaining meals, each no earlier than its window start.
    fn eat_remaining_meals<O: DistanceOracle + ?Sized>(
        &mut self,
        pool: &mut RestaurantPool,
        oracle: &mut TravelOracle<'_, O>,
    ) {
        for slot in std::mem::take(&mut self.pending) {
            let opens = self.config.window(slot).start;
            self.eat(slot, opens, pool, oracle);
        }
    }
}

/// Assign times to a day's ordered attractions and insert lunch and dinner.
///
/// The first stop starts at `config.day_start`; later stops arrive after the
/// previous stop ends plus travel and `config.buffer_minutes`. Before each
/// attraction, meals whose window has opened are placed, as are meals whose
/// window the attraction would overrun; those start no earlier than the window
/// opens. Meals still pending after the last attraction are placed no earlier
/// than their window start.
/// A missing restaurant skips the meal with a
/// [`PlanWarning::MealUnavailable`] on the returned plan.
///
/// # Examples
/// ```
/// use voyager_core::test_support::{accommodation, attraction, restaurant};
/// use voyager_core::{MealSlot, MealType, PlanConfig, StraightLineOracle};
/// use voyager_planner::{RestaurantPool, TravelOracle, schedule_day};
///
/// let hotel = accommodation("Hotel", 0.0, 0.0);
/// let museum = attraction("Museum", 0.0, 0.01).with_duration_minutes(120);
/// let mut pool = RestaurantPool::new(vec![restaurant("Bistro", 0.01, 0.0, MealType::Any)]);
/// let base = StraightLineOracle::default();
/// let mut oracle = TravelOracle::new(&base, 30.0);
///
/// let plan = schedule_day(1, &[museum], &mut pool, &hotel, &PlanConfig::default(), &mut oracle);
///
/// assert_eq!(plan.stops.first().map(|s| s.start.to_string()), Some("09:00".to_owned()));
/// let lunch = plan.meal(MealSlot::Lunch).expect("lunch scheduled");
/// assert_eq!(lunch.start.to_string(), "11:30");
/// ```
pub fn schedule_day<O: DistanceOracle + ?Sized>(
    day: u32,
    ordered: &[Location],
    pool: &mut RestaurantPool,
    accommodation: &Location,
    config: &PlanConfig,
    oracle: &mut TravelOracle<'_, O>,
) -> DayPlan {
    let mut builder = DayBuilder::new(day, accommodation, config);
    for attraction in ordered {
        builder.eat_due_meals(attraction, pool, oracle);
        builder.visit(attraction, oracle);
    }
    builder.eat_remaining_meals(pool, oracle);
    if builder.cursor.overruns_day() {
        log::warn!("day {day} runs past midnight, ending at {}", builder.cursor);
    }
    builder.plan
}
