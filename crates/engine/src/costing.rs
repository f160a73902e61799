//! The trip cost calculator.
//!
//! A stateless, deterministic, pure function: it consumes a fully-materialized
//! `(Trip, Vehicle, Settings)` triple and produces a [`TripResults`] with one
//! [`CountryResult`] per segment, in input order. No I/O, no hidden state;
//! callers may invoke it from any task without synchronization.
//!
//! All inputs are validated up front. The function either returns a complete
//! breakdown or an [`EngineError`] before any output is produced; garbage
//! numbers never flow through silently.

use crate::{
    ResultEngine,
    results::{CountryResult, TripResults},
    segments::CountrySegment,
    settings::Settings,
    trips::Trip,
    vehicles::{self, Vehicle},
};

/// Trip-wide fallback when the assumptions carry no daily food budget.
pub const DEFAULT_DAILY_FOOD_BUDGET: f64 = 15.0;

/// Computes the full cost breakdown for a trip.
///
/// The safety margin inflates the grand total only; per-category totals and
/// per-country subtotals stay pre-margin. Derived rates (`cost_per_day`,
/// `cost_per_km`) use the post-margin total.
pub fn calculate(trip: &Trip, vehicle: &Vehicle, settings: &Settings) -> ResultEngine<TripResults> {
    vehicles::validate_consumption(vehicle.consumption)?;
    settings.validate()?;
    trip.assumptions.validate()?;
    for segment in &trip.segments {
        segment.validate()?;
    }

    let l_per_100km = vehicle.consumption_l_per_100km();

    // Applied uniformly and exactly once per distance, night, day, and fixed
    // cost. It must not compound across nested computations.
    let multiplier: f64 = if trip.is_round_trip { 2.0 } else { 1.0 };
    let day_multiplier: u32 = if trip.is_round_trip { 2 } else { 1 };

    let food_per_day = trip
        .assumptions
        .daily_food_budget
        .unwrap_or(DEFAULT_DAILY_FOOD_BUDGET);

    let per_country: Vec<CountryResult> = trip
        .segments
        .iter()
        .map(|segment| segment_result(segment, l_per_100km, multiplier, day_multiplier, food_per_day, settings))
        .collect();

    let total_fuel_cost: f64 = per_country.iter().map(|c| c.fuel_cost).sum();
    let total_stay_cost: f64 = per_country
        .iter()
        .map(|c| {
            c.hotel_cost + c.paid_camp_cost + c.free_camp_cost + c.friend_family_cost
                + c.other_stay_cost
        })
        .sum();
    let total_food_cost: f64 = per_country.iter().map(|c| c.food_cost).sum();
    let total_other_cost: f64 = per_country
        .iter()
        .map(|c| c.border_and_tolls + c.other_fixed)
        .sum();

    let raw_total = total_fuel_cost + total_stay_cost + total_food_cost + total_other_cost;

    let margin = trip
        .assumptions
        .safety_margin_percent
        .unwrap_or(settings.default_safety_margin_percent);
    let total_cost = raw_total * (1.0 + margin / 100.0);

    let total_km: f64 = per_country.iter().map(|c| c.km).sum();
    let total_days: u32 = per_country.iter().map(|c| c.days).sum();

    Ok(TripResults {
        total_cost,
        total_fuel_cost,
        total_stay_cost,
        total_food_cost,
        total_other_cost,
        cost_per_day: if total_days > 0 {
            total_cost / f64::from(total_days)
        } else {
            0.0
        },
        cost_per_km: if total_km > 0.0 {
            total_cost / total_km
        } else {
            0.0
        },
        per_country,
    })
}

fn segment_result(
    segment: &CountrySegment,
    l_per_100km: f64,
    multiplier: f64,
    day_multiplier: u32,
    food_per_day: f64,
    settings: &Settings,
) -> CountryResult {
    let liters = (segment.km * l_per_100km) / 100.0;
    let fuel_cost = liters * segment.fuel_price_per_liter.unwrap_or(0.0) * multiplier;

    let mut hotel_cost = 0.0;
    let mut paid_camp_cost = 0.0;
    let mut free_camp_cost = 0.0;
    let mut friend_family_cost = 0.0;
    let mut other_stay_cost = 0.0;

    for stay in &segment.stays {
        let nights = f64::from(stay.nights) * multiplier;
        // Explicit cost always wins, including an explicit 0.
        let cost_per_night = stay
            .cost_per_night
            .unwrap_or_else(|| settings.default_stay_costs.for_stay_type(stay.stay_type));
        let total = nights * cost_per_night;

        match stay.stay_type {
            crate::stays::StayType::Hotel => hotel_cost += total,
            crate::stays::StayType::PaidCamp => paid_camp_cost += total,
            crate::stays::StayType::FreeCamp => free_camp_cost += total,
            crate::stays::StayType::FriendFamily => friend_family_cost += total,
            crate::stays::StayType::Other => other_stay_cost += total,
        }
    }

    let days = segment.days.unwrap_or(0) * day_multiplier;
    let food_cost = f64::from(days) * food_per_day;

    let border_and_tolls = (segment.border_fees.unwrap_or(0.0)
        + segment.tolls_and_vignettes.unwrap_or(0.0))
        * multiplier;
    let other_fixed = segment.other_fixed_costs.unwrap_or(0.0) * multiplier;

    let subtotal = fuel_cost
        + hotel_cost
        + paid_camp_cost
        + free_camp_cost
        + friend_family_cost
        + other_stay_cost
        + food_cost
        + border_and_tolls
        + other_fixed;

    CountryResult {
        country_code: segment.country_code.clone(),
        country_name: segment.country_name.clone(),
        km: segment.km * multiplier,
        days,
        fuel_cost,
        hotel_cost,
        paid_camp_cost,
        free_camp_cost,
        friend_family_cost,
        other_stay_cost,
        food_cost,
        border_and_tolls,
        other_fixed,
        subtotal,
    }
}
