//! Calculator output types.
//!
//! `TripResults` is produced fresh on every calculation and never mutated.
//! The engine stores the latest snapshot on the trip row as JSON; the
//! calculator itself never reads it.

use serde::{Deserialize, Serialize};

/// Itemized costs for one country segment, in input order.
///
/// All amounts are pre-margin and already include the round-trip multiplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryResult {
    pub country_code: String,
    pub country_name: String,
    /// Km including the round-trip multiplier.
    pub km: f64,
    /// Days including the round-trip multiplier.
    pub days: u32,
    pub fuel_cost: f64,
    pub hotel_cost: f64,
    pub paid_camp_cost: f64,
    pub free_camp_cost: f64,
    pub friend_family_cost: f64,
    pub other_stay_cost: f64,
    pub food_cost: f64,
    pub border_and_tolls: f64,
    pub other_fixed: f64,
    pub subtotal: f64,
}

/// Full cost breakdown for a trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripResults {
    /// Grand total, safety margin included.
    pub total_cost: f64,
    pub total_fuel_cost: f64,
    pub total_stay_cost: f64,
    pub total_food_cost: f64,
    pub total_other_cost: f64,
    /// Post-margin total divided by total days; 0 when no days.
    pub cost_per_day: f64,
    /// Post-margin total divided by total km; 0 when no km.
    pub cost_per_km: f64,
    pub per_country: Vec<CountryResult>,
}

impl TripResults {
    /// Pre-margin sum of the four category totals.
    pub fn raw_total(&self) -> f64 {
        self.total_fuel_cost + self.total_stay_cost + self.total_food_cost + self.total_other_cost
    }
}
