//! Wire types shared by the HTTP server and its clients.
//!
//! Pure serde structs, no logic. Enum spellings (`fuel_unit`, `stay_type`,
//! currency codes) match the engine's canonical strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Kwd,
    Sar,
    Aed,
    Eur,
    Usd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelUnit {
    #[serde(rename = "liters_per_100km")]
    LitersPer100Km,
    #[serde(rename = "km_per_liter")]
    KmPerLiter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayType {
    Hotel,
    PaidCamp,
    FreeCamp,
    FriendFamily,
    Other,
}

pub mod vehicle {
    use super::*;

    /// Request body for creating or fully replacing a vehicle.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleUpsert {
        pub name: String,
        /// Free text, e.g. "95", "98", "diesel".
        pub fuel_type: String,
        pub fuel_unit: FuelUnit,
        pub consumption: f64,
        pub tank_size_liters: Option<f64>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleView {
        pub id: Uuid,
        pub name: String,
        pub fuel_type: String,
        pub fuel_unit: FuelUnit,
        pub consumption: f64,
        pub tank_size_liters: Option<f64>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VehicleList {
        pub vehicles: Vec<VehicleView>,
    }
}

pub mod trip {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StayUpsert {
        pub city_or_area: String,
        pub stay_type: StayType,
        pub nights: u32,
        /// Absent means "use the settings default"; an explicit 0 overrides it.
        pub cost_per_night: Option<f64>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SegmentUpsert {
        pub country_code: String,
        pub country_name: String,
        pub km: f64,
        pub days: Option<u32>,
        pub fuel_price_per_liter: Option<f64>,
        pub border_fees: Option<f64>,
        pub tolls_and_vignettes: Option<f64>,
        pub other_fixed_costs: Option<f64>,
        pub stays: Vec<StayUpsert>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssumptionsUpsert {
        pub daily_food_budget: Option<f64>,
        pub safety_margin_percent: Option<f64>,
        /// 0–100: 0 = ultra-budget, 100 = comfort.
        pub comfort_level: u8,
    }

    /// Whole-aggregate request body for creating or replacing a trip.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripUpsert {
        pub name: String,
        pub description: Option<String>,
        pub vehicle_id: Uuid,
        pub start_date: Option<NaiveDate>,
        pub is_round_trip: bool,
        pub assumptions: AssumptionsUpsert,
        pub segments: Vec<SegmentUpsert>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripHeaderView {
        pub id: Uuid,
        pub name: String,
        pub vehicle_id: Uuid,
        pub start_date: Option<NaiveDate>,
        pub is_round_trip: bool,
        pub has_results: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripList {
        pub trips: Vec<TripHeaderView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StayView {
        pub id: Uuid,
        pub city_or_area: String,
        pub stay_type: StayType,
        pub nights: u32,
        pub cost_per_night: Option<f64>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SegmentView {
        pub id: Uuid,
        pub country_code: String,
        pub country_name: String,
        pub km: f64,
        pub days: Option<u32>,
        pub fuel_price_per_liter: Option<f64>,
        pub border_fees: Option<f64>,
        pub tolls_and_vignettes: Option<f64>,
        pub other_fixed_costs: Option<f64>,
        pub stays: Vec<StayView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripDetail {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub vehicle_id: Uuid,
        pub start_date: Option<NaiveDate>,
        pub is_round_trip: bool,
        pub assumptions: AssumptionsUpsert,
        pub segments: Vec<SegmentView>,
        pub results: Option<super::results::TripResultsView>,
    }
}

pub mod results {
    use super::*;

    /// Itemized costs for one country, pre-margin, round-trip multiplier
    /// already applied.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct CountryResultView {
        pub country_code: String,
        pub country_name: String,
        pub km: f64,
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

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct TripResultsView {
        /// Grand total, safety margin included.
        pub total_cost: f64,
        pub total_fuel_cost: f64,
        pub total_stay_cost: f64,
        pub total_food_cost: f64,
        pub total_other_cost: f64,
        pub cost_per_day: f64,
        pub cost_per_km: f64,
        pub per_country: Vec<CountryResultView>,
    }
}

pub mod settings {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StayDefaultsView {
        pub hotel_per_night: f64,
        pub paid_camp_per_night: f64,
        pub free_camp_per_night: f64,
        pub friend_family_per_night: f64,
    }

    /// Per-user defaults; serves as both the GET response and the PUT body.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettingsView {
        pub base_currency: Currency,
        pub default_safety_margin_percent: f64,
        pub default_comfort_level: u8,
        pub default_stay_costs: StayDefaultsView,
    }
}
