//! Trip primitives.
//!
//! A `Trip` is the aggregate root: an ordered route of country segments plus
//! the budgeting assumptions. The optional `results` snapshot is managed by
//! the engine CRUD layer; the calculator neither reads nor writes it.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, results::TripResults, segments::CountrySegment};

/// Per-trip overrides of the global defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TripAssumptions {
    /// Trip-wide daily food budget. Falls back to the engine constant (15.0)
    /// when unset.
    pub daily_food_budget: Option<f64>,
    /// Falls back to the settings default when unset.
    pub safety_margin_percent: Option<f64>,
    /// 0–100. Carried for future use, unused by the calculation.
    pub comfort_level: u8,
}

impl TripAssumptions {
    pub fn validate(&self) -> ResultEngine<()> {
        if let Some(budget) = self.daily_food_budget
            && !(budget.is_finite() && budget >= 0.0)
        {
            return Err(EngineError::InvalidQuantity(format!(
                "daily food budget must be >= 0, got {budget}"
            )));
        }
        if let Some(margin) = self.safety_margin_percent
            && !(margin.is_finite() && margin >= 0.0)
        {
            return Err(EngineError::InvalidQuantity(format!(
                "safety margin percent must be >= 0, got {margin}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub vehicle_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub is_round_trip: bool,
    pub segments: Vec<CountrySegment>,
    pub assumptions: TripAssumptions,
    /// Latest computed snapshot, absent until calculated.
    pub results: Option<TripResults>,
}

/// List view of a trip, without the segment aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripHeader {
    pub id: Uuid,
    pub name: String,
    pub vehicle_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub is_round_trip: bool,
    pub has_results: bool,
}

/// Input for creating or replacing a whole trip aggregate.
///
/// Clients send the full nested document; the engine generates fresh ids and
/// validates every numeric field on conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub name: String,
    pub description: Option<String>,
    pub vehicle_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub is_round_trip: bool,
    pub assumptions: TripAssumptions,
    pub segments: Vec<SegmentDraft>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentDraft {
    pub country_code: String,
    pub country_name: String,
    pub km: f64,
    pub days: Option<u32>,
    pub fuel_price_per_liter: Option<f64>,
    pub border_fees: Option<f64>,
    pub tolls_and_vignettes: Option<f64>,
    pub other_fixed_costs: Option<f64>,
    pub stays: Vec<StayDraft>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StayDraft {
    pub city_or_area: String,
    pub stay_type: crate::stays::StayType,
    pub nights: u32,
    pub cost_per_night: Option<f64>,
    pub notes: Option<String>,
}

impl TripDraft {
    /// Materializes the draft into a validated [`Trip`] with fresh ids.
    pub fn into_trip(self) -> ResultEngine<Trip> {
        self.assumptions.validate()?;

        let mut segments = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            let mut stays = Vec::with_capacity(segment.stays.len());
            for stay in segment.stays {
                stays.push(crate::stays::Stay::new(
                    stay.city_or_area,
                    stay.stay_type,
                    stay.nights,
                    stay.cost_per_night,
                    stay.notes,
                )?);
            }
            segments.push(CountrySegment::new(
                segment.country_code,
                segment.country_name,
                segment.km,
                segment.days,
                segment.fuel_price_per_liter,
                segment.border_fees,
                segment.tolls_and_vignettes,
                segment.other_fixed_costs,
                stays,
            )?);
        }

        Ok(Trip {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            vehicle_id: self.vehicle_id,
            start_date: self.start_date,
            is_round_trip: self.is_round_trip,
            segments,
            assumptions: self.assumptions,
            results: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub vehicle_id: String,
    pub start_date: Option<Date>,
    pub is_round_trip: bool,
    pub daily_food_budget: Option<f64>,
    pub safety_margin_percent: Option<f64>,
    pub comfort_level: i32,
    /// JSON-serialized [`TripResults`] snapshot.
    pub results: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::segments::Entity")]
    Segments,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Vehicles,
}

impl Related<super::segments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Segments.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Trip> for ActiveModel {
    fn from(trip: &Trip) -> Self {
        Self {
            id: ActiveValue::Set(trip.id.to_string()),
            user_id: ActiveValue::NotSet,
            name: ActiveValue::Set(trip.name.clone()),
            description: ActiveValue::Set(trip.description.clone()),
            vehicle_id: ActiveValue::Set(trip.vehicle_id.to_string()),
            start_date: ActiveValue::Set(trip.start_date),
            is_round_trip: ActiveValue::Set(trip.is_round_trip),
            daily_food_budget: ActiveValue::Set(trip.assumptions.daily_food_budget),
            safety_margin_percent: ActiveValue::Set(trip.assumptions.safety_margin_percent),
            comfort_level: ActiveValue::Set(i32::from(trip.assumptions.comfort_level)),
            results: ActiveValue::Set(None),
        }
    }
}

impl TryFrom<Model> for Trip {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let results = match model.results {
            Some(json) => Some(serde_json::from_str(&json).map_err(|err| {
                EngineError::InvalidQuantity(format!("corrupt results snapshot: {err}"))
            })?),
            None => None,
        };
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
            name: model.name,
            description: model.description,
            vehicle_id: Uuid::parse_str(&model.vehicle_id)
                .map_err(|_| EngineError::KeyNotFound("vehicle not exists".to_string()))?,
            start_date: model.start_date,
            is_round_trip: model.is_round_trip,
            segments: Vec::new(),
            assumptions: TripAssumptions {
                daily_food_budget: model.daily_food_budget,
                safety_margin_percent: model.safety_margin_percent,
                comfort_level: u8::try_from(model.comfort_level).unwrap_or(50),
            },
            results,
        })
    }
}

impl TryFrom<&Model> for TripHeader {
    type Error = EngineError;

    fn try_from(model: &Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("trip not exists".to_string()))?,
            name: model.name.clone(),
            vehicle_id: Uuid::parse_str(&model.vehicle_id)
                .map_err(|_| EngineError::KeyNotFound("vehicle not exists".to_string()))?,
            start_date: model.start_date,
            is_round_trip: model.is_round_trip,
            has_results: model.results.is_some(),
        })
    }
}
