//! Country segment primitives.
//!
//! A `CountrySegment` is one leg of the route: a country, a distance, and the
//! country-local cost parameters. A segment with zero stays still contributes
//! fuel and fixed costs.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, stays::Stay};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountrySegment {
    pub id: Uuid,
    /// ISO code like "KW", "SA", "OM".
    pub country_code: String,
    pub country_name: String,
    /// Km driven in this country, one-way.
    pub km: f64,
    pub days: Option<u32>,
    pub fuel_price_per_liter: Option<f64>,
    pub border_fees: Option<f64>,
    pub tolls_and_vignettes: Option<f64>,
    pub other_fixed_costs: Option<f64>,
    pub stays: Vec<Stay>,
}

impl CountrySegment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        country_code: String,
        country_name: String,
        km: f64,
        days: Option<u32>,
        fuel_price_per_liter: Option<f64>,
        border_fees: Option<f64>,
        tolls_and_vignettes: Option<f64>,
        other_fixed_costs: Option<f64>,
        stays: Vec<Stay>,
    ) -> ResultEngine<Self> {
        let segment = Self {
            id: Uuid::new_v4(),
            country_code,
            country_name,
            km,
            days,
            fuel_price_per_liter,
            border_fees,
            tolls_and_vignettes,
            other_fixed_costs,
            stays,
        };
        segment.validate()?;
        Ok(segment)
    }

    /// Checks every numeric field is finite and non-negative. Optional fields
    /// may be absent (the calculator treats absent as 0) but may not hold
    /// garbage.
    pub fn validate(&self) -> ResultEngine<()> {
        non_negative("km", Some(self.km), &self.country_code)?;
        non_negative(
            "fuel price per liter",
            self.fuel_price_per_liter,
            &self.country_code,
        )?;
        non_negative("border fees", self.border_fees, &self.country_code)?;
        non_negative(
            "tolls and vignettes",
            self.tolls_and_vignettes,
            &self.country_code,
        )?;
        non_negative(
            "other fixed costs",
            self.other_fixed_costs,
            &self.country_code,
        )?;
        for stay in &self.stays {
            non_negative("cost per night", stay.cost_per_night, &self.country_code)?;
        }
        Ok(())
    }
}

fn non_negative(label: &str, value: Option<f64>, country: &str) -> ResultEngine<()> {
    match value {
        Some(v) if !(v.is_finite() && v >= 0.0) => Err(EngineError::InvalidQuantity(format!(
            "{label} must be >= 0 in segment {country}, got {v}"
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "segments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub trip_id: String,
    pub position: i32,
    pub country_code: String,
    pub country_name: String,
    pub km: f64,
    pub days: Option<i32>,
    pub fuel_price_per_liter: Option<f64>,
    pub border_fees: Option<f64>,
    pub tolls_and_vignettes: Option<f64>,
    pub other_fixed_costs: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stays::Entity")]
    Stays,
    #[sea_orm(
        belongs_to = "super::trips::Entity",
        from = "Column::TripId",
        to = "super::trips::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Trips,
}

impl Related<super::stays::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stays.def()
    }
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CountrySegment> for ActiveModel {
    fn from(segment: &CountrySegment) -> Self {
        Self {
            id: ActiveValue::Set(segment.id.to_string()),
            trip_id: ActiveValue::NotSet,
            position: ActiveValue::NotSet,
            country_code: ActiveValue::Set(segment.country_code.clone()),
            country_name: ActiveValue::Set(segment.country_name.clone()),
            km: ActiveValue::Set(segment.km),
            days: ActiveValue::Set(segment.days.map(|d| i32::try_from(d).unwrap_or(i32::MAX))),
            fuel_price_per_liter: ActiveValue::Set(segment.fuel_price_per_liter),
            border_fees: ActiveValue::Set(segment.border_fees),
            tolls_and_vignettes: ActiveValue::Set(segment.tolls_and_vignettes),
            other_fixed_costs: ActiveValue::Set(segment.other_fixed_costs),
        }
    }
}

impl TryFrom<Model> for CountrySegment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let days = match model.days {
            Some(d) => Some(u32::try_from(d).map_err(|_| {
                EngineError::InvalidQuantity(format!("negative days: {d}"))
            })?),
            None => None,
        };
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("segment not exists".to_string()))?,
            country_code: model.country_code,
            country_name: model.country_name,
            km: model.km,
            days,
            fuel_price_per_liter: model.fuel_price_per_liter,
            border_fees: model.border_fees,
            tolls_and_vignettes: model.tolls_and_vignettes,
            other_fixed_costs: model.other_fixed_costs,
            stays: Vec::new(),
        })
    }
}
