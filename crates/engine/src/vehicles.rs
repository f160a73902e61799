//! Vehicle primitives.
//!
//! A `Vehicle` carries the fuel-consumption profile the calculator normalizes
//! to liters-per-100km. Consumption is validated at construction so the
//! `km_per_liter` normalization (`100 / consumption`) can never divide by
//! zero downstream.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Unit the vehicle's consumption figure is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelUnit {
    #[serde(rename = "liters_per_100km")]
    LitersPer100Km,
    #[serde(rename = "km_per_liter")]
    KmPerLiter,
}

impl FuelUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LitersPer100Km => "liters_per_100km",
            Self::KmPerLiter => "km_per_liter",
        }
    }
}

impl TryFrom<&str> for FuelUnit {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "liters_per_100km" => Ok(Self::LitersPer100Km),
            "km_per_liter" => Ok(Self::KmPerLiter),
            other => Err(EngineError::InvalidVehicle(format!(
                "invalid fuel unit: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    /// Free text, e.g. "95", "98", "diesel".
    pub fuel_type: String,
    pub fuel_unit: FuelUnit,
    /// Average consumption in `fuel_unit`. Always > 0 and finite.
    pub consumption: f64,
    pub tank_size_liters: Option<f64>,
    pub notes: Option<String>,
}

impl Vehicle {
    pub fn new(
        name: String,
        fuel_type: String,
        fuel_unit: FuelUnit,
        consumption: f64,
        tank_size_liters: Option<f64>,
        notes: Option<String>,
    ) -> ResultEngine<Self> {
        validate_consumption(consumption)?;
        if let Some(tank) = tank_size_liters
            && !(tank.is_finite() && tank > 0.0)
        {
            return Err(EngineError::InvalidVehicle(
                "tank size must be > 0 liters".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            fuel_type,
            fuel_unit,
            consumption,
            tank_size_liters,
            notes,
        })
    }

    /// Consumption normalized to liters-per-100km, the canonical form used by
    /// all segment fuel math.
    pub fn consumption_l_per_100km(&self) -> f64 {
        match self.fuel_unit {
            FuelUnit::LitersPer100Km => self.consumption,
            FuelUnit::KmPerLiter => 100.0 / self.consumption,
        }
    }
}

pub(crate) fn validate_consumption(consumption: f64) -> ResultEngine<()> {
    if !(consumption.is_finite() && consumption > 0.0) {
        return Err(EngineError::InvalidVehicle(format!(
            "consumption must be > 0, got {consumption}"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub fuel_type: String,
    pub fuel_unit: String,
    pub consumption: f64,
    pub tank_size_liters: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trips::Entity")]
    Trips,
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Vehicle> for ActiveModel {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: ActiveValue::Set(vehicle.id.to_string()),
            user_id: ActiveValue::NotSet,
            name: ActiveValue::Set(vehicle.name.clone()),
            fuel_type: ActiveValue::Set(vehicle.fuel_type.clone()),
            fuel_unit: ActiveValue::Set(vehicle.fuel_unit.as_str().to_string()),
            consumption: ActiveValue::Set(vehicle.consumption),
            tank_size_liters: ActiveValue::Set(vehicle.tank_size_liters),
            notes: ActiveValue::Set(vehicle.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Vehicle {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("vehicle not exists".to_string()))?,
            name: model.name,
            fuel_type: model.fuel_type,
            fuel_unit: FuelUnit::try_from(model.fuel_unit.as_str())?,
            consumption: model.consumption,
            tank_size_liters: model.tank_size_liters,
            notes: model.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outback(unit: FuelUnit, consumption: f64) -> Vehicle {
        Vehicle::new(
            "Subaru Outback".to_string(),
            "95".to_string(),
            unit,
            consumption,
            Some(63.0),
            None,
        )
        .unwrap()
    }

    #[test]
    fn l_per_100km_passes_through() {
        let vehicle = outback(FuelUnit::LitersPer100Km, 8.0);
        assert_eq!(vehicle.consumption_l_per_100km(), 8.0);
    }

    #[test]
    fn km_per_liter_inverts() {
        let vehicle = outback(FuelUnit::KmPerLiter, 12.5);
        assert_eq!(vehicle.consumption_l_per_100km(), 8.0);
    }

    #[test]
    fn zero_consumption_rejected() {
        let err = Vehicle::new(
            "Broken".to_string(),
            "diesel".to_string(),
            FuelUnit::KmPerLiter,
            0.0,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidVehicle(_)));
    }

    #[test]
    fn non_finite_consumption_rejected() {
        for bad in [f64::NAN, f64::INFINITY, -3.0] {
            assert!(
                Vehicle::new(
                    "Broken".to_string(),
                    "diesel".to_string(),
                    FuelUnit::LitersPer100Km,
                    bad,
                    None,
                    None,
                )
                .is_err()
            );
        }
    }
}
