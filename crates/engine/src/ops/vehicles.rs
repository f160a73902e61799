//! Vehicle CRUD operations.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, trips,
    vehicles::{self, FuelUnit, Vehicle},
};

use super::{Engine, with_tx};

impl Engine {
    /// Add a new vehicle for a user.
    #[allow(clippy::too_many_arguments)]
    pub async fn new_vehicle(
        &self,
        user_id: &str,
        name: &str,
        fuel_type: &str,
        fuel_unit: FuelUnit,
        consumption: f64,
        tank_size_liters: Option<f64>,
        notes: Option<&str>,
    ) -> ResultEngine<Uuid> {
        let vehicle = Vehicle::new(
            name.to_string(),
            fuel_type.to_string(),
            fuel_unit,
            consumption,
            tank_size_liters,
            notes.map(|s| s.to_string()),
        )?;

        let mut model = vehicles::ActiveModel::from(&vehicle);
        model.user_id = ActiveValue::Set(user_id.to_string());
        model.insert(&self.database).await?;

        Ok(vehicle.id)
    }

    /// Lists a user's vehicles, by name.
    pub async fn vehicles(&self, user_id: &str) -> ResultEngine<Vec<Vehicle>> {
        let models = vehicles::Entity::find()
            .filter(vehicles::Column::UserId.eq(user_id))
            .order_by_asc(vehicles::Column::Name)
            .all(&self.database)
            .await?;

        models.into_iter().map(Vehicle::try_from).collect()
    }

    /// Return a [`Vehicle`].
    pub async fn vehicle(&self, vehicle_id: Uuid, user_id: &str) -> ResultEngine<Vehicle> {
        let model = self.require_vehicle(vehicle_id, user_id).await?;
        Vehicle::try_from(model)
    }

    /// Replaces every field of an existing vehicle.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_vehicle(
        &self,
        vehicle_id: Uuid,
        user_id: &str,
        name: &str,
        fuel_type: &str,
        fuel_unit: FuelUnit,
        consumption: f64,
        tank_size_liters: Option<f64>,
        notes: Option<&str>,
    ) -> ResultEngine<Vehicle> {
        // Reuse the constructor validation, then overwrite the generated id.
        let mut vehicle = Vehicle::new(
            name.to_string(),
            fuel_type.to_string(),
            fuel_unit,
            consumption,
            tank_size_liters,
            notes.map(|s| s.to_string()),
        )?;
        vehicle.id = vehicle_id;

        self.require_vehicle(vehicle_id, user_id).await?;

        let mut model = vehicles::ActiveModel::from(&vehicle);
        model.user_id = ActiveValue::Set(user_id.to_string());
        model.update(&self.database).await?;

        Ok(vehicle)
    }

    /// Delete a vehicle. Refused while any trip still references it.
    pub async fn delete_vehicle(&self, vehicle_id: Uuid, user_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = vehicles::Entity::find_by_id(vehicle_id.to_string())
                .filter(vehicles::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("vehicle not exists".to_string()))?;

            let referencing = trips::Entity::find()
                .filter(trips::Column::VehicleId.eq(vehicle_id.to_string()))
                .count(&db_tx)
                .await?;
            if referencing > 0 {
                return Err(EngineError::VehicleInUse(format!(
                    "{} is referenced by {referencing} trip(s)",
                    model.name
                )));
            }

            vehicles::ActiveModel::from(model).delete(&db_tx).await?;
            Ok(())
        })
    }

    pub(crate) async fn require_vehicle(
        &self,
        vehicle_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<vehicles::Model> {
        vehicles::Entity::find_by_id(vehicle_id.to_string())
            .filter(vehicles::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("vehicle not exists".to_string()))
    }
}
