//! The calculate operation: glue between storage and the pure calculator.

use sea_orm::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, costing, results::TripResults, trips, vehicles::Vehicle,
};

use super::Engine;

impl Engine {
    /// Computes the cost breakdown for a stored trip and persists the
    /// snapshot on the trip row.
    ///
    /// The calculator is pure; this method only materializes its inputs
    /// (trip aggregate, resolved vehicle, user settings) and stores its
    /// output. A calculation failure leaves the previous snapshot untouched.
    pub async fn calculate_trip(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<TripResults> {
        let trip = self.trip(trip_id, user_id).await?;
        let vehicle: Vehicle = self.vehicle(trip.vehicle_id, user_id).await?;
        let settings = self.settings(user_id).await?;

        let results = costing::calculate(&trip, &vehicle, &settings)?;

        let snapshot = serde_json::to_string(&results)
            .map_err(|err| EngineError::InvalidQuantity(format!("unserializable results: {err}")))?;
        let model = trips::ActiveModel {
            id: ActiveValue::Set(trip_id.to_string()),
            results: ActiveValue::Set(Some(snapshot)),
            ..Default::default()
        };
        model.update(&self.database).await?;

        Ok(results)
    }
}
