//! Trip CRUD operations.
//!
//! Trips are stored as one row plus ordered `segments` and `stays` child
//! rows; create/replace writes the whole aggregate inside one DB transaction.

use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseTransaction, QueryFilter, QueryOrder, Statement,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, segments, stays,
    trips::{self, Trip, TripDraft, TripHeader},
};

use super::{Engine, with_tx};

impl Engine {
    /// Add a new trip for a user. The draft is validated before anything is
    /// written.
    pub async fn new_trip(&self, user_id: &str, draft: TripDraft) -> ResultEngine<Uuid> {
        self.require_vehicle(draft.vehicle_id, user_id).await?;
        let trip = draft.into_trip()?;
        let trip_id = trip.id;

        with_tx!(self, |db_tx| {
            let mut trip_model = trips::ActiveModel::from(&trip);
            trip_model.user_id = ActiveValue::Set(user_id.to_string());
            trip_model.insert(&db_tx).await?;

            insert_route(&db_tx, &trip).await?;
            Ok::<(), EngineError>(())
        })?;

        Ok(trip_id)
    }

    /// Lists a user's trips as headers, newest first.
    pub async fn trips(&self, user_id: &str) -> ResultEngine<Vec<TripHeader>> {
        let models = trips::Entity::find()
            .filter(trips::Column::UserId.eq(user_id))
            .order_by_desc(trips::Column::StartDate)
            .order_by_asc(trips::Column::Name)
            .all(&self.database)
            .await?;

        models.iter().map(TripHeader::try_from).collect()
    }

    /// Return a full trip aggregate, segments and stays in stored order.
    pub async fn trip(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<Trip> {
        let trip_model = self.require_trip(trip_id, user_id).await?;
        let mut trip = Trip::try_from(trip_model)?;

        let segment_models = segments::Entity::find()
            .filter(segments::Column::TripId.eq(trip_id.to_string()))
            .order_by_asc(segments::Column::Position)
            .all(&self.database)
            .await?;

        for segment_model in segment_models {
            let segment_id = segment_model.id.clone();
            let mut segment = crate::segments::CountrySegment::try_from(segment_model)?;

            let stay_models = stays::Entity::find()
                .filter(stays::Column::SegmentId.eq(segment_id))
                .order_by_asc(stays::Column::Position)
                .all(&self.database)
                .await?;
            segment.stays = stay_models
                .into_iter()
                .map(crate::stays::Stay::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            trip.segments.push(segment);
        }

        Ok(trip)
    }

    /// Replaces the whole trip aggregate, keeping the stored results snapshot
    /// (it goes stale until the next calculate).
    pub async fn replace_trip(
        &self,
        trip_id: Uuid,
        user_id: &str,
        draft: TripDraft,
    ) -> ResultEngine<()> {
        self.require_vehicle(draft.vehicle_id, user_id).await?;
        let existing = self.require_trip(trip_id, user_id).await?;
        let mut trip = draft.into_trip()?;
        trip.id = trip_id;

        with_tx!(self, |db_tx| {
            delete_route(&db_tx, trip_id).await?;

            let mut trip_model = trips::ActiveModel::from(&trip);
            trip_model.user_id = ActiveValue::Set(user_id.to_string());
            trip_model.results = ActiveValue::Set(existing.results.clone());
            trip_model.update(&db_tx).await?;

            insert_route(&db_tx, &trip).await?;
            Ok(())
        })
    }

    /// Delete a trip and its whole route.
    pub async fn delete_trip(&self, trip_id: Uuid, user_id: &str) -> ResultEngine<()> {
        let model = self.require_trip(trip_id, user_id).await?;

        with_tx!(self, |db_tx| {
            delete_route(&db_tx, trip_id).await?;
            trips::ActiveModel::from(model).delete(&db_tx).await?;
            Ok(())
        })
    }

    pub(crate) async fn require_trip(
        &self,
        trip_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<trips::Model> {
        trips::Entity::find_by_id(trip_id.to_string())
            .filter(trips::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("trip not exists".to_string()))
    }
}

async fn insert_route(db_tx: &DatabaseTransaction, trip: &Trip) -> ResultEngine<()> {
    for (position, segment) in trip.segments.iter().enumerate() {
        let mut segment_model = segments::ActiveModel::from(segment);
        segment_model.trip_id = ActiveValue::Set(trip.id.to_string());
        segment_model.position = ActiveValue::Set(position as i32);
        segment_model.insert(db_tx).await?;

        for (stay_position, stay) in segment.stays.iter().enumerate() {
            let mut stay_model = stays::ActiveModel::from(stay);
            stay_model.segment_id = ActiveValue::Set(segment.id.to_string());
            stay_model.position = ActiveValue::Set(stay_position as i32);
            stay_model.insert(db_tx).await?;
        }
    }
    Ok(())
}

/// Deletes a trip's segments and stays. FKs don't declare ON DELETE CASCADE,
/// so the cascade is explicit, within the caller's DB transaction.
async fn delete_route(db_tx: &DatabaseTransaction, trip_id: Uuid) -> ResultEngine<()> {
    let backend = db_tx.get_database_backend();

    db_tx
        .execute(Statement::from_sql_and_values(
            backend,
            "DELETE FROM stays WHERE segment_id IN (SELECT id FROM segments WHERE trip_id = ?);",
            vec![trip_id.to_string().into()],
        ))
        .await?;

    db_tx
        .execute(Statement::from_sql_and_values(
            backend,
            "DELETE FROM segments WHERE trip_id = ?;",
            vec![trip_id.to_string().into()],
        ))
        .await?;

    Ok(())
}
