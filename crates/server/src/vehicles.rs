//! Vehicle API endpoints

use api_types::vehicle::{VehicleCreated, VehicleList, VehicleUpsert, VehicleView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_fuel_unit(unit: api_types::FuelUnit) -> engine::FuelUnit {
    match unit {
        api_types::FuelUnit::LitersPer100Km => engine::FuelUnit::LitersPer100Km,
        api_types::FuelUnit::KmPerLiter => engine::FuelUnit::KmPerLiter,
    }
}

fn map_fuel_unit_back(unit: engine::FuelUnit) -> api_types::FuelUnit {
    match unit {
        engine::FuelUnit::LitersPer100Km => api_types::FuelUnit::LitersPer100Km,
        engine::FuelUnit::KmPerLiter => api_types::FuelUnit::KmPerLiter,
    }
}

fn view(vehicle: engine::Vehicle) -> VehicleView {
    VehicleView {
        id: vehicle.id,
        name: vehicle.name,
        fuel_type: vehicle.fuel_type,
        fuel_unit: map_fuel_unit_back(vehicle.fuel_unit),
        consumption: vehicle.consumption,
        tank_size_liters: vehicle.tank_size_liters,
        notes: vehicle.notes,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<VehicleUpsert>,
) -> Result<(StatusCode, Json<VehicleCreated>), ServerError> {
    let id = state
        .engine
        .new_vehicle(
            &user.username,
            &payload.name,
            &payload.fuel_type,
            map_fuel_unit(payload.fuel_unit),
            payload.consumption,
            payload.tank_size_liters,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(VehicleCreated { id })))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<VehicleList>, ServerError> {
    let vehicles = state.engine.vehicles(&user.username).await?;
    Ok(Json(VehicleList {
        vehicles: vehicles.into_iter().map(view).collect(),
    }))
}

pub async fn get_one(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleView>, ServerError> {
    let vehicle = state.engine.vehicle(id, &user.username).await?;
    Ok(Json(view(vehicle)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VehicleUpsert>,
) -> Result<Json<VehicleView>, ServerError> {
    let vehicle = state
        .engine
        .update_vehicle(
            id,
            &user.username,
            &payload.name,
            &payload.fuel_type,
            map_fuel_unit(payload.fuel_unit),
            payload.consumption,
            payload.tank_size_liters,
            payload.notes.as_deref(),
        )
        .await?;

    Ok(Json(view(vehicle)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_vehicle(id, &user.username).await?;
    Ok(StatusCode::NO_CONTENT)
}
