//! Trip API endpoints.
//!
//! Trips travel the wire as whole aggregates; the mapping helpers here are
//! the only place the wire shapes and the engine shapes meet.

use api_types::trip::{
    AssumptionsUpsert, SegmentView, StayView, TripCreated, TripDetail, TripHeaderView, TripList,
    TripUpsert,
};
use api_types::results::{CountryResultView, TripResultsView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_stay_type(stay_type: api_types::StayType) -> engine::StayType {
    match stay_type {
        api_types::StayType::Hotel => engine::StayType::Hotel,
        api_types::StayType::PaidCamp => engine::StayType::PaidCamp,
        api_types::StayType::FreeCamp => engine::StayType::FreeCamp,
        api_types::StayType::FriendFamily => engine::StayType::FriendFamily,
        api_types::StayType::Other => engine::StayType::Other,
    }
}

fn map_stay_type_back(stay_type: engine::StayType) -> api_types::StayType {
    match stay_type {
        engine::StayType::Hotel => api_types::StayType::Hotel,
        engine::StayType::PaidCamp => api_types::StayType::PaidCamp,
        engine::StayType::FreeCamp => api_types::StayType::FreeCamp,
        engine::StayType::FriendFamily => api_types::StayType::FriendFamily,
        engine::StayType::Other => api_types::StayType::Other,
    }
}

fn draft(payload: TripUpsert) -> engine::TripDraft {
    engine::TripDraft {
        name: payload.name,
        description: payload.description,
        vehicle_id: payload.vehicle_id,
        start_date: payload.start_date,
        is_round_trip: payload.is_round_trip,
        assumptions: engine::TripAssumptions {
            daily_food_budget: payload.assumptions.daily_food_budget,
            safety_margin_percent: payload.assumptions.safety_margin_percent,
            comfort_level: payload.assumptions.comfort_level,
        },
        segments: payload
            .segments
            .into_iter()
            .map(|segment| engine::SegmentDraft {
                country_code: segment.country_code,
                country_name: segment.country_name,
                km: segment.km,
                days: segment.days,
                fuel_price_per_liter: segment.fuel_price_per_liter,
                border_fees: segment.border_fees,
                tolls_and_vignettes: segment.tolls_and_vignettes,
                other_fixed_costs: segment.other_fixed_costs,
                stays: segment
                    .stays
                    .into_iter()
                    .map(|stay| engine::StayDraft {
                        city_or_area: stay.city_or_area,
                        stay_type: map_stay_type(stay.stay_type),
                        nights: stay.nights,
                        cost_per_night: stay.cost_per_night,
                        notes: stay.notes,
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn results_view(results: engine::TripResults) -> TripResultsView {
    TripResultsView {
        total_cost: results.total_cost,
        total_fuel_cost: results.total_fuel_cost,
        total_stay_cost: results.total_stay_cost,
        total_food_cost: results.total_food_cost,
        total_other_cost: results.total_other_cost,
        cost_per_day: results.cost_per_day,
        cost_per_km: results.cost_per_km,
        per_country: results
            .per_country
            .into_iter()
            .map(|country| CountryResultView {
                country_code: country.country_code,
                country_name: country.country_name,
                km: country.km,
                days: country.days,
                fuel_cost: country.fuel_cost,
                hotel_cost: country.hotel_cost,
                paid_camp_cost: country.paid_camp_cost,
                free_camp_cost: country.free_camp_cost,
                friend_family_cost: country.friend_family_cost,
                other_stay_cost: country.other_stay_cost,
                food_cost: country.food_cost,
                border_and_tolls: country.border_and_tolls,
                other_fixed: country.other_fixed,
                subtotal: country.subtotal,
            })
            .collect(),
    }
}

fn detail(trip: engine::Trip) -> TripDetail {
    TripDetail {
        id: trip.id,
        name: trip.name,
        description: trip.description,
        vehicle_id: trip.vehicle_id,
        start_date: trip.start_date,
        is_round_trip: trip.is_round_trip,
        assumptions: AssumptionsUpsert {
            daily_food_budget: trip.assumptions.daily_food_budget,
            safety_margin_percent: trip.assumptions.safety_margin_percent,
            comfort_level: trip.assumptions.comfort_level,
        },
        segments: trip
            .segments
            .into_iter()
            .map(|segment| SegmentView {
                id: segment.id,
                country_code: segment.country_code,
                country_name: segment.country_name,
                km: segment.km,
                days: segment.days,
                fuel_price_per_liter: segment.fuel_price_per_liter,
                border_fees: segment.border_fees,
                tolls_and_vignettes: segment.tolls_and_vignettes,
                other_fixed_costs: segment.other_fixed_costs,
                stays: segment
                    .stays
                    .into_iter()
                    .map(|stay| StayView {
                        id: stay.id,
                        city_or_area: stay.city_or_area,
                        stay_type: map_stay_type_back(stay.stay_type),
                        nights: stay.nights,
                        cost_per_night: stay.cost_per_night,
                        notes: stay.notes,
                    })
                    .collect(),
            })
            .collect(),
        results: trip.results.map(results_view),
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TripUpsert>,
) -> Result<(StatusCode, Json<TripCreated>), ServerError> {
    let id = state.engine.new_trip(&user.username, draft(payload)).await?;
    Ok((StatusCode::CREATED, Json(TripCreated { id })))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<TripList>, ServerError> {
    let headers = state.engine.trips(&user.username).await?;
    Ok(Json(TripList {
        trips: headers
            .into_iter()
            .map(|header| TripHeaderView {
                id: header.id,
                name: header.name,
                vehicle_id: header.vehicle_id,
                start_date: header.start_date,
                is_round_trip: header.is_round_trip,
                has_results: header.has_results,
            })
            .collect(),
    }))
}

pub async fn get_one(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetail>, ServerError> {
    let trip = state.engine.trip(id, &user.username).await?;
    Ok(Json(detail(trip)))
}

pub async fn replace(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TripUpsert>,
) -> Result<Json<TripDetail>, ServerError> {
    state
        .engine
        .replace_trip(id, &user.username, draft(payload))
        .await?;
    let trip = state.engine.trip(id, &user.username).await?;
    Ok(Json(detail(trip)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_trip(id, &user.username).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn calculate(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResultsView>, ServerError> {
    let results = state.engine.calculate_trip(id, &user.username).await?;
    Ok(Json(results_view(results)))
}
