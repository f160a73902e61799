//! Settings API endpoints.

use api_types::settings::{SettingsView, StayDefaultsView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

fn map_currency(currency: api_types::Currency) -> engine::Currency {
    match currency {
        api_types::Currency::Kwd => engine::Currency::Kwd,
        api_types::Currency::Sar => engine::Currency::Sar,
        api_types::Currency::Aed => engine::Currency::Aed,
        api_types::Currency::Eur => engine::Currency::Eur,
        api_types::Currency::Usd => engine::Currency::Usd,
    }
}

fn map_currency_back(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Kwd => api_types::Currency::Kwd,
        engine::Currency::Sar => api_types::Currency::Sar,
        engine::Currency::Aed => api_types::Currency::Aed,
        engine::Currency::Eur => api_types::Currency::Eur,
        engine::Currency::Usd => api_types::Currency::Usd,
    }
}

fn view(settings: engine::Settings) -> SettingsView {
    SettingsView {
        base_currency: map_currency_back(settings.base_currency),
        default_safety_margin_percent: settings.default_safety_margin_percent,
        default_comfort_level: settings.default_comfort_level,
        default_stay_costs: StayDefaultsView {
            hotel_per_night: settings.default_stay_costs.hotel_per_night,
            paid_camp_per_night: settings.default_stay_costs.paid_camp_per_night,
            free_camp_per_night: settings.default_stay_costs.free_camp_per_night,
            friend_family_per_night: settings.default_stay_costs.friend_family_per_night,
        },
    }
}

pub async fn get_own(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SettingsView>, ServerError> {
    let settings = state.engine.settings(&user.username).await?;
    Ok(Json(view(settings)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SettingsView>,
) -> Result<Json<SettingsView>, ServerError> {
    let settings = engine::Settings {
        base_currency: map_currency(payload.base_currency),
        default_safety_margin_percent: payload.default_safety_margin_percent,
        default_comfort_level: payload.default_comfort_level,
        default_stay_costs: engine::StayDefaults {
            hotel_per_night: payload.default_stay_costs.hotel_per_night,
            paid_camp_per_night: payload.default_stay_costs.paid_camp_per_night,
            free_camp_per_night: payload.default_stay_costs.free_camp_per_night,
            friend_family_per_night: payload.default_stay_costs.friend_family_per_night,
        },
    };
    state.engine.update_settings(&user.username, settings).await?;
    Ok(Json(view(state.engine.settings(&user.username).await?)))
}
