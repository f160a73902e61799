//! Per-user global settings.
//!
//! Settings hold the defaults the calculator falls back to: the safety margin
//! when a trip does not override it, and the per-night cost table used for
//! stays with no explicit nightly cost. The `other` stay type has no
//! configurable default and always costs 0 per night.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine, stays::StayType};

/// Default per-night costs keyed by stay type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StayDefaults {
    pub hotel_per_night: f64,
    pub paid_camp_per_night: f64,
    pub free_camp_per_night: f64,
    pub friend_family_per_night: f64,
}

impl StayDefaults {
    /// Default nightly cost for a stay type. `Other` is always 0.
    pub fn for_stay_type(&self, stay_type: StayType) -> f64 {
        match stay_type {
            StayType::Hotel => self.hotel_per_night,
            StayType::PaidCamp => self.paid_camp_per_night,
            StayType::FreeCamp => self.free_camp_per_night,
            StayType::FriendFamily => self.friend_family_per_night,
            StayType::Other => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub base_currency: Currency,
    pub default_safety_margin_percent: f64,
    /// 0–100: 0 = ultra-budget, 100 = comfort. Carried for future use.
    pub default_comfort_level: u8,
    pub default_stay_costs: StayDefaults,
}

impl Settings {
    pub fn validate(&self) -> ResultEngine<()> {
        let defaults = &self.default_stay_costs;
        let fields = [
            ("default safety margin", self.default_safety_margin_percent),
            ("hotel per night", defaults.hotel_per_night),
            ("paid camp per night", defaults.paid_camp_per_night),
            ("free camp per night", defaults.free_camp_per_night),
            ("friend/family per night", defaults.friend_family_per_night),
        ];
        for (label, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngineError::InvalidQuantity(format!(
                    "{label} must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Settings {
    /// Built-in defaults used when a user has no settings row yet.
    fn default() -> Self {
        Self {
            base_currency: Currency::Kwd,
            default_safety_margin_percent: 15.0,
            default_comfort_level: 50,
            default_stay_costs: StayDefaults {
                hotel_per_night: 25.0,
                paid_camp_per_night: 10.0,
                free_camp_per_night: 0.0,
                friend_family_per_night: 0.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub base_currency: String,
    pub default_safety_margin_percent: f64,
    pub default_comfort_level: i32,
    pub hotel_per_night: f64,
    pub paid_camp_per_night: f64,
    pub free_camp_per_night: f64,
    pub friend_family_per_night: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Settings> for ActiveModel {
    fn from(settings: &Settings) -> Self {
        Self {
            user_id: ActiveValue::NotSet,
            base_currency: ActiveValue::Set(settings.base_currency.code().to_string()),
            default_safety_margin_percent: ActiveValue::Set(
                settings.default_safety_margin_percent,
            ),
            default_comfort_level: ActiveValue::Set(i32::from(settings.default_comfort_level)),
            hotel_per_night: ActiveValue::Set(settings.default_stay_costs.hotel_per_night),
            paid_camp_per_night: ActiveValue::Set(settings.default_stay_costs.paid_camp_per_night),
            free_camp_per_night: ActiveValue::Set(settings.default_stay_costs.free_camp_per_night),
            friend_family_per_night: ActiveValue::Set(
                settings.default_stay_costs.friend_family_per_night,
            ),
        }
    }
}

impl TryFrom<Model> for Settings {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            base_currency: Currency::try_from(model.base_currency.as_str()).unwrap_or_default(),
            default_safety_margin_percent: model.default_safety_margin_percent,
            default_comfort_level: u8::try_from(model.default_comfort_level).unwrap_or(50),
            default_stay_costs: StayDefaults {
                hotel_per_night: model.hotel_per_night,
                paid_camp_per_night: model.paid_camp_per_night,
                free_camp_per_night: model.free_camp_per_night,
                friend_family_per_night: model.friend_family_per_night,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_stay_type_default_is_always_zero() {
        let mut settings = Settings::default();
        settings.default_stay_costs.hotel_per_night = 99.0;
        assert_eq!(settings.default_stay_costs.for_stay_type(StayType::Other), 0.0);
    }

    #[test]
    fn negative_default_rejected() {
        let mut settings = Settings::default();
        settings.default_stay_costs.paid_camp_per_night = -1.0;
        assert!(matches!(
            settings.validate(),
            Err(EngineError::InvalidQuantity(_))
        ));
    }
}
