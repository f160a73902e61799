//! Stay primitives.
//!
//! A `Stay` is one lodging instance inside a country segment. When no
//! explicit nightly cost is given, the calculator substitutes the per-type
//! default from the user's settings (`other` always defaults to 0).

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Accommodation category of a stay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayType {
    Hotel,
    PaidCamp,
    FreeCamp,
    FriendFamily,
    Other,
}

impl StayType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::PaidCamp => "paid_camp",
            Self::FreeCamp => "free_camp",
            Self::FriendFamily => "friend_family",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for StayType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "hotel" => Ok(Self::Hotel),
            "paid_camp" => Ok(Self::PaidCamp),
            "free_camp" => Ok(Self::FreeCamp),
            "friend_family" => Ok(Self::FriendFamily),
            "other" => Ok(Self::Other),
            other => Err(EngineError::InvalidQuantity(format!(
                "invalid stay type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stay {
    pub id: Uuid,
    pub city_or_area: String,
    pub stay_type: StayType,
    pub nights: u32,
    /// Explicit nightly cost. `None` means "use the settings default for this
    /// stay type"; an explicit 0 overrides the default.
    pub cost_per_night: Option<f64>,
    pub notes: Option<String>,
}

impl Stay {
    pub fn new(
        city_or_area: String,
        stay_type: StayType,
        nights: u32,
        cost_per_night: Option<f64>,
        notes: Option<String>,
    ) -> ResultEngine<Self> {
        if let Some(cost) = cost_per_night
            && !(cost.is_finite() && cost >= 0.0)
        {
            return Err(EngineError::InvalidQuantity(format!(
                "cost per night must be >= 0, got {cost}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            city_or_area,
            stay_type,
            nights,
            cost_per_night,
            notes,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stays")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub segment_id: String,
    pub position: i32,
    pub city_or_area: String,
    pub stay_type: String,
    pub nights: i32,
    pub cost_per_night: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::segments::Entity",
        from = "Column::SegmentId",
        to = "super::segments::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Segments,
}

impl Related<super::segments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Segments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Stay> for ActiveModel {
    fn from(stay: &Stay) -> Self {
        Self {
            id: ActiveValue::Set(stay.id.to_string()),
            segment_id: ActiveValue::NotSet,
            position: ActiveValue::NotSet,
            city_or_area: ActiveValue::Set(stay.city_or_area.clone()),
            stay_type: ActiveValue::Set(stay.stay_type.as_str().to_string()),
            nights: ActiveValue::Set(i32::try_from(stay.nights).unwrap_or(i32::MAX)),
            cost_per_night: ActiveValue::Set(stay.cost_per_night),
            notes: ActiveValue::Set(stay.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Stay {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("stay not exists".to_string()))?,
            city_or_area: model.city_or_area,
            stay_type: StayType::try_from(model.stay_type.as_str())?,
            nights: u32::try_from(model.nights).map_err(|_| {
                EngineError::InvalidQuantity(format!("negative nights: {}", model.nights))
            })?,
            cost_per_night: model.cost_per_night,
            notes: model.notes,
        })
    }
}
