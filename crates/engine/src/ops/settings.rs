//! Per-user settings operations.

use sea_orm::{ActiveValue, prelude::*};

use crate::{ResultEngine, settings::{self, Settings}};

use super::Engine;

impl Engine {
    /// Return a user's settings, creating the built-in defaults on first
    /// access.
    pub async fn settings(&self, user_id: &str) -> ResultEngine<Settings> {
        if let Some(model) = settings::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
        {
            return Settings::try_from(model);
        }

        let defaults = Settings::default();
        let mut model = settings::ActiveModel::from(&defaults);
        model.user_id = ActiveValue::Set(user_id.to_string());
        model.insert(&self.database).await?;
        Ok(defaults)
    }

    /// Replaces a user's settings. Rejects non-finite or negative defaults.
    pub async fn update_settings(&self, user_id: &str, new: Settings) -> ResultEngine<()> {
        new.validate()?;

        let mut model = settings::ActiveModel::from(&new);
        model.user_id = ActiveValue::Set(user_id.to_string());

        let exists = settings::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .is_some();
        if exists {
            model.update(&self.database).await?;
        } else {
            model.insert(&self.database).await?;
        }
        Ok(())
    }
}
