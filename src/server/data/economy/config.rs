use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::server::{
    error::{internal::InternalError, store::StoreError},
    model::economy::config::{EconomyConfig, EconomyConfigPatch},
    util::parse::parse_u64_from_string,
};

pub struct EconomyConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EconomyConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the stored configuration of a guild.
    ///
    /// The stored blob is read as a partial configuration and merged over the
    /// defaults, so fields missing from older rows take their default value.
    ///
    /// # Returns
    /// - `Ok(Some(EconomyConfig))` - Guild has a stored configuration
    /// - `Ok(None)` - Guild never saved a configuration
    /// - `Err(StoreError::Corrupt)` - Stored blob is not a valid configuration
    /// - `Err(StoreError::Db)` - Database error
    pub async fn get(&self, guild_id: u64) -> Result<Option<EconomyConfig>, StoreError> {
        let Some(model) = entity::prelude::EconomyConfig::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let patch: EconomyConfigPatch =
            serde_json::from_value(model.config).map_err(|e| InternalError::CorruptConfig {
                guild_id,
                reason: e.to_string(),
            })?;

        let config = EconomyConfig::validate(patch).map_err(|errors| {
            InternalError::CorruptConfig {
                guild_id,
                reason: errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            }
        })?;

        Ok(Some(config))
    }

    /// Stores the full configuration of a guild, replacing any previous one.
    ///
    /// The caller is responsible for validating `config` beforehand.
    pub async fn upsert(&self, guild_id: u64, config: &EconomyConfig) -> Result<(), StoreError> {
        let blob = serde_json::to_value(config).map_err(|e| DbErr::Json(e.to_string()))?;

        entity::prelude::EconomyConfig::insert(entity::economy_config::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            config: ActiveValue::Set(blob),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::economy_config::Column::GuildId)
                .update_columns([
                    entity::economy_config::Column::Config,
                    entity::economy_config::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Lists the IDs of every guild with a stored configuration.
    pub async fn guild_ids(&self) -> Result<Vec<u64>, StoreError> {
        let models = entity::prelude::EconomyConfig::find().all(self.db).await?;

        Ok(models
            .into_iter()
            .map(|m| parse_u64_from_string(m.guild_id))
            .collect::<Result<Vec<_>, _>>()?)
    }
}
