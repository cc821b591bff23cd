//! Economy config factory for seeding stored per-guild settings.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for stored economy configuration blobs.
///
/// The blob is written as-is, so tests can store partial or deliberately invalid
/// configurations.
pub struct EconomyConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    config: serde_json::Value,
}

impl<'a> EconomyConfigFactory<'a> {
    /// Creates a factory for the given guild with an empty blob (`{}`), which loads as
    /// the default configuration.
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        Self {
            db,
            guild_id: guild_id.into(),
            config: serde_json::json!({}),
        }
    }

    /// Sets the stored JSON blob.
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }

    /// Inserts the configuration row.
    pub async fn build(self) -> Result<entity::economy_config::Model, DbErr> {
        entity::economy_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            config: ActiveValue::Set(self.config),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Stores an enabled economy configuration with defaults for every other field.
pub async fn create_economy_config(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::economy_config::Model, DbErr> {
    EconomyConfigFactory::new(db, guild_id)
        .config(serde_json::json!({ "enabled": true }))
        .build()
        .await
}
