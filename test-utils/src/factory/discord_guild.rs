//! Guild factory, optionally seeding the guild's stored economy configuration.

use crate::factory::{economy_config::EconomyConfigFactory, helpers::next_id};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr};

/// Factory for guild rows.
///
/// ```rust,ignore
/// let guild = GuildFactory::new(&db)
///     .economy(serde_json::json!({ "robberyEnabled": false }))
///     .build()
///     .await?;
/// ```
pub struct GuildFactory<'a> {
    db: &'a DatabaseConnection,
    model: entity::discord_guild::Model,
    economy: Option<serde_json::Value>,
}

impl<'a> GuildFactory<'a> {
    /// Creates a factory for a guild with a fresh numeric ID and no economy config.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();

        Self {
            db,
            model: entity::discord_guild::Model {
                guild_id: id.to_string(),
                name: format!("Server {}", id),
                icon_hash: None,
                joined_at: Utc::now(),
            },
            economy: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.model.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.model.name = name.into();
        self
    }

    pub fn joined_at(mut self, at: DateTime<Utc>) -> Self {
        self.model.joined_at = at;
        self
    }

    /// Also stores an economy configuration of `{"enabled": true}` with `overrides`
    /// laid over it. Fields left out of the blob load as their defaults.
    pub fn economy(mut self, overrides: serde_json::Value) -> Self {
        let mut config = serde_json::json!({ "enabled": true });
        if let (Some(target), serde_json::Value::Object(extra)) = (config.as_object_mut(), overrides)
        {
            target.extend(extra);
        }

        self.economy = Some(config);
        self
    }

    /// Inserts the guild, then its economy configuration when one was requested.
    pub async fn build(self) -> Result<entity::discord_guild::Model, DbErr> {
        let active: entity::discord_guild::ActiveModel = self.model.into();
        let guild = active.reset_all().insert(self.db).await?;

        if let Some(config) = self.economy {
            EconomyConfigFactory::new(self.db, guild.guild_id.clone())
                .config(config)
                .build()
                .await?;
        }

        Ok(guild)
    }
}

/// Creates a guild without an economy configuration.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::discord_guild::Model, DbErr> {
    GuildFactory::new(db).build().await
}

/// Creates a guild with the economy switched on and `overrides` applied.
pub async fn create_guild_with_economy(
    db: &DatabaseConnection,
    overrides: serde_json::Value,
) -> Result<entity::discord_guild::Model, DbErr> {
    GuildFactory::new(db).economy(overrides).build().await
}
