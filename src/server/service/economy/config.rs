use sea_orm::DatabaseConnection;

use crate::server::{
    data::{economy::EconomyConfigRepository, guild::DiscordGuildRepository},
    error::{store::StoreError, AppError},
    model::economy::config::{EconomyConfig, EconomyConfigPatch},
};

/// Reads and updates the economy configuration of guilds the bot is in.
pub struct EconomyConfigService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EconomyConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the configuration of a guild, with defaults for anything never saved.
    ///
    /// # Returns
    /// - `Ok(EconomyConfig)` - The effective configuration
    /// - `Err(AppError::NotFound)` - The bot is not in this guild
    pub async fn get(&self, guild_id: u64) -> Result<EconomyConfig, AppError> {
        self.ensure_guild(guild_id).await?;

        Ok(EconomyConfigRepository::new(self.db)
            .get(guild_id)
            .await?
            .unwrap_or_default())
    }

    /// Applies a partial update over the current configuration.
    ///
    /// The merged configuration is validated as a whole; when any invariant is
    /// violated nothing is stored. A stored configuration that can no longer be read
    /// is replaced, with the patch merged over the defaults.
    ///
    /// # Returns
    /// - `Ok(EconomyConfig)` - The stored configuration
    /// - `Err(AppError::Validation)` - Every violated invariant
    /// - `Err(AppError::NotFound)` - The bot is not in this guild
    pub async fn update(
        &self,
        guild_id: u64,
        patch: EconomyConfigPatch,
    ) -> Result<EconomyConfig, AppError> {
        self.ensure_guild(guild_id).await?;

        let current = match EconomyConfigRepository::new(self.db).get(guild_id).await {
            Ok(stored) => stored.unwrap_or_default(),
            Err(StoreError::Corrupt(e)) => {
                tracing::warn!(
                    "Replacing unreadable economy configuration of guild {}: {}",
                    guild_id,
                    e
                );
                EconomyConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        let merged = EconomyConfig::merge(&current, patch).map_err(AppError::Validation)?;

        EconomyConfigRepository::new(self.db)
            .upsert(guild_id, &merged)
            .await?;

        tracing::info!("Updated economy configuration for guild {}", guild_id);

        Ok(merged)
    }

    /// Fails with `AppError::NotFound` unless the bot is in the guild.
    pub async fn ensure_guild(&self, guild_id: u64) -> Result<(), AppError> {
        DiscordGuildRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Guild {} not found", guild_id)))
    }
}
