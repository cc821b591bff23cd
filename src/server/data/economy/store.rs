use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::economy::{config::EconomyConfigRepository, state::UserEconomyRepository},
    error::store::StoreError,
    model::economy::{config::EconomyConfig, state::UserEconomyState},
};

/// Persistence seam of the economy engine.
///
/// Implementations provide per-member optimistic concurrency: `commit` writes a batch of
/// states atomically, and fails with [`StoreError::Conflict`] without writing anything
/// when any of them was changed (or created) since it was loaded.
#[async_trait]
pub trait EconomyStore: Send + Sync {
    /// Configuration of the guild, or the defaults when it never saved one.
    async fn load_config(&self, guild_id: u64) -> Result<EconomyConfig, StoreError>;

    async fn load(&self, guild_id: u64, user_id: u64)
        -> Result<Option<UserEconomyState>, StoreError>;

    /// Writes every state in one atomic unit.
    ///
    /// # Returns
    /// - `Ok(Vec<UserEconomyState>)` - Written states with their new versions, in input order
    /// - `Err(StoreError::Conflict)` - A version check failed; nothing was written
    async fn commit(
        &self,
        writes: Vec<UserEconomyState>,
    ) -> Result<Vec<UserEconomyState>, StoreError>;

    async fn list_guild(&self, guild_id: u64) -> Result<Vec<UserEconomyState>, StoreError>;
}

/// [`EconomyStore`] backed by the application database.
pub struct SeaOrmEconomyStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeaOrmEconomyStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EconomyStore for SeaOrmEconomyStore<'_> {
    async fn load_config(&self, guild_id: u64) -> Result<EconomyConfig, StoreError> {
        Ok(EconomyConfigRepository::new(self.db)
            .get(guild_id)
            .await?
            .unwrap_or_default())
    }

    async fn load(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<UserEconomyState>, StoreError> {
        UserEconomyRepository::new(self.db)
            .find(guild_id, user_id)
            .await
    }

    async fn commit(
        &self,
        writes: Vec<UserEconomyState>,
    ) -> Result<Vec<UserEconomyState>, StoreError> {
        let txn = self.db.begin().await?;
        let repo = UserEconomyRepository::new(&txn);

        let mut saved = Vec::with_capacity(writes.len());
        for state in &writes {
            match repo.save(state).await {
                Ok(state) => saved.push(state),
                Err(e) => {
                    txn.rollback().await?;
                    return Err(e);
                }
            }
        }

        txn.commit().await?;

        Ok(saved)
    }

    async fn list_guild(&self, guild_id: u64) -> Result<Vec<UserEconomyState>, StoreError> {
        UserEconomyRepository::new(self.db)
            .list_by_guild(guild_id)
            .await
    }
}
