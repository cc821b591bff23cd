use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::{error::store::StoreError, model::economy::state::UserEconomyState};

/// Repository for per-member economy state.
///
/// Generic over the connection so the same queries run on a pooled connection or
/// inside a transaction.
pub struct UserEconomyRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserEconomyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the state of one member in one guild.
    ///
    /// # Returns
    /// - `Ok(Some(UserEconomyState))` - Member has a stored record
    /// - `Ok(None)` - Member has never been written
    /// - `Err(StoreError)` - Database error or unreadable stored IDs
    pub async fn find(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<UserEconomyState>, StoreError> {
        let model = entity::prelude::UserEconomy::find()
            .filter(entity::user_economy::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::user_economy::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        Ok(model.map(UserEconomyState::from_entity).transpose()?)
    }

    /// Lists every stored member of a guild, in no particular order.
    pub async fn list_by_guild(&self, guild_id: u64) -> Result<Vec<UserEconomyState>, StoreError> {
        let models = entity::prelude::UserEconomy::find()
            .filter(entity::user_economy::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(UserEconomyState::from_entity)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Writes `state` if the stored record still carries the version it was read at.
    ///
    /// Unpersisted state (version 0) is inserted and only succeeds when no record exists
    /// for the member. Persisted state is updated only while the stored version equals
    /// `state.version`.
    ///
    /// # Returns
    /// - `Ok(UserEconomyState)` - The written state carrying its new version
    /// - `Err(StoreError::Conflict)` - Record was created or changed in the meantime
    /// - `Err(StoreError::Db)` - Database error
    pub async fn save(&self, state: &UserEconomyState) -> Result<UserEconomyState, StoreError> {
        let mut saved = state.clone();
        saved.version = state.version + 1;

        if state.is_persisted() {
            let mut model = to_active_model(&saved);
            model.guild_id = ActiveValue::NotSet;
            model.user_id = ActiveValue::NotSet;

            let result = entity::prelude::UserEconomy::update_many()
                .set(model)
                .filter(entity::user_economy::Column::GuildId.eq(state.guild_id.to_string()))
                .filter(entity::user_economy::Column::UserId.eq(state.user_id.to_string()))
                .filter(entity::user_economy::Column::Version.eq(state.version))
                .exec(self.db)
                .await?;

            if result.rows_affected == 0 {
                return Err(StoreError::Conflict);
            }
        } else {
            let inserted = entity::prelude::UserEconomy::insert(to_active_model(&saved))
                .on_conflict(
                    OnConflict::columns([
                        entity::user_economy::Column::GuildId,
                        entity::user_economy::Column::UserId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(self.db)
                .await;

            match inserted {
                Ok(0) | Err(DbErr::RecordNotInserted) => return Err(StoreError::Conflict),
                Ok(_) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(saved)
    }
}

fn to_active_model(state: &UserEconomyState) -> entity::user_economy::ActiveModel {
    entity::user_economy::ActiveModel {
        guild_id: ActiveValue::Set(state.guild_id.to_string()),
        user_id: ActiveValue::Set(state.user_id.to_string()),
        wallet: ActiveValue::Set(state.wallet),
        bank: ActiveValue::Set(state.bank),
        daily_streak: ActiveValue::Set(state.daily_streak),
        last_daily_at: ActiveValue::Set(state.last_daily_at),
        last_work_at: ActiveValue::Set(state.last_work_at),
        last_crime_at: ActiveValue::Set(state.last_crime_at),
        last_gamble_at: ActiveValue::Set(state.last_gamble_at),
        last_rob_at: ActiveValue::Set(state.last_rob_at),
        jailed_until: ActiveValue::Set(state.jailed_until),
        last_interest_at: ActiveValue::Set(state.last_interest_at),
        version: ActiveValue::Set(state.version),
    }
}
