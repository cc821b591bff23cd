//! Member balance factory for seeding `user_economy` rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr};

/// Factory for member economy records.
///
/// # Example
///
/// ```rust,ignore
/// let member = UserEconomyFactory::new(&db, &guild.guild_id)
///     .user_id("42")
///     .wallet(1_000)
///     .jailed_until(Some(Utc::now() + Duration::hours(1)))
///     .build()
///     .await?;
/// ```
pub struct UserEconomyFactory<'a> {
    db: &'a DatabaseConnection,
    model: entity::user_economy::Model,
}

impl<'a> UserEconomyFactory<'a> {
    /// Creates a factory with an empty record for a fresh user ID in the given guild.
    ///
    /// Defaults: zero balances, no streak, no timestamps, version 1.
    pub fn new(db: &'a DatabaseConnection, guild_id: impl Into<String>) -> Self {
        Self {
            db,
            model: entity::user_economy::Model {
                guild_id: guild_id.into(),
                user_id: next_id().to_string(),
                wallet: 0,
                bank: 0,
                daily_streak: 0,
                last_daily_at: None,
                last_work_at: None,
                last_crime_at: None,
                last_gamble_at: None,
                last_rob_at: None,
                jailed_until: None,
                last_interest_at: None,
                version: 1,
            },
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.model.user_id = user_id.into();
        self
    }

    pub fn wallet(mut self, wallet: i64) -> Self {
        self.model.wallet = wallet;
        self
    }

    pub fn bank(mut self, bank: i64) -> Self {
        self.model.bank = bank;
        self
    }

    pub fn daily_streak(mut self, streak: i64, last_daily_at: Option<DateTime<Utc>>) -> Self {
        self.model.daily_streak = streak;
        self.model.last_daily_at = last_daily_at;
        self
    }

    pub fn last_work_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.model.last_work_at = at;
        self
    }

    pub fn last_rob_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.model.last_rob_at = at;
        self
    }

    pub fn jailed_until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.model.jailed_until = until;
        self
    }

    pub fn last_interest_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.model.last_interest_at = at;
        self
    }

    /// Inserts the record.
    pub async fn build(self) -> Result<entity::user_economy::Model, DbErr> {
        let active: entity::user_economy::ActiveModel = self.model.into();
        // `into()` marks every field unchanged; reset them so the insert writes all columns
        active.reset_all().insert(self.db).await
    }
}

/// Creates a member record with the given wallet in the given guild.
pub async fn create_user_economy(
    db: &DatabaseConnection,
    guild_id: &str,
    wallet: i64,
) -> Result<entity::user_economy::Model, DbErr> {
    UserEconomyFactory::new(db, guild_id).wallet(wallet).build().await
}
