use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::server::{
    data::economy::{EconomyStore, SeaOrmEconomyStore},
    error::{economy::EconomyError, AppError},
    model::economy::action::{ActionKind, EconomyAction, EconomyFeature},
    service::economy::{random::SequenceSource, EconomyService},
};

mod config;
mod daily;
mod gamble;

/// Creates the economy tables and a guild whose stored configuration is
/// `{"enabled": true}` merged with `overrides`.
async fn setup(overrides: serde_json::Value) -> Result<(TestContext, u64), AppError> {
    let test = TestBuilder::new().with_economy_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild_with_economy(db, overrides).await?;

    Ok((test, guild.guild_id.parse().unwrap()))
}

/// Seeds a member with the given wallet and returns its user ID.
async fn member(db: &DatabaseConnection, guild_id: u64, wallet: i64) -> Result<u64, AppError> {
    let model = factory::create_user_economy(db, &guild_id.to_string(), wallet).await?;

    Ok(model.user_id.parse().unwrap())
}

fn at(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    now + Duration::seconds(seconds)
}
