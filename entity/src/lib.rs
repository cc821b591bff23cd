//! SeaORM entity models for the Astra economy database.

pub mod prelude;

pub mod discord_guild;
pub mod economy_config;
pub mod user_economy;
