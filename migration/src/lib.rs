pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_discord_guild_table;
mod m20260101_000002_create_economy_config_table;
mod m20260101_000003_create_user_economy_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_discord_guild_table::Migration),
            Box::new(m20260101_000002_create_economy_config_table::Migration),
            Box::new(m20260101_000003_create_user_economy_table::Migration),
        ]
    }
}
