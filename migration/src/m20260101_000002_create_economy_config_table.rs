use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_discord_guild_table::DiscordGuild;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EconomyConfig::Table)
                    .if_not_exists()
                    .col(string(EconomyConfig::GuildId).primary_key())
                    .col(json(EconomyConfig::Config))
                    .col(
                        timestamp_with_time_zone(EconomyConfig::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_economy_config_guild_id")
                            .from(EconomyConfig::Table, EconomyConfig::GuildId)
                            .to(DiscordGuild::Table, DiscordGuild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EconomyConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EconomyConfig {
    Table,
    GuildId,
    Config,
    UpdatedAt,
}
