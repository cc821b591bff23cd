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
                    .table(UserEconomy::Table)
                    .if_not_exists()
                    .col(string(UserEconomy::GuildId))
                    .col(string(UserEconomy::UserId))
                    .col(big_integer(UserEconomy::Wallet).default(0))
                    .col(big_integer(UserEconomy::Bank).default(0))
                    .col(big_integer(UserEconomy::DailyStreak).default(0))
                    .col(timestamp_with_time_zone_null(UserEconomy::LastDailyAt))
                    .col(timestamp_with_time_zone_null(UserEconomy::LastWorkAt))
                    .col(timestamp_with_time_zone_null(UserEconomy::LastCrimeAt))
                    .col(timestamp_with_time_zone_null(UserEconomy::LastGambleAt))
                    .col(timestamp_with_time_zone_null(UserEconomy::LastRobAt))
                    .col(timestamp_with_time_zone_null(UserEconomy::JailedUntil))
                    .col(timestamp_with_time_zone_null(UserEconomy::LastInterestAt))
                    .col(big_integer(UserEconomy::Version).default(1))
                    .primary_key(
                        Index::create()
                            .name("pk_user_economy")
                            .col(UserEconomy::GuildId)
                            .col(UserEconomy::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_economy_guild_id")
                            .from(UserEconomy::Table, UserEconomy::GuildId)
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
            .drop_table(Table::drop().table(UserEconomy::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserEconomy {
    Table,
    GuildId,
    UserId,
    Wallet,
    Bank,
    DailyStreak,
    LastDailyAt,
    LastWorkAt,
    LastCrimeAt,
    LastGambleAt,
    LastRobAt,
    JailedUntil,
    LastInterestAt,
    Version,
}
