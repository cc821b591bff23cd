use sea_orm::entity::prelude::*;

/// Balances, streak and action timestamps of one member in one guild.
///
/// `version` is bumped on every write and used for optimistic concurrency.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_economy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub wallet: i64,
    pub bank: i64,
    pub daily_streak: i64,
    pub last_daily_at: Option<DateTimeUtc>,
    pub last_work_at: Option<DateTimeUtc>,
    pub last_crime_at: Option<DateTimeUtc>,
    pub last_gamble_at: Option<DateTimeUtc>,
    pub last_rob_at: Option<DateTimeUtc>,
    pub jailed_until: Option<DateTimeUtc>,
    pub last_interest_at: Option<DateTimeUtc>,
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::discord_guild::Entity",
        from = "Column::GuildId",
        to = "super::discord_guild::Column::GuildId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DiscordGuild,
}

impl Related<super::discord_guild::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscordGuild.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
