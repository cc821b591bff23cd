use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "discord_guild")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    pub name: String,
    pub icon_hash: Option<String>,
    pub joined_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::economy_config::Entity")]
    EconomyConfig,
    #[sea_orm(has_many = "super::user_economy::Entity")]
    UserEconomy,
}

impl Related<super::economy_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EconomyConfig.def()
    }
}

impl Related<super::user_economy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserEconomy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
