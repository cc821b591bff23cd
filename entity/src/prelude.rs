pub use super::discord_guild::Entity as DiscordGuild;
pub use super::economy_config::Entity as EconomyConfig;
pub use super::user_economy::Entity as UserEconomy;
