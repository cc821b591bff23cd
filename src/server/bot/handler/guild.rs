//! Guild event handler.
//!
//! Records every guild the bot is in so the HTTP API can tell known guilds from
//! unknown ones. Fired on startup for each guild, when the bot joins a new guild
//! and when a guild becomes available again after an outage.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild};

use crate::server::data::guild::DiscordGuildRepository;

/// Upserts the guild's ID, name and icon.
///
/// # Arguments
/// - `db` - Database connection for storing guild data
/// - `_ctx` - Discord context (unused)
/// - `guild` - Guild data from Discord
/// - `_is_new` - Whether this is a new guild join (unused)
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    _ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild_id,
        guild.member_count,
    );

    let icon_hash = guild.icon.map(|icon| icon.to_string());

    if let Err(e) = DiscordGuildRepository::new(db)
        .upsert(guild_id, guild.name.clone(), icon_hash)
        .await
    {
        tracing::error!(
            "Failed to upsert guild {} ({}): {:?}",
            guild_id,
            guild.name,
            e
        );
    }
}
