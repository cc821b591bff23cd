use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client with the economy event handler.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `db` - Database connection for the handler to use
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - The client could not be built
pub async fn init_bot(config: &Config, db: DatabaseConnection) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(db))
        .await?;

    Ok(client)
}

/// Runs the Discord client until it shuts down.
///
/// Call from within a spawned task; this only returns when the gateway
/// connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
