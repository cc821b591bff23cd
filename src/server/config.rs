use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Every minute, at second zero.
const DEFAULT_INTEREST_CRON: &str = "0 * * * * *";

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub bind_address: String,
    pub interest_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            interest_cron: std::env::var("INTEREST_CRON")
                .unwrap_or_else(|_| DEFAULT_INTEREST_CRON.to_string()),
        })
    }
}
