use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// `DATABASE_URL` and `DISCORD_BOT_TOKEN` must be defined, either in the
    /// environment or in a `.env` file.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}
