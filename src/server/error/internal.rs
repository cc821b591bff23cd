use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored economy configuration blob could not be read back.
    ///
    /// Either the JSON no longer matches the configuration shape or it violates
    /// an invariant that was enforced when it was written.
    #[error("Stored economy configuration for guild {guild_id} is corrupt: {reason}")]
    CorruptConfig {
        /// Guild whose configuration failed to load
        guild_id: u64,
        /// Deserialization or validation failure
        reason: String,
    },
}
