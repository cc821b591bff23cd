//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and
//! a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::discord_guild::create_guild(&db).await?;
//! let member = factory::user_economy::UserEconomyFactory::new(&db, &guild.guild_id)
//!     .wallet(500)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `discord_guild` - Create guilds, optionally with a stored economy config
//! - `economy_config` - Create stored per-guild economy settings
//! - `user_economy` - Create member balance records
//! - `helpers` - Unique ID generation

pub mod discord_guild;
pub mod economy_config;
pub mod helpers;
pub mod user_economy;

pub use discord_guild::{create_guild, create_guild_with_economy};
pub use economy_config::create_economy_config;
pub use user_economy::create_user_economy;
