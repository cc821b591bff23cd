//! Discord bot exposing the economy as slash commands.
//!
//! The bot registers `/daily`, `/work`, `/crime`, `/gamble`, `/rob`, `/deposit`,
//! `/withdraw`, `/balance` and `/leaderboard` globally when it connects, keeps the
//! `discord_guild` table in step with the guilds it is in, and turns each command
//! interaction into a call on the economy service. The engine returns structured
//! results and errors; [`command`] renders them as reply text.
//!
//! The bot is initialized during server startup and runs in a separate tokio task
//! to avoid blocking the HTTP server.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is required: slash commands arrive as interactions regardless of
//! the message intents.

pub mod command;
pub mod handler;
pub mod start;
