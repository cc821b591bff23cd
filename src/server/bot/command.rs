//! Slash command definitions, argument parsing and reply rendering.
//!
//! Nothing here talks to Discord: the interaction handler collects the options of a
//! command into [`CommandArgs`], [`parse`] turns them into a [`SlashCommand`], and the
//! `render_*` functions produce the reply text from engine results.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandOptionType, CreateCommand,
    CreateCommandOption,
};
use thiserror::Error;

use crate::server::{
    error::economy::EconomyError,
    model::economy::{
        action::{ActionKind, ActionResult, EconomyAction},
        config::EconomyConfig,
        state::{Leaderboard, UserEconomyState},
    },
    util::time::add_seconds,
};

/// Leaderboard entries shown per page in Discord.
pub const LEADERBOARD_PAGE_SIZE: u64 = 10;

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    Action(EconomyAction),
    /// Show balances of the given member, or of the caller when `None`
    Balance { user_id: Option<u64> },
    /// 0-based leaderboard page
    Leaderboard { page: u64 },
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command /{0}")]
    UnknownCommand(String),
    #[error("Missing required option `{0}`")]
    MissingOption(&'static str),
}

/// Integer and user options of one command invocation, by option name.
#[derive(Debug, Default)]
pub struct CommandArgs {
    integers: HashMap<String, i64>,
    users: HashMap<String, u64>,
}

impl CommandArgs {
    pub fn from_options(options: &[CommandDataOption]) -> Self {
        options
            .iter()
            .fold(Self::default(), |args, option| match &option.value {
                CommandDataOptionValue::Integer(value) => args.integer(&option.name, *value),
                CommandDataOptionValue::User(user_id) => args.user(&option.name, user_id.get()),
                _ => args,
            })
    }

    pub fn integer(mut self, name: &str, value: i64) -> Self {
        self.integers.insert(name.to_string(), value);
        self
    }

    pub fn user(mut self, name: &str, user_id: u64) -> Self {
        self.users.insert(name.to_string(), user_id);
        self
    }

    fn get_integer(&self, name: &'static str) -> Result<i64, CommandError> {
        self.integers
            .get(name)
            .copied()
            .ok_or(CommandError::MissingOption(name))
    }

    fn get_user(&self, name: &'static str) -> Result<u64, CommandError> {
        self.users
            .get(name)
            .copied()
            .ok_or(CommandError::MissingOption(name))
    }
}

/// Commands registered with Discord.
pub fn definitions() -> Vec<CreateCommand> {
    let amount = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Integer, "amount", description)
            .min_int_value(1)
            .required(true)
    };

    vec![
        CreateCommand::new("daily").description("Claim your daily reward"),
        CreateCommand::new("work").description("Work for a random wage"),
        CreateCommand::new("crime").description("Commit a crime for a big payout, or a fine"),
        CreateCommand::new("gamble")
            .description("Bet on a coin flip")
            .add_option(amount("Amount to bet")),
        CreateCommand::new("rob")
            .description("Try to rob another member")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "target", "Member to rob")
                    .required(true),
            ),
        CreateCommand::new("deposit")
            .description("Move money from your wallet into the bank")
            .add_option(amount("Amount to deposit")),
        CreateCommand::new("withdraw")
            .description("Move money from the bank into your wallet")
            .add_option(amount("Amount to withdraw")),
        CreateCommand::new("balance")
            .description("Show a wallet and bank balance")
            .add_option(CreateCommandOption::new(
                CommandOptionType::User,
                "user",
                "Member to look up (defaults to you)",
            )),
        CreateCommand::new("leaderboard")
            .description("Show the richest members")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "page", "Page number")
                    .min_int_value(1),
            ),
    ]
}

pub fn parse(name: &str, args: &CommandArgs) -> Result<SlashCommand, CommandError> {
    let action = match name {
        "daily" => EconomyAction::Daily,
        "work" => EconomyAction::Work,
        "crime" => EconomyAction::Crime,
        "gamble" => EconomyAction::Gamble {
            bet: args.get_integer("amount")?,
        },
        "rob" => EconomyAction::Rob {
            target_id: args.get_user("target")?,
        },
        "deposit" => EconomyAction::Deposit {
            amount: args.get_integer("amount")?,
        },
        "withdraw" => EconomyAction::Withdraw {
            amount: args.get_integer("amount")?,
        },
        "balance" => {
            return Ok(SlashCommand::Balance {
                user_id: args.get_user("user").ok(),
            })
        }
        "leaderboard" => {
            // Users count pages from 1
            let page = args.get_integer("page").unwrap_or(1).max(1) as u64 - 1;
            return Ok(SlashCommand::Leaderboard { page });
        }
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    Ok(SlashCommand::Action(action))
}

fn money(config: &EconomyConfig, amount: i64) -> String {
    format!("{} {} {}", config.currency_symbol, amount, config.currency_name)
}

fn relative(at: DateTime<Utc>) -> String {
    format!("<t:{}:R>", at.timestamp())
}

pub fn render_result(result: &ActionResult, config: &EconomyConfig) -> String {
    let amount = money(config, result.amount.abs());

    let headline = match (result.action, result.success) {
        (ActionKind::Daily, _) => format!(
            "You claimed your daily {}! Streak: {} day(s).",
            amount,
            result.streak.unwrap_or(1)
        ),
        (ActionKind::Work, _) => format!("You worked a shift and earned {}.", amount),
        (ActionKind::Crime, true) => format!("Your crime paid off: you got away with {}.", amount),
        (ActionKind::Crime, false) => format!("You were caught and fined {}.", amount),
        (ActionKind::Gamble, true) => format!("You won {}!", amount),
        (ActionKind::Gamble, false) => format!("You lost {}.", amount),
        (ActionKind::Rob, true) => format!("You stole {}!", amount),
        (ActionKind::Rob, false) => match result.jailed_until {
            Some(until) => format!("The robbery failed. You are in jail until {}.", relative(until)),
            None => "The robbery failed.".to_string(),
        },
        (ActionKind::Deposit, _) => format!("Deposited {} into the bank.", amount),
        (ActionKind::Withdraw, _) => format!("Withdrew {} from the bank.", amount),
    };

    format!(
        "{}\nWallet: {} | Bank: {}",
        headline,
        money(config, result.balance_after),
        money(config, result.bank_after)
    )
}

pub fn render_error(error: &EconomyError, config: &EconomyConfig) -> String {
    match error {
        EconomyError::ModuleDisabled { feature } => {
            format!("The {} module is disabled in this server.", feature.name())
        }
        EconomyError::OnCooldown { remaining, now, .. } => format!(
            "Slow down! You can do that again {}.",
            relative(add_seconds(*now, *remaining))
        ),
        EconomyError::InvalidBet { min, max, .. } if *max > 0 => format!(
            "Bets must be between {} and {}.",
            money(config, *min),
            money(config, *max)
        ),
        EconomyError::InvalidBet { min, .. } => {
            format!("Bets must be at least {}.", money(config, *min))
        }
        EconomyError::InsufficientFunds { required, available } => format!(
            "You need {} but only have {}.",
            money(config, *required),
            money(config, *available)
        ),
        EconomyError::TargetNotRobbable { required, .. } => format!(
            "That member is too poor to rob. They need at least {}.",
            money(config, *required)
        ),
        EconomyError::InvalidTarget => "You can't rob yourself.".to_string(),
        EconomyError::ActorJailed { until } => {
            format!("You are in jail. You'll be released {}.", relative(*until))
        }
        EconomyError::InvalidAmount { .. } => "That amount is not valid.".to_string(),
        EconomyError::BankFull { capacity } => format!(
            "Your bank can only hold {} more.",
            money(config, *capacity)
        ),
        EconomyError::ConcurrentModification => {
            "Your balance changed while this was processed. Please try again.".to_string()
        }
        EconomyError::Persistence(_) => "Something went wrong. Please try again later.".to_string(),
    }
}

pub fn render_balance(state: &UserEconomyState, config: &EconomyConfig) -> String {
    format!(
        "<@{}>\nWallet: {}\nBank: {}\nNet worth: {}",
        state.user_id,
        money(config, state.wallet),
        money(config, state.bank),
        money(config, state.net_worth())
    )
}

pub fn render_leaderboard(leaderboard: &Leaderboard, config: &EconomyConfig) -> String {
    if leaderboard.entries.is_empty() {
        return "Nobody is on the leaderboard yet.".to_string();
    }

    let lines: Vec<String> = leaderboard
        .entries
        .iter()
        .map(|(rank, state)| {
            format!(
                "**{}.** <@{}> {}",
                rank,
                state.user_id,
                money(config, state.net_worth())
            )
        })
        .collect();

    format!(
        "{}\nPage {} of {}",
        lines.join("\n"),
        leaderboard.page + 1,
        leaderboard.total_pages.max(1)
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::server::model::economy::action::EconomyFeature;

    fn config() -> EconomyConfig {
        EconomyConfig {
            currency_symbol: "$".to_string(),
            currency_name: "bucks".to_string(),
            ..EconomyConfig::default()
        }
    }

    #[test]
    fn parses_actions_with_options() {
        let args = CommandArgs::default().integer("amount", 250).user("target", 7);

        assert_eq!(
            parse("gamble", &args),
            Ok(SlashCommand::Action(EconomyAction::Gamble { bet: 250 }))
        );
        assert_eq!(
            parse("rob", &args),
            Ok(SlashCommand::Action(EconomyAction::Rob { target_id: 7 }))
        );
        assert_eq!(
            parse("withdraw", &args),
            Ok(SlashCommand::Action(EconomyAction::Withdraw { amount: 250 }))
        );
        assert_eq!(
            parse("daily", &CommandArgs::default()),
            Ok(SlashCommand::Action(EconomyAction::Daily))
        );
    }

    #[test]
    fn rejects_missing_options_and_unknown_commands() {
        let args = CommandArgs::default();

        assert_eq!(
            parse("deposit", &args),
            Err(CommandError::MissingOption("amount"))
        );
        assert_eq!(parse("rob", &args), Err(CommandError::MissingOption("target")));
        assert_eq!(
            parse("steal", &args),
            Err(CommandError::UnknownCommand("steal".to_string()))
        );
    }

    #[test]
    fn leaderboard_pages_count_from_one() {
        assert_eq!(
            parse("leaderboard", &CommandArgs::default()),
            Ok(SlashCommand::Leaderboard { page: 0 })
        );
        assert_eq!(
            parse("leaderboard", &CommandArgs::default().integer("page", 3)),
            Ok(SlashCommand::Leaderboard { page: 2 })
        );
        assert_eq!(
            parse("balance", &CommandArgs::default()),
            Ok(SlashCommand::Balance { user_id: None })
        );
    }

    #[test]
    fn renders_failed_crime_as_fine() {
        let result = ActionResult {
            action: ActionKind::Crime,
            success: false,
            amount: -40,
            balance_after: 120,
            bank_after: 0,
            streak: None,
            cooldown_expires_at: None,
            jailed_until: None,
        };

        assert_eq!(
            render_result(&result, &config()),
            "You were caught and fined $ 40 bucks.\nWallet: $ 120 bucks | Bank: $ 0 bucks"
        );
    }

    #[test]
    fn renders_cooldown_as_discord_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let error = EconomyError::OnCooldown {
            action: ActionKind::Work,
            remaining: 60,
            now,
        };

        assert_eq!(
            render_error(&error, &config()),
            format!("Slow down! You can do that again <t:{}:R>.", now.timestamp() + 60)
        );
        assert_eq!(
            render_error(
                &EconomyError::ModuleDisabled {
                    feature: EconomyFeature::Robbery
                },
                &config()
            ),
            "The robbery module is disabled in this server."
        );
    }
}
