//! Per-member economy state.

use chrono::{DateTime, Utc};

use crate::{
    model::economy::{BalanceDto, LeaderboardDto, LeaderboardEntryDto},
    server::{
        error::internal::InternalError,
        model::economy::{action::CooldownAction, config::EconomyConfig},
        util::parse::parse_u64_from_string,
    },
};

/// Balances, streak and action timestamps of one member in one guild.
///
/// A `version` of 0 marks state that has never been persisted; the data layer inserts
/// such state instead of updating it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEconomyState {
    pub guild_id: u64,
    pub user_id: u64,
    pub wallet: i64,
    pub bank: i64,
    pub daily_streak: i64,
    pub last_daily_at: Option<DateTime<Utc>>,
    pub last_work_at: Option<DateTime<Utc>>,
    pub last_crime_at: Option<DateTime<Utc>>,
    pub last_gamble_at: Option<DateTime<Utc>>,
    pub last_rob_at: Option<DateTime<Utc>>,
    pub jailed_until: Option<DateTime<Utc>>,
    /// Anchor from which the next interest period is counted.
    pub last_interest_at: Option<DateTime<Utc>>,
    pub version: i64,
}

impl UserEconomyState {
    /// Fresh state for a member seen for the first time, holding the starting balance.
    pub fn new(guild_id: u64, user_id: u64, config: &EconomyConfig) -> Self {
        Self {
            guild_id,
            user_id,
            wallet: config.starting_balance,
            bank: 0,
            daily_streak: 0,
            last_daily_at: None,
            last_work_at: None,
            last_crime_at: None,
            last_gamble_at: None,
            last_rob_at: None,
            jailed_until: None,
            last_interest_at: None,
            version: 0,
        }
    }

    /// Converts an entity model to the domain state at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(UserEconomyState)` - The converted state
    /// - `Err(InternalError::ParseStringId)` - Stored guild or user ID is not a valid u64
    pub fn from_entity(entity: entity::user_economy::Model) -> Result<Self, InternalError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            wallet: entity.wallet,
            bank: entity.bank,
            daily_streak: entity.daily_streak,
            last_daily_at: entity.last_daily_at,
            last_work_at: entity.last_work_at,
            last_crime_at: entity.last_crime_at,
            last_gamble_at: entity.last_gamble_at,
            last_rob_at: entity.last_rob_at,
            jailed_until: entity.jailed_until,
            last_interest_at: entity.last_interest_at,
            version: entity.version,
        })
    }

    pub fn is_persisted(&self) -> bool {
        self.version > 0
    }

    pub fn is_jailed(&self, now: DateTime<Utc>) -> bool {
        self.jailed_until.is_some_and(|until| until > now)
    }

    pub fn net_worth(&self) -> i64 {
        self.wallet.saturating_add(self.bank)
    }

    pub fn last_used(&self, action: CooldownAction) -> Option<DateTime<Utc>> {
        match action {
            CooldownAction::Daily => self.last_daily_at,
            CooldownAction::Work => self.last_work_at,
            CooldownAction::Crime => self.last_crime_at,
            CooldownAction::Gamble => self.last_gamble_at,
            CooldownAction::Rob => self.last_rob_at,
        }
    }

    pub fn set_last_used(&mut self, action: CooldownAction, at: DateTime<Utc>) {
        let slot = match action {
            CooldownAction::Daily => &mut self.last_daily_at,
            CooldownAction::Work => &mut self.last_work_at,
            CooldownAction::Crime => &mut self.last_crime_at,
            CooldownAction::Gamble => &mut self.last_gamble_at,
            CooldownAction::Rob => &mut self.last_rob_at,
        };
        *slot = Some(at);
    }

    /// Credits the wallet up to `max_balance` (0 = unlimited).
    ///
    /// # Returns
    /// The amount actually credited.
    pub fn credit_wallet(&mut self, amount: i64, max_balance: i64) -> i64 {
        let credited = capped_credit(self.wallet, amount, max_balance);
        self.wallet += credited;
        credited
    }

    /// Debits the wallet, never below zero.
    ///
    /// # Returns
    /// The amount actually debited.
    pub fn debit_wallet(&mut self, amount: i64) -> i64 {
        let debited = amount.clamp(0, self.wallet.max(0));
        self.wallet -= debited;
        debited
    }

    pub fn into_balance_dto(self) -> BalanceDto {
        BalanceDto {
            user_id: self.user_id,
            wallet: self.wallet,
            bank: self.bank,
            daily_streak: self.daily_streak,
            jailed_until: self.jailed_until,
        }
    }

    pub fn into_leaderboard_dto(self, rank: u64) -> LeaderboardEntryDto {
        LeaderboardEntryDto {
            rank,
            user_id: self.user_id,
            wallet: self.wallet,
            bank: self.bank,
            net_worth: self.net_worth(),
        }
    }
}

/// One page of a guild's members ordered by net worth, richest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    /// Members on this page, each with its 1-based rank across the whole guild
    pub entries: Vec<(u64, UserEconomyState)>,
    pub total: u64,
    /// 0-based page index
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl Leaderboard {
    pub fn into_dto(self) -> LeaderboardDto {
        LeaderboardDto {
            entries: self
                .entries
                .into_iter()
                .map(|(rank, state)| state.into_leaderboard_dto(rank))
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Portion of `amount` that can be added to `balance` without exceeding `cap`.
///
/// A `cap` of 0 means unlimited, which still stops at `i64::MAX`. A balance already
/// above the cap receives nothing.
pub fn capped_credit(balance: i64, amount: i64, cap: i64) -> i64 {
    let cap = if cap <= 0 { i64::MAX } else { cap };

    amount.max(0).min(cap.saturating_sub(balance).max(0))
}
