//! Per-guild economy configuration and its validation.
//!
//! Configuration arrives as an [`EconomyConfigPatch`] (from the dashboard or from the
//! stored JSON blob) and is merged field by field over a base configuration. The merged
//! result is checked as a whole, and every violation is reported together so the
//! dashboard can highlight all offending fields at once.

use serde::{Deserialize, Serialize};

use crate::{
    model::economy::{EconomyConfigDto, UpdateEconomyConfigDto},
    server::error::validation::ValidationError,
};

/// Fixed wait between two daily claims.
pub const DAILY_COOLDOWN_SECONDS: i64 = 24 * 60 * 60;

/// A daily claim more than this long after the previous one starts a new streak.
pub const STREAK_RESET_SECONDS: i64 = 48 * 60 * 60;

/// Longest configurable cooldown, jail time or interest interval (100 years).
pub const MAX_DURATION_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// Largest configurable amount of currency.
pub const MAX_AMOUNT: i64 = i64::MAX / 2;

/// Validated economy configuration of one guild.
///
/// Amounts lie in `[0, MAX_AMOUNT]`, durations in `[0, MAX_DURATION_SECONDS]`,
/// percentages in `[0, 100]`, and every min/max pair is ordered. A zero `max_balance`, `max_bank` or `gambling_max_bet`
/// means unlimited. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyConfig {
    pub enabled: bool,
    pub currency_name: String,
    pub currency_symbol: String,
    pub starting_balance: i64,
    pub max_balance: i64,
    pub max_bank: i64,

    pub daily_reward: i64,
    pub daily_streak_bonus: i64,
    pub daily_streak_max: i64,

    pub work_min_reward: i64,
    pub work_max_reward: i64,
    pub work_cooldown: i64,

    pub crime_min_reward: i64,
    pub crime_max_reward: i64,
    pub crime_cooldown: i64,
    pub crime_success_rate: i64,
    pub crime_fine_percent: i64,

    pub gambling_enabled: bool,
    pub gambling_min_bet: i64,
    pub gambling_max_bet: i64,
    pub gambling_cooldown: i64,

    pub bank_enabled: bool,
    pub bank_interest_rate: f64,
    pub bank_interest_interval: i64,

    pub robbery_enabled: bool,
    pub robbery_min_balance: i64,
    pub robbery_success_rate: i64,
    pub robbery_max_percent: i64,
    pub robbery_cooldown: i64,
    pub robbery_jail_time: i64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            currency_name: "coins".to_string(),
            currency_symbol: "🪙".to_string(),
            starting_balance: 100,
            max_balance: 0,
            max_bank: 0,

            daily_reward: 100,
            daily_streak_bonus: 10,
            daily_streak_max: 7,

            work_min_reward: 50,
            work_max_reward: 200,
            work_cooldown: 60 * 60,

            crime_min_reward: 100,
            crime_max_reward: 500,
            crime_cooldown: 2 * 60 * 60,
            crime_success_rate: 50,
            crime_fine_percent: 25,

            gambling_enabled: true,
            gambling_min_bet: 10,
            gambling_max_bet: 10_000,
            gambling_cooldown: 30,

            bank_enabled: true,
            bank_interest_rate: 1.0,
            bank_interest_interval: 24 * 60 * 60,

            robbery_enabled: true,
            robbery_min_balance: 100,
            robbery_success_rate: 40,
            robbery_max_percent: 20,
            robbery_cooldown: 4 * 60 * 60,
            robbery_jail_time: 60 * 60,
        }
    }
}

/// Partial configuration; `None` fields fall back to the base they are merged over.
///
/// This is both the PATCH payload and the shape read back from the stored JSON blob,
/// so fields added later simply take their defaults for older rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyConfigPatch {
    pub enabled: Option<bool>,
    pub currency_name: Option<String>,
    pub currency_symbol: Option<String>,
    pub starting_balance: Option<i64>,
    pub max_balance: Option<i64>,
    pub max_bank: Option<i64>,
    pub daily_reward: Option<i64>,
    pub daily_streak_bonus: Option<i64>,
    pub daily_streak_max: Option<i64>,
    pub work_min_reward: Option<i64>,
    pub work_max_reward: Option<i64>,
    pub work_cooldown: Option<i64>,
    pub crime_min_reward: Option<i64>,
    pub crime_max_reward: Option<i64>,
    pub crime_cooldown: Option<i64>,
    pub crime_success_rate: Option<i64>,
    pub crime_fine_percent: Option<i64>,
    pub gambling_enabled: Option<bool>,
    pub gambling_min_bet: Option<i64>,
    pub gambling_max_bet: Option<i64>,
    pub gambling_cooldown: Option<i64>,
    pub bank_enabled: Option<bool>,
    pub bank_interest_rate: Option<f64>,
    pub bank_interest_interval: Option<i64>,
    pub robbery_enabled: Option<bool>,
    pub robbery_min_balance: Option<i64>,
    pub robbery_success_rate: Option<i64>,
    pub robbery_max_percent: Option<i64>,
    pub robbery_cooldown: Option<i64>,
    pub robbery_jail_time: Option<i64>,
}

impl EconomyConfig {
    /// Merges `patch` over the documented defaults and validates the result.
    ///
    /// # Returns
    /// - `Ok(EconomyConfig)` - Merged configuration satisfying every invariant
    /// - `Err(Vec<ValidationError>)` - Every violated invariant
    pub fn validate(patch: EconomyConfigPatch) -> Result<Self, Vec<ValidationError>> {
        Self::merge(&Self::default(), patch)
    }

    /// Merges `patch` over `base` field by field and validates the result.
    ///
    /// Nothing is clamped: an out-of-range value is rejected, never adjusted.
    ///
    /// # Arguments
    /// - `base` - Configuration supplying values for fields missing from the patch
    /// - `patch` - Fields to overwrite
    ///
    /// # Returns
    /// - `Ok(EconomyConfig)` - Merged configuration satisfying every invariant
    /// - `Err(Vec<ValidationError>)` - Every violated invariant
    pub fn merge(base: &Self, patch: EconomyConfigPatch) -> Result<Self, Vec<ValidationError>> {
        let merged = Self {
            enabled: patch.enabled.unwrap_or(base.enabled),
            currency_name: patch
                .currency_name
                .unwrap_or_else(|| base.currency_name.clone()),
            currency_symbol: patch
                .currency_symbol
                .unwrap_or_else(|| base.currency_symbol.clone()),
            starting_balance: patch.starting_balance.unwrap_or(base.starting_balance),
            max_balance: patch.max_balance.unwrap_or(base.max_balance),
            max_bank: patch.max_bank.unwrap_or(base.max_bank),

            daily_reward: patch.daily_reward.unwrap_or(base.daily_reward),
            daily_streak_bonus: patch.daily_streak_bonus.unwrap_or(base.daily_streak_bonus),
            daily_streak_max: patch.daily_streak_max.unwrap_or(base.daily_streak_max),

            work_min_reward: patch.work_min_reward.unwrap_or(base.work_min_reward),
            work_max_reward: patch.work_max_reward.unwrap_or(base.work_max_reward),
            work_cooldown: patch.work_cooldown.unwrap_or(base.work_cooldown),

            crime_min_reward: patch.crime_min_reward.unwrap_or(base.crime_min_reward),
            crime_max_reward: patch.crime_max_reward.unwrap_or(base.crime_max_reward),
            crime_cooldown: patch.crime_cooldown.unwrap_or(base.crime_cooldown),
            crime_success_rate: patch.crime_success_rate.unwrap_or(base.crime_success_rate),
            crime_fine_percent: patch.crime_fine_percent.unwrap_or(base.crime_fine_percent),

            gambling_enabled: patch.gambling_enabled.unwrap_or(base.gambling_enabled),
            gambling_min_bet: patch.gambling_min_bet.unwrap_or(base.gambling_min_bet),
            gambling_max_bet: patch.gambling_max_bet.unwrap_or(base.gambling_max_bet),
            gambling_cooldown: patch.gambling_cooldown.unwrap_or(base.gambling_cooldown),

            bank_enabled: patch.bank_enabled.unwrap_or(base.bank_enabled),
            bank_interest_rate: patch.bank_interest_rate.unwrap_or(base.bank_interest_rate),
            bank_interest_interval: patch
                .bank_interest_interval
                .unwrap_or(base.bank_interest_interval),

            robbery_enabled: patch.robbery_enabled.unwrap_or(base.robbery_enabled),
            robbery_min_balance: patch.robbery_min_balance.unwrap_or(base.robbery_min_balance),
            robbery_success_rate: patch
                .robbery_success_rate
                .unwrap_or(base.robbery_success_rate),
            robbery_max_percent: patch.robbery_max_percent.unwrap_or(base.robbery_max_percent),
            robbery_cooldown: patch.robbery_cooldown.unwrap_or(base.robbery_cooldown),
            robbery_jail_time: patch.robbery_jail_time.unwrap_or(base.robbery_jail_time),
        };

        let errors = merged.violations();
        if errors.is_empty() {
            Ok(merged)
        } else {
            Err(errors)
        }
    }

    /// Collects every violated invariant: amounts, durations, percentages, then
    /// min/max pairs.
    fn violations(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let amounts = [
            ("startingBalance", self.starting_balance),
            ("maxBalance", self.max_balance),
            ("maxBank", self.max_bank),
            ("dailyReward", self.daily_reward),
            ("workMinReward", self.work_min_reward),
            ("workMaxReward", self.work_max_reward),
            ("crimeMinReward", self.crime_min_reward),
            ("crimeMaxReward", self.crime_max_reward),
            ("gamblingMinBet", self.gambling_min_bet),
            ("gamblingMaxBet", self.gambling_max_bet),
            ("robberyMinBalance", self.robbery_min_balance),
        ];
        let durations = [
            ("workCooldown", self.work_cooldown),
            ("crimeCooldown", self.crime_cooldown),
            ("gamblingCooldown", self.gambling_cooldown),
            ("bankInterestInterval", self.bank_interest_interval),
            ("robberyCooldown", self.robbery_cooldown),
            ("robberyJailTime", self.robbery_jail_time),
        ];
        let bounded = [
            (&amounts[..], MAX_AMOUNT),
            (&durations[..], MAX_DURATION_SECONDS),
        ];
        for (fields, bound) in bounded {
            for &(field, value) in fields {
                if value < 0 {
                    errors.push(ValidationError::Negative { field, value });
                } else if value > bound {
                    errors.push(ValidationError::OutOfRange {
                        field,
                        value: value as f64,
                        min: 0.0,
                        max: Some(bound as f64),
                    });
                }
            }
        }

        let percentages = [
            ("dailyStreakBonus", self.daily_streak_bonus as f64),
            ("crimeSuccessRate", self.crime_success_rate as f64),
            ("crimeFinePercent", self.crime_fine_percent as f64),
            ("bankInterestRate", self.bank_interest_rate),
            ("robberySuccessRate", self.robbery_success_rate as f64),
            ("robberyMaxPercent", self.robbery_max_percent as f64),
        ];
        for (field, value) in percentages {
            // NaN fails the range check as well
            if !(0.0..=100.0).contains(&value) {
                errors.push(ValidationError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: Some(100.0),
                });
            }
        }

        if self.daily_streak_max < 1 {
            errors.push(ValidationError::OutOfRange {
                field: "dailyStreakMax",
                value: self.daily_streak_max as f64,
                min: 1.0,
                max: None,
            });
        }

        let mut ordered = vec![
            (
                ("workMinReward", self.work_min_reward),
                ("workMaxReward", self.work_max_reward),
            ),
            (
                ("crimeMinReward", self.crime_min_reward),
                ("crimeMaxReward", self.crime_max_reward),
            ),
        ];
        if self.gambling_max_bet != 0 {
            ordered.push((
                ("gamblingMinBet", self.gambling_min_bet),
                ("gamblingMaxBet", self.gambling_max_bet),
            ));
        }
        for ((min_field, min), (max_field, max)) in ordered {
            if min > max {
                errors.push(ValidationError::InvalidRange {
                    min_field,
                    max_field,
                    min,
                    max,
                });
            }
        }

        errors
    }

    /// Converts the configuration to its API representation.
    pub fn into_dto(self) -> EconomyConfigDto {
        EconomyConfigDto {
            enabled: self.enabled,
            currency_name: self.currency_name,
            currency_symbol: self.currency_symbol,
            starting_balance: self.starting_balance,
            max_balance: self.max_balance,
            max_bank: self.max_bank,
            daily_reward: self.daily_reward,
            daily_streak_bonus: self.daily_streak_bonus,
            daily_streak_max: self.daily_streak_max,
            work_min_reward: self.work_min_reward,
            work_max_reward: self.work_max_reward,
            work_cooldown: self.work_cooldown,
            crime_min_reward: self.crime_min_reward,
            crime_max_reward: self.crime_max_reward,
            crime_cooldown: self.crime_cooldown,
            crime_success_rate: self.crime_success_rate,
            crime_fine_percent: self.crime_fine_percent,
            gambling_enabled: self.gambling_enabled,
            gambling_min_bet: self.gambling_min_bet,
            gambling_max_bet: self.gambling_max_bet,
            gambling_cooldown: self.gambling_cooldown,
            bank_enabled: self.bank_enabled,
            bank_interest_rate: self.bank_interest_rate,
            bank_interest_interval: self.bank_interest_interval,
            robbery_enabled: self.robbery_enabled,
            robbery_min_balance: self.robbery_min_balance,
            robbery_success_rate: self.robbery_success_rate,
            robbery_max_percent: self.robbery_max_percent,
            robbery_cooldown: self.robbery_cooldown,
            robbery_jail_time: self.robbery_jail_time,
        }
    }
}

impl From<UpdateEconomyConfigDto> for EconomyConfigPatch {
    fn from(dto: UpdateEconomyConfigDto) -> Self {
        Self {
            enabled: dto.enabled,
            currency_name: dto.currency_name,
            currency_symbol: dto.currency_symbol,
            starting_balance: dto.starting_balance,
            max_balance: dto.max_balance,
            max_bank: dto.max_bank,
            daily_reward: dto.daily_reward,
            daily_streak_bonus: dto.daily_streak_bonus,
            daily_streak_max: dto.daily_streak_max,
            work_min_reward: dto.work_min_reward,
            work_max_reward: dto.work_max_reward,
            work_cooldown: dto.work_cooldown,
            crime_min_reward: dto.crime_min_reward,
            crime_max_reward: dto.crime_max_reward,
            crime_cooldown: dto.crime_cooldown,
            crime_success_rate: dto.crime_success_rate,
            crime_fine_percent: dto.crime_fine_percent,
            gambling_enabled: dto.gambling_enabled,
            gambling_min_bet: dto.gambling_min_bet,
            gambling_max_bet: dto.gambling_max_bet,
            gambling_cooldown: dto.gambling_cooldown,
            bank_enabled: dto.bank_enabled,
            bank_interest_rate: dto.bank_interest_rate,
            bank_interest_interval: dto.bank_interest_interval,
            robbery_enabled: dto.robbery_enabled,
            robbery_min_balance: dto.robbery_min_balance,
            robbery_success_rate: dto.robbery_success_rate,
            robbery_max_percent: dto.robbery_max_percent,
            robbery_cooldown: dto.robbery_cooldown,
            robbery_jail_time: dto.robbery_jail_time,
        }
    }
}
