use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full economy configuration of a guild, with defaults filled in.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EconomyConfigDto {
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

/// Partial configuration update; absent fields keep their current value.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEconomyConfigDto {
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

/// One rejected configuration field.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorDto {
    #[serde(rename_all = "camelCase")]
    InvalidRange {
        min_field: String,
        max_field: String,
        min: i64,
        max: i64,
    },
    #[serde(rename_all = "camelCase")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Negative { field: String, value: i64 },
}

/// Body of a 400 response for a rejected configuration update.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ValidationErrorsDto {
    pub error: String,
    pub errors: Vec<FieldErrorDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKindDto {
    Daily,
    Work,
    Crime,
    Gamble,
    Rob,
    Deposit,
    Withdraw,
}

/// Request to perform an economy action on behalf of a member.
///
/// `amount` is the bet for `gamble` and the sum moved for `deposit`/`withdraw`;
/// `targetId` is the member robbed by `rob`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequestDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub action: ActionKindDto,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub target_id: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionResultDto {
    pub action: ActionKindDto,
    pub success: bool,
    pub amount: i64,
    pub balance_after: i64,
    pub bank_after: i64,
    pub streak: Option<i64>,
    pub cooldown_expires_at: Option<DateTime<Utc>>,
    pub jailed_until: Option<DateTime<Utc>>,
}

/// Typed refusal of an economy action.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum EconomyErrorDto {
    ModuleDisabled {
        feature: String,
    },
    #[serde(rename_all = "camelCase")]
    OnCooldown {
        action: ActionKindDto,
        remaining_seconds: i64,
        ready_at: DateTime<Utc>,
    },
    InvalidBet {
        bet: i64,
        min: i64,
        max: i64,
    },
    InsufficientFunds {
        required: i64,
        available: i64,
    },
    #[serde(rename_all = "camelCase")]
    TargetNotRobbable {
        target_wallet: i64,
        required: i64,
    },
    InvalidTarget,
    ActorJailed {
        until: DateTime<Utc>,
    },
    InvalidAmount {
        amount: i64,
    },
    BankFull {
        capacity: i64,
    },
    ConcurrentModification,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDto {
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub wallet: i64,
    pub bank: i64,
    pub daily_streak: i64,
    pub jailed_until: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub rank: u64,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub wallet: i64,
    pub bank: i64,
    pub net_worth: i64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardDto {
    pub entries: Vec<LeaderboardEntryDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

fn serialize_u64_as_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}

fn deserialize_u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    String::deserialize(deserializer)?
        .parse::<u64>()
        .map_err(D::Error::custom)
}
