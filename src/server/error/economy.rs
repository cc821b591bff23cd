use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    model::economy::EconomyErrorDto,
    server::{
        error::{store::StoreError, InternalServerError},
        model::economy::action::{ActionKind, EconomyFeature},
        util::time::add_seconds,
    },
};

/// Refusal or failure of an economy action.
///
/// Every variant except `Persistence` describes a rule that blocked the action; none of them
/// leave any state change behind.
#[derive(Error, Debug)]
pub enum EconomyError {
    /// The economy, or the feature the action belongs to, is switched off for the guild.
    #[error("The {} feature is disabled", feature.name())]
    ModuleDisabled { feature: EconomyFeature },

    /// The action was used too recently.
    #[error("{} is on cooldown for {remaining} more seconds", action.name())]
    OnCooldown {
        action: ActionKind,
        /// Seconds until the action is available again
        remaining: i64,
        /// Instant the cooldown was checked at
        now: DateTime<Utc>,
    },

    /// Bet is not positive or lies outside the configured bounds.
    ///
    /// `max` of 0 means there is no upper bound.
    #[error("Bet of {bet} is outside the allowed range")]
    InvalidBet { bet: i64, min: i64, max: i64 },

    #[error("Insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: i64, available: i64 },

    /// The robbery target holds less than the configured minimum.
    #[error("Target holds {target_wallet}, at least {required} is required to rob them")]
    TargetNotRobbable { target_wallet: i64, required: i64 },

    /// A member tried to rob themselves.
    #[error("Invalid robbery target")]
    InvalidTarget,

    /// The actor is in jail and may not commit crimes.
    #[error("Jailed until {until}")]
    ActorJailed { until: DateTime<Utc> },

    /// Deposit or withdrawal amount is not positive.
    #[error("Amount {amount} must be positive")]
    InvalidAmount { amount: i64 },

    /// The bank cannot hold the deposit.
    #[error("Bank is full, {capacity} more can be deposited")]
    BankFull { capacity: i64 },

    /// The member's state changed between load and commit.
    #[error("Economy state was modified concurrently, please retry")]
    ConcurrentModification,

    #[error(transparent)]
    Persistence(StoreError),
}

impl From<StoreError> for EconomyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => Self::ConcurrentModification,
            err => Self::Persistence(err),
        }
    }
}

impl EconomyError {
    /// Converts a rule refusal to its API representation.
    ///
    /// # Returns
    /// - `Some(EconomyErrorDto)` - For every refusal
    /// - `None` - For `Persistence`, whose details are not exposed
    pub fn into_dto(self) -> Option<EconomyErrorDto> {
        Some(match self {
            Self::ModuleDisabled { feature } => EconomyErrorDto::ModuleDisabled {
                feature: feature.name().to_string(),
            },
            Self::OnCooldown {
                action,
                remaining,
                now,
            } => EconomyErrorDto::OnCooldown {
                action: action.into_dto(),
                remaining_seconds: remaining,
                ready_at: add_seconds(now, remaining),
            },
            Self::InvalidBet { bet, min, max } => EconomyErrorDto::InvalidBet { bet, min, max },
            Self::InsufficientFunds {
                required,
                available,
            } => EconomyErrorDto::InsufficientFunds {
                required,
                available,
            },
            Self::TargetNotRobbable {
                target_wallet,
                required,
            } => EconomyErrorDto::TargetNotRobbable {
                target_wallet,
                required,
            },
            Self::InvalidTarget => EconomyErrorDto::InvalidTarget,
            Self::ActorJailed { until } => EconomyErrorDto::ActorJailed { until },
            Self::InvalidAmount { amount } => EconomyErrorDto::InvalidAmount { amount },
            Self::BankFull { capacity } => EconomyErrorDto::BankFull { capacity },
            Self::ConcurrentModification => EconomyErrorDto::ConcurrentModification,
            Self::Persistence(_) => return None,
        })
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::ModuleDisabled { .. } | Self::ActorJailed { .. } => StatusCode::FORBIDDEN,
            Self::OnCooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::ConcurrentModification => StatusCode::CONFLICT,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Converts economy errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Invalid bet, amount or target, insufficient funds, full bank
/// - 403 Forbidden - Disabled feature or jailed actor
/// - 409 Conflict - Concurrent modification, safe to retry
/// - 429 Too Many Requests - Action on cooldown
/// - 500 Internal Server Error - Store failure, with a generic message
impl IntoResponse for EconomyError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Persistence(err) => InternalServerError(err).into_response(),
            err => match err.into_dto() {
                Some(dto) => (status, Json(dto)).into_response(),
                None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            },
        }
    }
}
