//! Economy actions and their outcomes.

use chrono::{DateTime, Utc};

use crate::model::economy::{ActionKindDto, ActionRequestDto, ActionResultDto};
use crate::server::{error::AppError, util::parse::parse_u64_from_str};

/// An action requested by a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyAction {
    Daily,
    Work,
    Crime,
    Gamble { bet: i64 },
    Rob { target_id: u64 },
    Deposit { amount: i64 },
    Withdraw { amount: i64 },
}

impl EconomyAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Daily => ActionKind::Daily,
            Self::Work => ActionKind::Work,
            Self::Crime => ActionKind::Crime,
            Self::Gamble { .. } => ActionKind::Gamble,
            Self::Rob { .. } => ActionKind::Rob,
            Self::Deposit { .. } => ActionKind::Deposit,
            Self::Withdraw { .. } => ActionKind::Withdraw,
        }
    }

    /// Builds an action from an API request.
    ///
    /// # Returns
    /// - `Ok(EconomyAction)` - Request carried every parameter its action needs
    /// - `Err(AppError::BadRequest)` - Missing `amount` or `targetId`, or an unparsable
    ///   target ID
    pub fn from_request(dto: &ActionRequestDto) -> Result<Self, AppError> {
        let amount = || {
            dto.amount
                .ok_or_else(|| AppError::BadRequest("Missing field 'amount'".to_string()))
        };

        Ok(match dto.action {
            ActionKindDto::Daily => Self::Daily,
            ActionKindDto::Work => Self::Work,
            ActionKindDto::Crime => Self::Crime,
            ActionKindDto::Gamble => Self::Gamble { bet: amount()? },
            ActionKindDto::Deposit => Self::Deposit { amount: amount()? },
            ActionKindDto::Withdraw => Self::Withdraw { amount: amount()? },
            ActionKindDto::Rob => {
                let target = dto
                    .target_id
                    .as_deref()
                    .ok_or_else(|| AppError::BadRequest("Missing field 'targetId'".to_string()))?;
                let target_id = parse_u64_from_str(target)
                    .map_err(|_| AppError::BadRequest(format!("Invalid target ID '{}'", target)))?;

                Self::Rob { target_id }
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Daily,
    Work,
    Crime,
    Gamble,
    Rob,
    Deposit,
    Withdraw,
}

impl ActionKind {
    /// Lowercase name as used in slash commands and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Work => "work",
            Self::Crime => "crime",
            Self::Gamble => "gamble",
            Self::Rob => "rob",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }

    /// Cooldown slot tracked for this action, if any.
    pub fn cooldown(&self) -> Option<CooldownAction> {
        match self {
            Self::Daily => Some(CooldownAction::Daily),
            Self::Work => Some(CooldownAction::Work),
            Self::Crime => Some(CooldownAction::Crime),
            Self::Gamble => Some(CooldownAction::Gamble),
            Self::Rob => Some(CooldownAction::Rob),
            Self::Deposit | Self::Withdraw => None,
        }
    }

    pub fn into_dto(self) -> ActionKindDto {
        match self {
            Self::Daily => ActionKindDto::Daily,
            Self::Work => ActionKindDto::Work,
            Self::Crime => ActionKindDto::Crime,
            Self::Gamble => ActionKindDto::Gamble,
            Self::Rob => ActionKindDto::Rob,
            Self::Deposit => ActionKindDto::Deposit,
            Self::Withdraw => ActionKindDto::Withdraw,
        }
    }
}

/// Actions whose last use is timestamped on the member's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownAction {
    Daily,
    Work,
    Crime,
    Gamble,
    Rob,
}

impl CooldownAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Daily => ActionKind::Daily,
            Self::Work => ActionKind::Work,
            Self::Crime => ActionKind::Crime,
            Self::Gamble => ActionKind::Gamble,
            Self::Rob => ActionKind::Rob,
        }
    }
}

/// Feature switches an action can be refused under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyFeature {
    Economy,
    Gambling,
    Bank,
    Robbery,
}

impl EconomyFeature {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Gambling => "gambling",
            Self::Bank => "bank",
            Self::Robbery => "robbery",
        }
    }
}

/// Outcome of a committed action.
///
/// `amount` is the signed change to the actor's wallet: positive for rewards and
/// winnings, negative for fines and losses. Deposits report the amount moved out of
/// the wallet as negative and withdrawals as positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub action: ActionKind,
    pub success: bool,
    pub amount: i64,
    pub balance_after: i64,
    pub bank_after: i64,
    /// Streak after a daily claim.
    pub streak: Option<i64>,
    pub cooldown_expires_at: Option<DateTime<Utc>>,
    /// Set when a failed robbery jailed the actor.
    pub jailed_until: Option<DateTime<Utc>>,
}

impl ActionResult {
    pub fn into_dto(self) -> ActionResultDto {
        ActionResultDto {
            action: self.action.into_dto(),
            success: self.success,
            amount: self.amount,
            balance_after: self.balance_after,
            bank_after: self.bank_after,
            streak: self.streak,
            cooldown_expires_at: self.cooldown_expires_at,
            jailed_until: self.jailed_until,
        }
    }
}
