//! Economy rules engine.
//!
//! [`EconomyService`] runs one member action end to end: it loads the guild
//! configuration and the member's state through an [`EconomyStore`], applies the gates
//! (feature switches, jail, cooldown), resolves the outcome and commits every changed
//! state in a single versioned write. A refused action writes nothing.

pub mod config;
pub mod cooldown;
pub mod random;
pub mod resolver;

#[cfg(test)]
mod test;

use chrono::{DateTime, Utc};

use crate::server::{
    data::economy::EconomyStore,
    error::{economy::EconomyError, store::StoreError},
    model::economy::{
        action::{ActionKind, ActionResult, CooldownAction, EconomyAction, EconomyFeature},
        config::{EconomyConfig, DAILY_COOLDOWN_SECONDS},
        state::{Leaderboard, UserEconomyState},
    },
    service::economy::{
        cooldown::{check_and_consume, CooldownStatus},
        random::RandomSource,
        resolver::{InterestOutcome, Resolution},
    },
    util::time::add_seconds,
};

/// Largest leaderboard page served.
pub const MAX_LEADERBOARD_PAGE_SIZE: u64 = 100;

/// Result of one interest run over a guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterestSummary {
    /// Accounts that received interest or had their anchor set
    pub accounts_updated: u64,
    pub total_interest: i64,
    /// Accounts whose write conflicted; they catch up on the next run
    pub skipped: u64,
}

pub struct EconomyService<'a, S: EconomyStore> {
    store: &'a S,
}

impl<'a, S: EconomyStore> EconomyService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Performs an action for a member and commits its outcome.
    ///
    /// Members seen for the first time start with the configured starting balance.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the action happens in
    /// - `user_id` - Acting member
    /// - `action` - Requested action and its parameters
    /// - `rng` - Source of the random draws
    /// - `now` - Current instant, used for cooldowns, streaks and jail time
    ///
    /// # Returns
    /// - `Ok(ActionResult)` - Outcome after the write committed
    /// - `Err(EconomyError::ConcurrentModification)` - The member's state changed
    ///   between load and commit; nothing was written
    /// - `Err(EconomyError)` - Any other refusal or a store failure
    pub async fn perform_action<R: RandomSource>(
        &self,
        guild_id: u64,
        user_id: u64,
        action: EconomyAction,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<ActionResult, EconomyError> {
        let kind = action.kind();
        let config = self.store.load_config(guild_id).await?;
        ensure_enabled(&config, kind)?;

        let mut actor = self.load_or_new(guild_id, user_id, &config).await?;

        let (resolution, target) = match action {
            EconomyAction::Daily => {
                let previous_claim = actor.last_daily_at;
                consume_cooldown(&mut actor, &config, CooldownAction::Daily, now)?;
                (
                    resolver::resolve_daily(&mut actor, &config, previous_claim, now),
                    None,
                )
            }
            EconomyAction::Work => {
                consume_cooldown(&mut actor, &config, CooldownAction::Work, now)?;
                (resolver::resolve_work(&mut actor, &config, rng), None)
            }
            EconomyAction::Crime => {
                ensure_free(&actor, now)?;
                consume_cooldown(&mut actor, &config, CooldownAction::Crime, now)?;
                (resolver::resolve_crime(&mut actor, &config, rng), None)
            }
            EconomyAction::Gamble { bet } => {
                consume_cooldown(&mut actor, &config, CooldownAction::Gamble, now)?;
                (
                    resolver::resolve_gamble(&mut actor, &config, bet, rng)?,
                    None,
                )
            }
            EconomyAction::Rob { target_id } => {
                if target_id == user_id {
                    return Err(EconomyError::InvalidTarget);
                }
                ensure_free(&actor, now)?;

                // Members with no record have nothing to take
                let Some(mut target) = self.store.load(guild_id, target_id).await? else {
                    return Err(EconomyError::TargetNotRobbable {
                        target_wallet: 0,
                        required: config.robbery_min_balance,
                    });
                };
                if target.wallet < config.robbery_min_balance {
                    return Err(EconomyError::TargetNotRobbable {
                        target_wallet: target.wallet,
                        required: config.robbery_min_balance,
                    });
                }

                consume_cooldown(&mut actor, &config, CooldownAction::Rob, now)?;
                let wallet_before = target.wallet;
                let resolution = resolver::resolve_rob(&mut actor, &mut target, &config, rng, now);

                // An untouched target is not written
                let target = (target.wallet != wallet_before).then_some(target);
                (resolution, target)
            }
            EconomyAction::Deposit { amount } => (
                resolver::resolve_deposit(&mut actor, &config, amount, now)?,
                None,
            ),
            EconomyAction::Withdraw { amount } => {
                (resolver::resolve_withdraw(&mut actor, &config, amount)?, None)
            }
        };

        let mut writes = vec![actor];
        writes.extend(target);
        let saved = self.store.commit(writes).await?;
        let actor = saved
            .into_iter()
            .next()
            .ok_or(EconomyError::ConcurrentModification)?;

        tracing::debug!(
            "{} by {} in guild {}: success={} amount={} wallet={}",
            kind.name(),
            user_id,
            guild_id,
            resolution.success,
            resolution.amount,
            actor.wallet
        );

        Ok(build_result(kind, resolution, &actor, &config, now))
    }

    /// Credits interest to every account of a guild with money in the bank.
    ///
    /// Each account is written on its own; an account whose write conflicts is skipped
    /// and catches up on the next run. Running twice with the same `now` credits nothing
    /// the second time.
    ///
    /// # Returns
    /// - `Ok(InterestSummary)` - Counts of updated and skipped accounts
    /// - `Err(EconomyError::Persistence)` - Store failure other than a conflict
    pub async fn accrue_interest(
        &self,
        guild_id: u64,
        now: DateTime<Utc>,
    ) -> Result<InterestSummary, EconomyError> {
        let config = self.store.load_config(guild_id).await?;
        let mut summary = InterestSummary::default();

        if !config.enabled || !config.bank_enabled || config.bank_interest_interval <= 0 {
            return Ok(summary);
        }

        for mut state in self.store.list_guild(guild_id).await? {
            let interest = match resolver::accrue_interest(&mut state, &config, now) {
                InterestOutcome::Unchanged => continue,
                InterestOutcome::Anchored => 0,
                InterestOutcome::Credited { interest, .. } => interest,
            };

            match self.store.commit(vec![state]).await {
                Ok(_) => {
                    summary.accounts_updated += 1;
                    summary.total_interest = summary.total_interest.saturating_add(interest);
                }
                Err(StoreError::Conflict) => summary.skipped += 1,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(summary)
    }

    /// Current balances of a member; unseen members report the starting balance.
    ///
    /// Nothing is written.
    pub async fn balance(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<UserEconomyState, EconomyError> {
        let config = self.store.load_config(guild_id).await?;

        self.load_or_new(guild_id, user_id, &config).await
    }

    /// Members of a guild ordered by wallet plus bank, richest first.
    ///
    /// Ties are ordered by user ID. `per_page` is capped at
    /// [`MAX_LEADERBOARD_PAGE_SIZE`].
    ///
    /// # Arguments
    /// - `page` - 0-based page index
    /// - `per_page` - Entries per page
    pub async fn leaderboard(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<Leaderboard, EconomyError> {
        let per_page = per_page.min(MAX_LEADERBOARD_PAGE_SIZE);

        let mut members = self.store.list_guild(guild_id).await?;
        members.sort_by(|a, b| {
            b.net_worth()
                .cmp(&a.net_worth())
                .then(a.user_id.cmp(&b.user_id))
        });

        let total = members.len() as u64;
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        let start = page.saturating_mul(per_page);
        let entries = members
            .into_iter()
            .enumerate()
            .skip(start as usize)
            .take(per_page as usize)
            .map(|(index, state)| (index as u64 + 1, state))
            .collect();

        Ok(Leaderboard {
            entries,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    async fn load_or_new(
        &self,
        guild_id: u64,
        user_id: u64,
        config: &EconomyConfig,
    ) -> Result<UserEconomyState, EconomyError> {
        Ok(self
            .store
            .load(guild_id, user_id)
            .await?
            .unwrap_or_else(|| UserEconomyState::new(guild_id, user_id, config)))
    }
}

fn ensure_enabled(config: &EconomyConfig, kind: ActionKind) -> Result<(), EconomyError> {
    let (enabled, feature) = match kind {
        _ if !config.enabled => (false, EconomyFeature::Economy),
        ActionKind::Gamble => (config.gambling_enabled, EconomyFeature::Gambling),
        ActionKind::Rob => (config.robbery_enabled, EconomyFeature::Robbery),
        ActionKind::Deposit | ActionKind::Withdraw => (config.bank_enabled, EconomyFeature::Bank),
        ActionKind::Daily | ActionKind::Work | ActionKind::Crime => return Ok(()),
    };

    if enabled {
        Ok(())
    } else {
        Err(EconomyError::ModuleDisabled { feature })
    }
}

fn ensure_free(state: &UserEconomyState, now: DateTime<Utc>) -> Result<(), EconomyError> {
    match state.jailed_until {
        Some(until) if state.is_jailed(now) => Err(EconomyError::ActorJailed { until }),
        _ => Ok(()),
    }
}

fn consume_cooldown(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    action: CooldownAction,
    now: DateTime<Utc>,
) -> Result<(), EconomyError> {
    match check_and_consume(state, action, now, cooldown_secs(config, action)) {
        CooldownStatus::Ready => Ok(()),
        CooldownStatus::OnCooldown { remaining } => Err(EconomyError::OnCooldown {
            action: action.kind(),
            remaining,
            now,
        }),
    }
}

fn cooldown_secs(config: &EconomyConfig, action: CooldownAction) -> i64 {
    match action {
        CooldownAction::Daily => DAILY_COOLDOWN_SECONDS,
        CooldownAction::Work => config.work_cooldown,
        CooldownAction::Crime => config.crime_cooldown,
        CooldownAction::Gamble => config.gambling_cooldown,
        CooldownAction::Rob => config.robbery_cooldown,
    }
}

fn build_result(
    kind: ActionKind,
    resolution: Resolution,
    actor: &UserEconomyState,
    config: &EconomyConfig,
    now: DateTime<Utc>,
) -> ActionResult {
    let cooldown_expires_at = kind
        .cooldown()
        .map(|action| cooldown_secs(config, action))
        .filter(|secs| *secs > 0)
        .map(|secs| add_seconds(now, secs));

    ActionResult {
        action: kind,
        success: resolution.success,
        amount: resolution.amount,
        balance_after: actor.wallet,
        bank_after: actor.bank,
        streak: resolution.streak,
        cooldown_expires_at,
        jailed_until: resolution.jailed_until,
    }
}
