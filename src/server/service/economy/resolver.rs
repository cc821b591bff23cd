//! Reward resolution for each economy action.
//!
//! Every function here is pure apart from drawing from the supplied [`RandomSource`]:
//! it receives in-memory copies of the members' state, applies the outcome to them and
//! reports what happened. Gating (feature switches, jail, cooldowns) is the caller's
//! job, as is persisting the mutated copies.

use chrono::{DateTime, Utc};

use crate::server::{
    error::economy::EconomyError,
    model::economy::{
        config::{EconomyConfig, STREAK_RESET_SECONDS},
        state::{capped_credit, UserEconomyState},
    },
    service::economy::random::RandomSource,
    util::time::add_seconds,
};

/// What an action did to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub success: bool,
    /// Signed change to the actor's wallet.
    pub amount: i64,
    pub streak: Option<i64>,
    pub jailed_until: Option<DateTime<Utc>>,
}

impl Resolution {
    fn succeeded(amount: i64) -> Self {
        Self {
            success: true,
            amount,
            streak: None,
            jailed_until: None,
        }
    }

    fn failed(amount: i64) -> Self {
        Self {
            success: false,
            ..Self::succeeded(amount)
        }
    }
}

/// Claims the daily reward.
///
/// The bonus is based on the streak of consecutive claims before this one, capped at
/// `daily_streak_max`. A streak whose last claim is more than 48 hours old has lapsed.
///
/// # Arguments
/// - `previous_claim` - `last_daily_at` as it was before the cooldown stamped `now`
pub fn resolve_daily(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    previous_claim: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Resolution {
    let prior_streak = match previous_claim {
        Some(last) if (now - last).num_seconds() <= STREAK_RESET_SECONDS => {
            state.daily_streak.max(0)
        }
        _ => 0,
    };

    let bonus_steps = prior_streak.min(config.daily_streak_max) as i128;
    let reward = (config.daily_reward as i128 * (100 + bonus_steps * config.daily_streak_bonus as i128)
        / 100)
        .clamp(0, i64::MAX as i128) as i64;

    state.daily_streak = prior_streak + 1;
    let credited = state.credit_wallet(reward, config.max_balance);

    Resolution {
        streak: Some(state.daily_streak),
        ..Resolution::succeeded(credited)
    }
}

/// Pays a uniform reward from the work range. Always succeeds.
pub fn resolve_work<R: RandomSource>(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    rng: &mut R,
) -> Resolution {
    let reward = rng.uniform_in(config.work_min_reward, config.work_max_reward);

    Resolution::succeeded(state.credit_wallet(reward, config.max_balance))
}

/// Attempts a crime: a reward from the crime range on success, a fine of
/// `crime_fine_percent` of the wallet on failure.
pub fn resolve_crime<R: RandomSource>(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    rng: &mut R,
) -> Resolution {
    if succeeds(rng, config.crime_success_rate) {
        let reward = rng.uniform_in(config.crime_min_reward, config.crime_max_reward);
        return Resolution::succeeded(state.credit_wallet(reward, config.max_balance));
    }

    let fine = percent_of(state.wallet.max(0), config.crime_fine_percent);
    let debited = state.debit_wallet(fine);

    Resolution::failed(-debited)
}

/// Checks a bet against the configured bounds and the actor's wallet.
///
/// # Returns
/// - `Ok(())` - Bet can be placed
/// - `Err(EconomyError::InvalidBet)` - Bet not positive, below the minimum or above
///   a non-zero maximum
/// - `Err(EconomyError::InsufficientFunds)` - Bet exceeds the wallet
pub fn validate_bet(
    state: &UserEconomyState,
    config: &EconomyConfig,
    bet: i64,
) -> Result<(), EconomyError> {
    let above_max = config.gambling_max_bet > 0 && bet > config.gambling_max_bet;
    if bet <= 0 || bet < config.gambling_min_bet || above_max {
        return Err(EconomyError::InvalidBet {
            bet,
            min: config.gambling_min_bet,
            max: config.gambling_max_bet,
        });
    }

    if bet > state.wallet {
        return Err(EconomyError::InsufficientFunds {
            required: bet,
            available: state.wallet,
        });
    }

    Ok(())
}

/// Even-money bet: a win pays the bet (capped at `max_balance`), a loss forfeits it.
///
/// The bet must have passed [`validate_bet`].
pub fn resolve_gamble<R: RandomSource>(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    bet: i64,
    rng: &mut R,
) -> Result<Resolution, EconomyError> {
    validate_bet(state, config, bet)?;

    if rng.next_unit() < 0.5 {
        Ok(Resolution::succeeded(
            state.credit_wallet(bet, config.max_balance),
        ))
    } else {
        Ok(Resolution::failed(-state.debit_wallet(bet)))
    }
}

/// Attempts to rob `target`.
///
/// On success a random share of up to `robbery_max_percent` of the target's wallet
/// moves to the actor; the target loses exactly what the actor receives after the
/// actor's balance cap. On failure the actor is jailed for `robbery_jail_time` and no
/// money moves.
pub fn resolve_rob<R: RandomSource>(
    actor: &mut UserEconomyState,
    target: &mut UserEconomyState,
    config: &EconomyConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Resolution {
    if !succeeds(rng, config.robbery_success_rate) {
        let until = add_seconds(now, config.robbery_jail_time);
        actor.jailed_until = Some(until);

        return Resolution {
            jailed_until: Some(until),
            ..Resolution::failed(0)
        };
    }

    let target_wallet = target.wallet.max(0);
    let share = target_wallet as f64 * config.robbery_max_percent as f64 / 100.0 * rng.next_unit();
    let stolen = (share.floor() as i64).clamp(0, target_wallet);

    let received = actor.credit_wallet(stolen, config.max_balance);
    target.debit_wallet(received);

    Resolution::succeeded(received)
}

/// Moves `amount` from the wallet into the bank.
///
/// Interest is counted from the moment an empty bank receives its first deposit.
///
/// # Returns
/// - `Ok(Resolution)` - Funds moved; `amount` is negative
/// - `Err(EconomyError::InvalidAmount)` - Amount is not positive
/// - `Err(EconomyError::InsufficientFunds)` - Wallet holds less than `amount`
/// - `Err(EconomyError::BankFull)` - Deposit would exceed a non-zero `max_bank`
pub fn resolve_deposit(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<Resolution, EconomyError> {
    if amount <= 0 {
        return Err(EconomyError::InvalidAmount { amount });
    }
    if amount > state.wallet {
        return Err(EconomyError::InsufficientFunds {
            required: amount,
            available: state.wallet,
        });
    }
    if capped_credit(state.bank, amount, config.max_bank) < amount {
        return Err(EconomyError::BankFull {
            capacity: config.max_bank.saturating_sub(state.bank).max(0),
        });
    }

    if state.bank <= 0 {
        state.last_interest_at = Some(now);
    }
    state.wallet -= amount;
    state.bank += amount;

    Ok(Resolution::succeeded(-amount))
}

/// Moves `amount` from the bank into the wallet.
///
/// # Returns
/// - `Ok(Resolution)` - Funds moved; `amount` is positive
/// - `Err(EconomyError::InvalidAmount)` - Amount is not positive, or the wallet cannot
///   hold it under `max_balance`
/// - `Err(EconomyError::InsufficientFunds)` - Bank holds less than `amount`
pub fn resolve_withdraw(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    amount: i64,
) -> Result<Resolution, EconomyError> {
    if amount <= 0 {
        return Err(EconomyError::InvalidAmount { amount });
    }
    if amount > state.bank {
        return Err(EconomyError::InsufficientFunds {
            required: amount,
            available: state.bank,
        });
    }
    if capped_credit(state.wallet, amount, config.max_balance) < amount {
        return Err(EconomyError::InvalidAmount { amount });
    }

    state.bank -= amount;
    state.wallet += amount;

    Ok(Resolution::succeeded(amount))
}

/// Effect of an interest run on one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestOutcome {
    /// Nothing to write.
    Unchanged,
    /// First run for this account; the anchor was set without credit.
    Anchored,
    /// Whole periods were compounded and the anchor advanced.
    Credited { interest: i64, periods: i64 },
}

/// Compounds `bank_interest_rate` percent for every whole interval elapsed since the
/// account's anchor, capped at `max_bank`.
///
/// The anchor advances by whole intervals only, so running again at the same `now`
/// changes nothing.
pub fn accrue_interest(
    state: &mut UserEconomyState,
    config: &EconomyConfig,
    now: DateTime<Utc>,
) -> InterestOutcome {
    let interval = config.bank_interest_interval;
    if !config.bank_enabled || interval <= 0 || state.bank <= 0 {
        return InterestOutcome::Unchanged;
    }

    let Some(anchor) = state.last_interest_at else {
        state.last_interest_at = Some(now);
        return InterestOutcome::Anchored;
    };

    let periods = (now - anchor).num_seconds() / interval;
    if periods <= 0 {
        return InterestOutcome::Unchanged;
    }

    let mut interest = 0i64;
    for _ in 0..periods {
        let gain = ((state.bank as f64 * config.bank_interest_rate / 100.0).floor() as i64).max(0);
        let credited = capped_credit(state.bank, gain, config.max_bank);
        if credited == 0 || state.bank == i64::MAX {
            break;
        }

        state.bank = state.bank.saturating_add(credited);
        interest = interest.saturating_add(credited);
    }

    state.last_interest_at = Some(add_seconds(anchor, periods.saturating_mul(interval)));

    InterestOutcome::Credited { interest, periods }
}

fn succeeds<R: RandomSource>(rng: &mut R, rate_percent: i64) -> bool {
    rng.next_unit() < rate_percent as f64 / 100.0
}

fn percent_of(value: i64, percent: i64) -> i64 {
    (value as i128 * percent as i128 / 100) as i64
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::server::service::economy::random::{RngSource, SequenceSource};

    fn state_with_wallet(wallet: i64) -> UserEconomyState {
        let mut state = UserEconomyState::new(1, 10, &EconomyConfig::default());
        state.wallet = wallet;
        state
    }

    mod daily {
        use super::*;

        #[test]
        fn first_claim_pays_base_reward() {
            let now = Utc::now();
            let mut state = state_with_wallet(0);

            let result = resolve_daily(&mut state, &EconomyConfig::default(), None, now);

            assert_eq!(result.amount, 100);
            assert_eq!(result.streak, Some(1));
            assert_eq!(state.wallet, 100);
        }

        #[test]
        fn streak_bonus_is_capped() {
            let now = Utc::now();
            let config = EconomyConfig::default();
            let mut state = state_with_wallet(0);
            state.daily_streak = 10;

            let result = resolve_daily(
                &mut state,
                &config,
                Some(now - Duration::hours(25)),
                now,
            );

            // 100 * (100 + 7 * 10) / 100
            assert_eq!(result.amount, 170);
            assert_eq!(state.daily_streak, 11);
        }

        #[test]
        fn reward_at_cap_equals_reward_beyond_cap() {
            let now = Utc::now();
            let config = EconomyConfig::default();
            let previous = Some(now - Duration::hours(24));

            let mut at_cap = state_with_wallet(0);
            at_cap.daily_streak = config.daily_streak_max;
            let mut beyond = state_with_wallet(0);
            beyond.daily_streak = config.daily_streak_max + 20;

            assert_eq!(
                resolve_daily(&mut at_cap, &config, previous, now).amount,
                resolve_daily(&mut beyond, &config, previous, now).amount
            );
        }

        #[test]
        fn lapsed_streak_resets() {
            let now = Utc::now();
            let mut state = state_with_wallet(0);
            state.daily_streak = 5;

            let result = resolve_daily(
                &mut state,
                &EconomyConfig::default(),
                Some(now - Duration::hours(49)),
                now,
            );

            assert_eq!(result.amount, 100);
            assert_eq!(result.streak, Some(1));
        }

        #[test]
        fn credit_is_capped_at_max_balance() {
            let now = Utc::now();
            let config = EconomyConfig {
                max_balance: 1_050,
                ..Default::default()
            };
            let mut state = state_with_wallet(1_000);

            let result = resolve_daily(&mut state, &config, None, now);

            assert_eq!(result.amount, 50);
            assert_eq!(state.wallet, 1_050);
        }
    }

    mod work {
        use super::*;

        #[test]
        fn reward_stays_within_bounds() {
            let config = EconomyConfig::default();
            let mut rng = RngSource(StdRng::seed_from_u64(42));

            for _ in 0..10_000 {
                let mut state = state_with_wallet(0);
                let result = resolve_work(&mut state, &config, &mut rng);

                assert!(result.success);
                assert!((config.work_min_reward..=config.work_max_reward).contains(&result.amount));
            }
        }
    }

    mod crime {
        use super::*;

        #[test]
        fn success_pays_from_crime_range() {
            let config = EconomyConfig::default();
            let mut state = state_with_wallet(0);
            let mut rng = SequenceSource::new([0.1, 0.0]);

            let result = resolve_crime(&mut state, &config, &mut rng);

            assert!(result.success);
            assert_eq!(result.amount, config.crime_min_reward);
        }

        #[test]
        fn failure_fines_share_of_wallet() {
            let config = EconomyConfig::default();
            let mut state = state_with_wallet(1_000);
            let mut rng = SequenceSource::new([0.9]);

            let result = resolve_crime(&mut state, &config, &mut rng);

            assert!(!result.success);
            assert_eq!(result.amount, -250);
            assert_eq!(state.wallet, 750);
        }

        #[test]
        fn fine_rounds_down() {
            let config = EconomyConfig::default();
            let mut state = state_with_wallet(10);
            let mut rng = SequenceSource::new([0.9]);

            let result = resolve_crime(&mut state, &config, &mut rng);

            assert_eq!(result.amount, -2);
            assert_eq!(state.wallet, 8);
        }

        #[test]
        fn fine_never_makes_wallet_negative() {
            let config = EconomyConfig {
                crime_fine_percent: 100,
                ..Default::default()
            };
            let mut rng = SequenceSource::new([0.99]);

            for wallet in [0, 1, 7, 999] {
                let mut state = state_with_wallet(wallet);
                resolve_crime(&mut state, &config, &mut rng);

                assert!(state.wallet >= 0);
            }
        }

        #[test]
        fn zero_success_rate_always_fails() {
            let config = EconomyConfig {
                crime_success_rate: 0,
                ..Default::default()
            };
            let mut state = state_with_wallet(100);
            let mut rng = SequenceSource::new([0.0]);

            assert!(!resolve_crime(&mut state, &config, &mut rng).success);
        }
    }

    mod gamble {
        use super::*;

        #[test]
        fn rejects_bet_outside_bounds() {
            let config = EconomyConfig::default();
            let state = state_with_wallet(100_000);

            for bet in [0, -5, 9, 10_001] {
                assert!(matches!(
                    validate_bet(&state, &config, bet),
                    Err(EconomyError::InvalidBet { .. })
                ));
            }
        }

        #[test]
        fn rejects_bet_above_wallet() {
            let state = state_with_wallet(40);

            assert!(matches!(
                validate_bet(&state, &EconomyConfig::default(), 50),
                Err(EconomyError::InsufficientFunds {
                    required: 50,
                    available: 40
                })
            ));
        }

        #[test]
        fn unlimited_max_bet() {
            let config = EconomyConfig {
                gambling_max_bet: 0,
                ..Default::default()
            };

            assert!(validate_bet(&state_with_wallet(1_000_000), &config, 500_000).is_ok());
        }

        #[test]
        fn win_pays_bet_and_loss_forfeits_it() {
            let config = EconomyConfig::default();

            let mut winner = state_with_wallet(100);
            let won = resolve_gamble(&mut winner, &config, 50, &mut SequenceSource::new([0.2])).unwrap();
            assert_eq!(won.amount, 50);
            assert_eq!(winner.wallet, 150);

            let mut loser = state_with_wallet(100);
            let lost = resolve_gamble(&mut loser, &config, 50, &mut SequenceSource::new([0.5])).unwrap();
            assert!(!lost.success);
            assert_eq!(lost.amount, -50);
            assert_eq!(loser.wallet, 50);
        }
    }

    mod rob {
        use super::*;

        #[test]
        fn success_transfers_share_of_target_wallet() {
            let now = Utc::now();
            let config = EconomyConfig::default();
            let mut actor = state_with_wallet(0);
            let mut target = state_with_wallet(1_000);
            let mut rng = SequenceSource::new([0.1, 0.5]);

            let result = resolve_rob(&mut actor, &mut target, &config, &mut rng, now);

            // 1000 * 20% * 0.5
            assert!(result.success);
            assert_eq!(result.amount, 100);
            assert_eq!(actor.wallet, 100);
            assert_eq!(target.wallet, 900);
        }

        #[test]
        fn transfer_conserves_money_under_cap() {
            let now = Utc::now();
            let config = EconomyConfig {
                max_balance: 1_030,
                ..Default::default()
            };
            let mut actor = state_with_wallet(1_000);
            let mut target = state_with_wallet(1_000);
            let mut rng = SequenceSource::new([0.0, 0.99]);

            let result = resolve_rob(&mut actor, &mut target, &config, &mut rng, now);

            assert_eq!(result.amount, 30);
            assert_eq!(actor.wallet + target.wallet, 2_000);
        }

        #[test]
        fn failure_jails_actor_without_moving_money() {
            let now = Utc::now();
            let config = EconomyConfig::default();
            let mut actor = state_with_wallet(500);
            let mut target = state_with_wallet(1_000);
            let mut rng = SequenceSource::new([0.9]);

            let result = resolve_rob(&mut actor, &mut target, &config, &mut rng, now);

            assert!(!result.success);
            assert_eq!(result.jailed_until, Some(now + Duration::seconds(3600)));
            assert_eq!(actor.jailed_until, result.jailed_until);
            assert_eq!(actor.wallet, 500);
            assert_eq!(target.wallet, 1_000);
        }
    }

    mod bank {
        use super::*;

        #[test]
        fn deposit_moves_wallet_to_bank_and_anchors_interest() {
            let now = Utc::now();
            let mut state = state_with_wallet(300);

            let result = resolve_deposit(&mut state, &EconomyConfig::default(), 200, now).unwrap();

            assert_eq!(result.amount, -200);
            assert_eq!((state.wallet, state.bank), (100, 200));
            assert_eq!(state.last_interest_at, Some(now));
        }

        #[test]
        fn deposit_rejects_full_bank() {
            let config = EconomyConfig {
                max_bank: 500,
                ..Default::default()
            };
            let mut state = state_with_wallet(1_000);
            state.bank = 450;

            let err = resolve_deposit(&mut state, &config, 100, Utc::now()).unwrap_err();

            assert!(matches!(err, EconomyError::BankFull { capacity: 50 }));
            assert_eq!(state.bank, 450);
        }

        #[test]
        fn deposit_rejects_non_positive_and_excess_amounts() {
            let mut state = state_with_wallet(100);
            let config = EconomyConfig::default();

            assert!(matches!(
                resolve_deposit(&mut state, &config, 0, Utc::now()),
                Err(EconomyError::InvalidAmount { amount: 0 })
            ));
            assert!(matches!(
                resolve_deposit(&mut state, &config, 101, Utc::now()),
                Err(EconomyError::InsufficientFunds { .. })
            ));
        }

        #[test]
        fn withdraw_respects_bank_and_wallet_cap() {
            let config = EconomyConfig {
                max_balance: 150,
                ..Default::default()
            };
            let mut state = state_with_wallet(100);
            state.bank = 300;

            assert!(matches!(
                resolve_withdraw(&mut state, &config, 400),
                Err(EconomyError::InsufficientFunds { .. })
            ));
            assert!(matches!(
                resolve_withdraw(&mut state, &config, 60),
                Err(EconomyError::InvalidAmount { amount: 60 })
            ));

            let result = resolve_withdraw(&mut state, &config, 50).unwrap();
            assert_eq!(result.amount, 50);
            assert_eq!((state.wallet, state.bank), (150, 250));
        }
    }

    mod interest {
        use super::*;

        fn banked(bank: i64, anchor: Option<DateTime<Utc>>) -> UserEconomyState {
            let mut state = state_with_wallet(0);
            state.bank = bank;
            state.last_interest_at = anchor;
            state
        }

        #[test]
        fn first_run_anchors_without_credit() {
            let now = Utc::now();
            let mut state = banked(1_000, None);

            let outcome = accrue_interest(&mut state, &EconomyConfig::default(), now);

            assert_eq!(outcome, InterestOutcome::Anchored);
            assert_eq!(state.bank, 1_000);
            assert_eq!(state.last_interest_at, Some(now));
        }

        #[test]
        fn compounds_whole_periods_and_advances_anchor() {
            let now = Utc::now();
            let anchor = now - Duration::days(2) - Duration::hours(5);
            let mut state = banked(1_000, Some(anchor));

            let outcome = accrue_interest(&mut state, &EconomyConfig::default(), now);

            // 1000 -> 1010 -> 1020
            assert_eq!(
                outcome,
                InterestOutcome::Credited {
                    interest: 20,
                    periods: 2
                }
            );
            assert_eq!(state.bank, 1_020);
            assert_eq!(state.last_interest_at, Some(anchor + Duration::days(2)));
        }

        #[test]
        fn repeated_run_at_same_instant_is_idempotent() {
            let now = Utc::now();
            let config = EconomyConfig::default();
            let mut state = banked(5_000, Some(now - Duration::days(3)));

            accrue_interest(&mut state, &config, now);
            let after_first = state.clone();
            let outcome = accrue_interest(&mut state, &config, now);

            assert_eq!(outcome, InterestOutcome::Unchanged);
            assert_eq!(state, after_first);
        }

        #[test]
        fn interest_is_capped_at_max_bank() {
            let now = Utc::now();
            let config = EconomyConfig {
                max_bank: 1_005,
                ..Default::default()
            };
            let mut state = banked(1_000, Some(now - Duration::days(5)));

            accrue_interest(&mut state, &config, now);

            assert_eq!(state.bank, 1_005);
        }

        #[test]
        fn disabled_bank_or_zero_interval_is_noop() {
            let now = Utc::now();
            let anchor = Some(now - Duration::days(3));

            for config in [
                EconomyConfig {
                    bank_enabled: false,
                    ..Default::default()
                },
                EconomyConfig {
                    bank_interest_interval: 0,
                    ..Default::default()
                },
            ] {
                let mut state = banked(1_000, anchor);
                assert_eq!(
                    accrue_interest(&mut state, &config, now),
                    InterestOutcome::Unchanged
                );
                assert_eq!(state.bank, 1_000);
            }
        }
    }
}
