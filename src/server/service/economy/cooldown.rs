//! Per-action cooldown tracking.

use chrono::{DateTime, Utc};

use crate::server::model::economy::{action::CooldownAction, state::UserEconomyState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    Ready,
    OnCooldown { remaining: i64 },
}

/// Checks whether `action` may run at `now` and, if so, stamps it as used.
///
/// The action is ready when it was never used or when at least `cooldown_secs` have
/// elapsed since its last use; the boundary itself counts as ready. A zero cooldown is
/// always ready. A last use recorded after `now` (clock skew) counts as zero elapsed
/// time. The state is left untouched when the action is still cooling down.
///
/// # Arguments
/// - `state` - In-memory copy of the member's state
/// - `action` - Action whose timestamp is checked
/// - `now` - Current instant
/// - `cooldown_secs` - Configured cooldown in seconds
///
/// # Returns
/// - `CooldownStatus::Ready` - Timestamp updated to `now`
/// - `CooldownStatus::OnCooldown { remaining }` - Seconds left, always positive
pub fn check_and_consume(
    state: &mut UserEconomyState,
    action: CooldownAction,
    now: DateTime<Utc>,
    cooldown_secs: i64,
) -> CooldownStatus {
    if cooldown_secs > 0 {
        if let Some(last) = state.last_used(action) {
            let elapsed = (now - last).num_seconds().max(0);
            if elapsed < cooldown_secs {
                return CooldownStatus::OnCooldown {
                    remaining: cooldown_secs - elapsed,
                };
            }
        }
    }

    state.set_last_used(action, now);
    CooldownStatus::Ready
}
