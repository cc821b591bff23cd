use chrono::{DateTime, TimeDelta, Utc};

/// `at` moved by `seconds`, clamped to the representable range instead of overflowing.
pub fn add_seconds(at: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(if seconds < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_ordinary_offsets() {
        let now = Utc::now();

        assert_eq!(add_seconds(now, 90), now + TimeDelta::seconds(90));
        assert_eq!(add_seconds(now, -90), now - TimeDelta::seconds(90));
    }

    #[test]
    fn clamps_instead_of_overflowing() {
        let now = Utc::now();

        assert_eq!(add_seconds(now, i64::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(add_seconds(now, 1_000_000_000_000_000), DateTime::<Utc>::MAX_UTC);
        assert_eq!(add_seconds(now, i64::MIN), DateTime::<Utc>::MIN_UTC);
    }
}
