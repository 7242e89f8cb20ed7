//! Cron-based time resolution.
//!
//! Accepts standard 5-field Unix expressions (min hour dom month dow) as
//! well as the 6/7-field form the `cron` crate parses natively; 5-field
//! input gets a `0` seconds field prepended.

use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;

use crate::error::{Result, TimerError};

/// Earliest occurrence of `expression` strictly after `now`.
pub fn resolve_cron_time(expression: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let normalized = normalize(expression);
    let schedule = Schedule::from_str(&normalized).map_err(|e| TimerError::InvalidCronExpression {
        expression: expression.to_string(),
        reason: e.to_string(),
    })?;

    schedule
        .after(&now)
        .next()
        .ok_or_else(|| TimerError::InvalidCronExpression {
            expression: expression.to_string(),
            reason: "no upcoming occurrence".to_string(),
        })
}

/// Prepend a seconds field to 5-field Unix expressions.
fn normalize(expression: &str) -> String {
    if expression.split_whitespace().count() == 5 {
        format!("0 {expression}")
    } else {
        expression.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn next_occurrence_is_strictly_after_now() {
        // now is exactly on a match — the result must be the following one
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let next = resolve_cron_time("0 8 * * *", now).unwrap();
        assert!(next > now);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 2, 8, 0, 0).unwrap());
    }

    #[test]
    fn five_field_expression_is_accepted() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 2, 30).unwrap();
        let next = resolve_cron_time("*/15 * * * *", now).unwrap();
        assert_eq!(next.minute(), 15);
        assert_eq!(next.second(), 0);
    }

    #[test]
    fn six_field_expression_passes_through() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let next = resolve_cron_time("30 0 12 * * *", now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 30).unwrap());
    }

    #[test]
    fn invalid_expression_is_rejected() {
        let now = Utc::now();
        let err = resolve_cron_time("not a cron line", now).unwrap_err();
        assert!(matches!(err, TimerError::InvalidCronExpression { .. }));
    }
}
