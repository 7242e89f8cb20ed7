//! Six-field additive time offsets.
//!
//! An offset string is six whitespace-separated integers in the fixed order
//! seconds, minutes, hours, days, months, years — e.g. `"0 30 0 0 0 0"` for
//! "30 minutes later". Fields may be negative.

use chrono::{DateTime, Duration, Months, Utc};
use tracing::warn;

use crate::error::TimerError;

pub const OFFSET_FIELDS: usize = 6;

/// Apply an offset string to `base`.
///
/// Degrades instead of failing: a missing or empty offset returns `base`
/// unchanged, a wrong field count or a non-numeric field is logged and the
/// remaining fields are still applied (unparseable fields count as zero).
///
/// Fields are applied cumulatively in declaration order. Month and year
/// arithmetic is calendar-aware and clamps to the last valid day of the
/// target month (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).
pub fn apply_offset(base: DateTime<Utc>, offset: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = offset else {
        return base;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return base;
    }

    if raw.split_whitespace().count() != OFFSET_FIELDS {
        let err = TimerError::MalformedOffset(raw.to_string());
        warn!(error = %err, "applying parseable offset fields only");
    }

    let [seconds, minutes, hours, days, months, years] = field_values(raw);

    let shifted = base
        + Duration::seconds(seconds)
        + Duration::minutes(minutes)
        + Duration::hours(hours)
        + Duration::days(days);
    let shifted = add_months(shifted, months);
    add_months(shifted, years.saturating_mul(12))
}

/// Parse up to six integer fields, zero-defaulting anything unparseable.
fn field_values(raw: &str) -> [i64; OFFSET_FIELDS] {
    let mut out = [0i64; OFFSET_FIELDS];
    for (i, field) in raw.split_whitespace().take(OFFSET_FIELDS).enumerate() {
        out[i] = field.parse().unwrap_or_else(|_| {
            warn!(field, index = i, "non-numeric offset field, using 0");
            0
        });
    }
    out
}

/// Calendar-aware month shift; clamps day-of-month at the target month's end.
fn add_months(t: DateTime<Utc>, months: i64) -> DateTime<Utc> {
    if months == 0 {
        return t;
    }
    let magnitude = Months::new(months.unsigned_abs().min(u32::MAX as u64) as u32);
    let shifted = if months > 0 {
        t.checked_add_months(magnitude)
    } else {
        t.checked_sub_months(magnitude)
    };
    // None only at the edges of chrono's representable range
    shifted.unwrap_or(t)
}
