//! Classification of a timer spec's `time` field.
//!
//! Done once at registration and stored on the pending timer, so a firing
//! entry never re-derives what kind of timer it came from.

use chrono::{DateTime, Utc};

use hearth_core::types::{Coordinate, TargetState};

use crate::cron::resolve_cron_time;
use crate::error::{Result, TimerError};
use crate::sun::{resolve_solar_time, SolarEvent};

/// Where a timer's due time comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSource {
    /// Recurring, resolved from a cron expression.
    Cron(String),
    /// Recurring, resolved from the day's solar event table.
    Solar(SolarEvent),
    /// One-shot per matching device-state event; armed by a long-lived
    /// signal subscription rather than an initial resolution.
    Reactive(TargetState),
}

impl TimeSource {
    /// Classify a spec's `time` string.
    ///
    /// Solar event names win, then the closed device-state set; anything
    /// else is treated as a cron expression (validated at resolution time).
    pub fn classify(time: &str) -> TimeSource {
        if let Ok(event) = time.parse::<SolarEvent>() {
            return TimeSource::Solar(event);
        }
        if let Ok(state) = time.parse::<TargetState>() {
            return TimeSource::Reactive(state);
        }
        TimeSource::Cron(time.to_string())
    }

    /// Recurring sources are re-armed after each firing.
    pub fn is_recurring(&self) -> bool {
        matches!(self, TimeSource::Cron(_) | TimeSource::Solar(_))
    }

    /// Compute the next due time for a recurring source.
    ///
    /// The offset applies to solar resolution only; cron expressions
    /// already encode their own absolute schedule.
    pub fn next_due(
        &self,
        now: DateTime<Utc>,
        offset: Option<&str>,
        coordinate: Coordinate,
    ) -> Result<DateTime<Utc>> {
        match self {
            TimeSource::Cron(expression) => resolve_cron_time(expression, now),
            TimeSource::Solar(event) => resolve_solar_time(now, *event, offset, coordinate),
            TimeSource::Reactive(_) => Err(TimerError::Config(
                "reactive timers are armed by inbound signals, not resolved".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_names_classify_as_solar() {
        assert_eq!(
            TimeSource::classify("sunset"),
            TimeSource::Solar(SolarEvent::Sunset)
        );
        assert_eq!(
            TimeSource::classify("nauticalDawn"),
            TimeSource::Solar(SolarEvent::NauticalDawn)
        );
    }

    #[test]
    fn state_names_classify_as_reactive() {
        assert_eq!(
            TimeSource::classify("on"),
            TimeSource::Reactive(TargetState::On)
        );
        assert_eq!(
            TimeSource::classify("trigger"),
            TimeSource::Reactive(TargetState::Trigger)
        );
    }

    #[test]
    fn everything_else_classifies_as_cron() {
        assert_eq!(
            TimeSource::classify("0 8 * * *"),
            TimeSource::Cron("0 8 * * *".to_string())
        );
        // classification is by membership, not validity
        assert_eq!(
            TimeSource::classify("gibberish"),
            TimeSource::Cron("gibberish".to_string())
        );
    }

    #[test]
    fn recurrence_follows_the_variant() {
        assert!(TimeSource::classify("sunset").is_recurring());
        assert!(TimeSource::classify("* * * * *").is_recurring());
        assert!(!TimeSource::classify("on").is_recurring());
    }
}
