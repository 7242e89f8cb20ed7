use thiserror::Error;

use crate::sun::SolarEvent;

/// Errors that can occur within the timer subsystem.
///
/// None of these is fatal to the engine: a failing spec is skipped or
/// degraded, sibling timers keep running.
#[derive(Debug, Error)]
pub enum TimerError {
    /// The offset string does not have exactly six fields. The caller still
    /// applies whatever fields parsed.
    #[error("Malformed offset '{0}': expected six fields (sec min hour day month year)")]
    MalformedOffset(String),

    /// The cron expression could not be parsed (or yields no occurrence).
    /// Fatal for that one timer only.
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCronExpression { expression: String, reason: String },

    /// The requested solar event does not occur at this coordinate on this
    /// date (polar day / polar night).
    #[error("Solar event '{event}' does not occur at {latitude}, {longitude} on this date")]
    SolarEventUnavailable {
        event: SolarEvent,
        latitude: f64,
        longitude: f64,
    },

    /// An entry was rejected at the queue boundary.
    #[error("Invalid queue entry: {0}")]
    InvalidQueueEntry(String),

    /// A timer spec is unusable as configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TimerError>;
