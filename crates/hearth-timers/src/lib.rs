//! `hearth-timers` — the timer scheduling engine.
//!
//! # Overview
//!
//! Device timers are classified once into a [`TimeSource`], resolved to a
//! due time, and parked in a [`TimerQueue`]. The [`SchedulerEngine`] sweeps
//! the queue on a fixed interval (one immediate sweep at startup), publishes
//! a set-state [`Signal`](hearth_signal::Signal) for every due entry, and
//! re-arms recurring sources. Due times are honored to within the sweep
//! interval's resolution — with the default 60 s interval a timer may fire
//! up to a minute late, which is accepted imprecision, not drift.
//!
//! # Time sources
//!
//! | Source     | `time` value                  | Recurrence                         |
//! |------------|-------------------------------|------------------------------------|
//! | `Cron`     | cron expression               | re-armed at next expression match  |
//! | `Solar`    | one of 14 solar event names   | re-armed at the next day's event   |
//! | `Reactive` | a device-state name           | one-shot; subscription stays armed |
//!
//! The queue is never persisted: on shutdown pending entries are simply
//! discarded and recomputed at the next startup.

pub mod cron;
pub mod engine;
pub mod error;
pub mod offset;
pub mod queue;
pub mod source;
pub mod sun;

pub use engine::SchedulerEngine;
pub use error::{Result, TimerError};
pub use offset::apply_offset;
pub use queue::{PendingTimer, TimerQueue};
pub use source::TimeSource;
pub use sun::{resolve_solar_time, solar_times, SolarEvent, SolarTimes};
