//! The pending-timer queue.
//!
//! A plain in-memory collection kept sorted by due time. One logical task
//! owns it (the engine loop), so there is no internal locking; the expiry
//! sweep detaches due entries before the caller fires them, which is what
//! makes exactly-once firing hold even if a sweep is re-run at the same
//! instant.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use hearth_core::types::TargetState;

use crate::error::TimerError;
use crate::source::TimeSource;

/// A scheduled firing, waiting in the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTimer {
    /// Unique per queue entry.
    pub id: Uuid,
    /// Identity of the originating spec — at most one outstanding entry per
    /// spec may exist at any instant.
    pub spec_id: Uuid,
    /// Diagnostics only, never used for matching.
    pub label: String,
    pub due_at: DateTime<Utc>,
    pub plugin_id: String,
    pub device_id: String,
    /// State to request when this fires.
    pub state: TargetState,
    /// Offset to re-apply on re-arm (solar/reactive sources).
    pub offset: Option<String>,
    pub source: TimeSource,
}

impl PendingTimer {
    /// Time left until due; negative once overdue.
    pub fn remaining(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.due_at - now
    }
}

/// Pending timers ordered by ascending `due_at`.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a timer, keeping due-time order.
    ///
    /// Defensive boundary: entries with a pre-epoch due time or a spec that
    /// already has an outstanding entry are logged and dropped, never
    /// queued. Returns whether the entry was accepted.
    pub fn insert(&mut self, timer: PendingTimer) -> bool {
        if timer.due_at.timestamp_millis() < 0 {
            let err = TimerError::InvalidQueueEntry(format!(
                "due time {} pre-dates the epoch",
                timer.due_at
            ));
            warn!(timer = %timer.label, error = %err, "queue entry rejected");
            return false;
        }
        if self.entries.iter().any(|e| e.spec_id == timer.spec_id) {
            let err = TimerError::InvalidQueueEntry(format!(
                "spec {} already has an outstanding entry",
                timer.spec_id
            ));
            warn!(timer = %timer.label, error = %err, "queue entry rejected");
            return false;
        }

        let pos = self.entries.partition_point(|e| e.due_at <= timer.due_at);
        self.entries.insert(pos, timer);
        true
    }

    /// Remove and return every entry due at or before `now`, ascending.
    ///
    /// The returned batch is detached before the caller acts on it, so the
    /// same entry can never be produced by two sweeps. Entries the caller
    /// inserts while processing the batch (re-arms) wait for the next sweep.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> Vec<PendingTimer> {
        let split = self.entries.partition_point(|e| e.due_at <= now);
        self.entries.drain(..split).collect()
    }

    /// Pending entries in due order, for diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &PendingTimer> {
        self.entries.iter()
    }
}
