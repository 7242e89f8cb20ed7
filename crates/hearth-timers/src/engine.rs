use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use hearth_core::types::{Coordinate, Device, TargetState, TimerSpec};
use hearth_signal::{Signal, SignalHub, SignalOrigin};

use crate::offset::apply_offset;
use crate::queue::{PendingTimer, TimerQueue};
use crate::source::TimeSource;

/// A long-lived subscription arming one-shot timers from device events.
///
/// Never disarmed during normal operation — it re-arms implicitly by
/// continuing to listen after each firing.
#[derive(Debug, Clone)]
struct ReactiveWatcher {
    spec_id: Uuid,
    label: String,
    plugin_id: String,
    device_id: String,
    /// Reported state that triggers the one-shot.
    trigger: TargetState,
    /// State the one-shot requests when it fires.
    emit_state: TargetState,
    offset: Option<String>,
}

/// Owns the timer queue and drives the periodic expiry sweep.
///
/// Single-writer by construction: `run` is the only task touching the
/// engine, and the sweep tick and the inbound-signal branch are serialized
/// through one `tokio::select!` loop.
pub struct SchedulerEngine {
    coordinate: Coordinate,
    sweep_interval: StdDuration,
    hub: SignalHub,
    queue: TimerQueue,
    watchers: Vec<ReactiveWatcher>,
}

impl SchedulerEngine {
    pub fn new(coordinate: Coordinate, sweep_interval_ms: u64, hub: SignalHub) -> Self {
        Self {
            coordinate,
            sweep_interval: StdDuration::from_millis(sweep_interval_ms),
            hub,
            queue: TimerQueue::new(),
            watchers: Vec::new(),
        }
    }

    /// Register every timer of every device, resolving initial due times
    /// relative to `now`.
    ///
    /// Per-spec isolation: a spec that fails to resolve is logged and
    /// skipped, its siblings still register.
    pub fn register(&mut self, devices: &[Device], now: DateTime<Utc>) {
        for device in devices {
            if device.timers.is_empty() {
                continue;
            }
            info!(device = %device.id, count = device.timers.len(), "initialising timers");
            for spec in &device.timers {
                self.register_spec(device, spec, now);
            }
        }
    }

    fn register_spec(&mut self, device: &Device, spec: &TimerSpec, now: DateTime<Utc>) {
        if !spec.enabled {
            warn!(
                timer = %format!("{} -> {}", device.id, spec.state),
                time = %spec.time,
                "timer disabled, skipping"
            );
            return;
        }

        // state names are kept loose in config; validate here so one bad
        // spec is skipped without touching its siblings
        let state: TargetState = match spec.state.parse() {
            Ok(state) => state,
            Err(e) => {
                error!(device = %device.id, time = %spec.time, error = %e, "timer not scheduled");
                return;
            }
        };

        let label = format!("{} -> {state}", device.id);
        let spec_id = Uuid::new_v4();
        match TimeSource::classify(&spec.time) {
            TimeSource::Reactive(trigger) => {
                info!(timer = %label, trigger = %trigger, "reactive timer armed");
                self.watchers.push(ReactiveWatcher {
                    spec_id,
                    label,
                    plugin_id: device.plugin.id.clone(),
                    device_id: device.plugin.device_id.clone(),
                    trigger,
                    emit_state: state,
                    offset: spec.offset.clone(),
                });
            }
            source => match source.next_due(now, spec.offset.as_deref(), self.coordinate) {
                Ok(due) => {
                    info!(timer = %label, time = %spec.time, due = %due, "timer scheduled");
                    self.queue.insert(PendingTimer {
                        id: Uuid::new_v4(),
                        spec_id,
                        label,
                        due_at: due,
                        plugin_id: device.plugin.id.clone(),
                        device_id: device.plugin.device_id.clone(),
                        state,
                        offset: spec.offset.clone(),
                        source,
                    });
                }
                Err(e) => {
                    error!(timer = %label, time = %spec.time, error = %e, "timer not scheduled")
                }
            },
        }
    }

    /// Fire everything due at `now` and re-arm recurring sources.
    pub fn sweep(&mut self, now: DateTime<Utc>) {
        for timer in self.queue.sweep_expired(now) {
            self.fire(timer, now);
        }
        for entry in self.queue.iter() {
            debug!(
                timer = %entry.label,
                due = %entry.due_at,
                remaining_secs = entry.remaining(now).num_seconds(),
                "pending"
            );
        }
    }

    fn fire(&mut self, timer: PendingTimer, now: DateTime<Utc>) {
        info!(timer = %timer.label, due = %timer.due_at, "timer fired");
        self.hub
            .publish(Signal::command(&timer.plugin_id, &timer.device_id, timer.state));

        if !timer.source.is_recurring() {
            return;
        }
        match timer.source.next_due(now, timer.offset.as_deref(), self.coordinate) {
            Ok(due) => {
                let next = PendingTimer {
                    id: Uuid::new_v4(),
                    due_at: due,
                    ..timer
                };
                info!(timer = %next.label, due = %next.due_at, "timer re-armed");
                self.queue.insert(next);
            }
            Err(e) => error!(timer = %timer.label, error = %e, "re-arm failed, timer dropped"),
        }
    }

    /// Feed one inbound signal through the reactive watchers.
    ///
    /// Four-way match: plugin, device, reported state, and a hardware
    /// origin — a command echo must not re-trigger the timer it came from.
    pub fn handle_signal(&mut self, signal: &Signal, now: DateTime<Utc>) {
        if signal.origin != SignalOrigin::Device {
            return;
        }
        for watcher in &self.watchers {
            if watcher.plugin_id != signal.plugin_id
                || watcher.device_id != signal.device_id
                || watcher.trigger != signal.state
            {
                continue;
            }
            let due = apply_offset(now, watcher.offset.as_deref());
            info!(timer = %watcher.label, due = %due, "reactive timer triggered");
            self.queue.insert(PendingTimer {
                id: Uuid::new_v4(),
                spec_id: watcher.spec_id,
                label: watcher.label.clone(),
                due_at: due,
                plugin_id: watcher.plugin_id.clone(),
                device_id: watcher.device_id.clone(),
                state: watcher.emit_state,
                offset: watcher.offset.clone(),
                source: TimeSource::Reactive(watcher.trigger),
            });
        }
    }

    /// Main loop. Sweeps immediately, then at the configured interval,
    /// until `shutdown` broadcasts `true`.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_ms = self.sweep_interval.as_millis() as u64,
            pending = self.queue.len(),
            reactive = self.watchers.len(),
            "scheduling engine started"
        );

        let mut signals = self.hub.subscribe();
        // first tick completes immediately — overdue timers are not delayed
        // by a full interval
        let mut interval = tokio::time::interval(self.sweep_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => self.sweep(Utc::now()),
                received = signals.recv() => match received {
                    Ok(signal) => self.handle_signal(&signal, Utc::now()),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "signal hub lagging, device events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // engine holds a sender, so this cannot happen; a
                        // fresh receiver keeps the select arm pending
                        signals = self.hub.subscribe();
                    }
                },
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduling engine shutting down");
                        break;
                    }
                }
            }
        }
    }
}
