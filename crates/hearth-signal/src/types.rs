use serde::{Deserialize, Serialize};

use hearth_core::types::TargetState;

/// Who produced a signal.
///
/// Matching on origin is what keeps a command echo from re-triggering the
/// reactive timer that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrigin {
    /// Software-originated: a timer firing, a UI action, an API call.
    Client,
    /// Hardware-originated: the device itself reported a state change.
    Device,
}

/// A single state event on the hub.
///
/// With `origin == Device` this is a notification ("the wall switch reports
/// on"); with `origin == Client` it is a command ("set the lamp to on").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Hardware plugin that owns (or should drive) the device.
    pub plugin_id: String,
    /// Plugin-native device identifier.
    pub device_id: String,
    pub state: TargetState,
    pub origin: SignalOrigin,
}

impl Signal {
    /// Build a set-state command as emitted by a firing timer.
    pub fn command(plugin_id: &str, device_id: &str, state: TargetState) -> Self {
        Self {
            plugin_id: plugin_id.to_string(),
            device_id: device_id.to_string(),
            state,
            origin: SignalOrigin::Client,
        }
    }

    /// Build a device-originated state notification.
    pub fn notification(plugin_id: &str, device_id: &str, state: TargetState) -> Self {
        Self {
            plugin_id: plugin_id.to_string(),
            device_id: device_id.to_string(),
            state,
            origin: SignalOrigin::Device,
        }
    }
}
