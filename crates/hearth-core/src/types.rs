use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HearthError;

/// Geographic coordinate used for all solar computations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// The closed set of states a timer may request (or react to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    On,
    Off,
    /// Momentary pulse for devices without a persistent on/off state
    /// (doorbells, scene triggers).
    Trigger,
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetState::On => "on",
            TargetState::Off => "off",
            TargetState::Trigger => "trigger",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TargetState {
    type Err = HearthError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "on" => Ok(TargetState::On),
            "off" => Ok(TargetState::Off),
            "trigger" => Ok(TargetState::Trigger),
            other => Err(HearthError::UnknownState(other.to_string())),
        }
    }
}

/// Addressing info for the plugin that actually drives a device.
///
/// `id` identifies the hardware plugin (e.g. "rfxcom", "zwave"); `device_id`
/// is the plugin-native identifier the hardware answers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    pub id: String,
    pub device_id: String,
}

/// A single timer attached to a device.
///
/// `time` is classified once at registration into exactly one of cron /
/// solar / reactive, based on its value:
/// - one of the 14 solar event names ("sunrise", "dusk", …) → solar
/// - one of the target-state names ("on", "off", "trigger") → reactive
/// - anything else → cron expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSpec {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    pub time: String,
    /// Target state name, validated against [`TargetState`] per-spec at
    /// registration — kept as a string here so one typo in a config file
    /// cannot fail the whole config load.
    pub state: String,
    /// Six whitespace-separated integers: seconds minutes hours days months
    /// years, applied additively to the resolved base time.
    #[serde(default)]
    pub offset: Option<String>,
}

/// A configured device and its timers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Human-facing identifier, used in labels and log lines.
    pub id: String,
    pub plugin: PluginRef,
    #[serde(default)]
    pub timers: Vec<TimerSpec>,
}

fn bool_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_state_roundtrips_through_str() {
        for s in ["on", "off", "trigger"] {
            let state: TargetState = s.parse().unwrap();
            assert_eq!(state.to_string(), s);
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!("dimmed".parse::<TargetState>().is_err());
    }

    #[test]
    fn timer_spec_defaults_enabled() {
        let spec: TimerSpec =
            serde_json::from_str(r#"{"time": "sunset", "state": "on"}"#).unwrap();
        assert!(spec.enabled);
        assert!(spec.offset.is_none());
    }

    #[test]
    fn timer_spec_accepts_unknown_state_name() {
        // state is validated at registration, not deserialization
        let spec: TimerSpec =
            serde_json::from_str(r#"{"time": "sunset", "state": "dimmed"}"#).unwrap();
        assert_eq!(spec.state, "dimmed");
        assert!(spec.state.parse::<TargetState>().is_err());
    }
}
