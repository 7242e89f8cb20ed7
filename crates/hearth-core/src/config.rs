use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Device};

/// Default sweep interval: due timers are honored to within this resolution.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60_000;

/// Top-level config (hearth.toml + HEARTH_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearthConfig {
    /// Location used for sunrise/sunset and the other solar events.
    pub location: Coordinate,
    #[serde(default)]
    pub timers: TimersConfig,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Scheduling engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimersConfig {
    /// How often the expiry sweep runs, in milliseconds.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl Default for TimersConfig {
    fn default() -> Self {
        Self {
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

fn default_sweep_interval_ms() -> u64 {
    DEFAULT_SWEEP_INTERVAL_MS
}

impl HearthConfig {
    /// Load config from a TOML file with HEARTH_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.hearth/hearth.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: HearthConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("HEARTH_").split("_"))
            .extract()
            .map_err(|e| crate::error::HearthError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.hearth/hearth.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> HearthConfig {
        Figment::new()
            .merge(Toml::string(raw))
            .extract()
            .unwrap()
    }

    #[test]
    fn parses_full_config_from_toml() {
        let toml = r#"
            [location]
            latitude = 52.37
            longitude = 4.89

            [timers]
            sweep_interval_ms = 5000

            [[devices]]
            id = "kitchen-light"

            [devices.plugin]
            id = "rfxcom"
            device_id = "AC-1122334-1"

            [[devices.timers]]
            time = "sunset"
            state = "on"
            offset = "0 30 0 0 0 0"
        "#;

        let config = from_toml(toml);
        assert_eq!(config.timers.sweep_interval_ms, 5000);
        assert_eq!(config.devices.len(), 1);
        let device = &config.devices[0];
        assert_eq!(device.plugin.id, "rfxcom");
        assert_eq!(device.timers[0].time, "sunset");
    }

    #[test]
    fn unknown_state_value_does_not_fail_config_load() {
        // a typo in one timer's state must not take down the whole config;
        // the engine skips the offending spec at registration instead
        let toml = r#"
            [location]
            latitude = 52.37
            longitude = 4.89

            [[devices]]
            id = "porch-light"

            [devices.plugin]
            id = "rfxcom"
            device_id = "AC-2"

            [[devices.timers]]
            time = "0 8 * * *"
            state = "dimmed"
        "#;

        let config = from_toml(toml);
        assert_eq!(config.devices[0].timers[0].state, "dimmed");
    }

    #[test]
    fn sweep_interval_defaults_to_one_minute() {
        let toml = r#"
            [location]
            latitude = 0.0
            longitude = 0.0
        "#;
        let config = from_toml(toml);
        assert_eq!(config.timers.sweep_interval_ms, DEFAULT_SWEEP_INTERVAL_MS);
        assert!(config.devices.is_empty());
    }
}
