//! `hearth-core` — shared configuration, device model, and error type.
//!
//! Everything here is consumed by the other workspace crates; nothing in
//! this crate talks to the runtime or the signal hub.

pub mod config;
pub mod error;
pub mod types;

pub use config::HearthConfig;
pub use error::{HearthError, Result};
pub use types::{Coordinate, Device, PluginRef, TargetState, TimerSpec};
