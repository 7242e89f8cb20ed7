//! `hearth-signal` — the in-process signal hub.
//!
//! Every device-state notification and every set-state command travels as a
//! [`Signal`] on one broadcast channel. Producers publish fire-and-forget;
//! consumers subscribe and filter for the signals they care about.

pub mod hub;
pub mod types;

pub use hub::SignalHub;
pub use types::{Signal, SignalOrigin};
