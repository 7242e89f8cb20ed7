use tokio::sync::broadcast;
use tracing::debug;

use crate::types::Signal;

/// Buffered signals per subscriber before the oldest are dropped (`Lagged`).
const HUB_CAPACITY: usize = 256;

/// Broadcast fabric connecting plugins, the timer engine, and any observer.
///
/// Cloning a hub clones the sender side only; each consumer calls
/// [`SignalHub::subscribe`] for its own receiver. Publishing never blocks
/// and never fails upward: a hub with no subscribers simply drops the
/// signal.
#[derive(Debug, Clone)]
pub struct SignalHub {
    tx: broadcast::Sender<Signal>,
}

impl SignalHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        Self { tx }
    }

    /// Publish a signal to all current subscribers, fire-and-forget.
    pub fn publish(&self, signal: Signal) {
        // send only errors when no receiver exists — not a fault here.
        if self.tx.send(signal).is_err() {
            debug!("signal published with no subscribers");
        }
    }

    /// Open a new receiver over the full signal stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.tx.subscribe()
    }

    /// Number of live subscribers, for diagnostics.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SignalHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalOrigin;
    use hearth_core::types::TargetState;

    #[tokio::test]
    async fn subscriber_receives_published_signal() {
        let hub = SignalHub::new();
        let mut rx = hub.subscribe();

        hub.publish(Signal::command("rfxcom", "AC-1", TargetState::On));

        let got = rx.recv().await.unwrap();
        assert_eq!(got.plugin_id, "rfxcom");
        assert_eq!(got.state, TargetState::On);
        assert_eq!(got.origin, SignalOrigin::Client);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let hub = SignalHub::new();
        // must not panic or block
        hub.publish(Signal::notification("zwave", "7", TargetState::Off));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_signal() {
        let hub = SignalHub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        hub.publish(Signal::notification("rfxcom", "AC-1", TargetState::Trigger));

        assert_eq!(a.recv().await.unwrap(), b.recv().await.unwrap());
    }
}
