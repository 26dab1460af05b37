//! Cancellation plumbing for the heartbeat emitter.
//!
//! A [`ShutdownTrigger`] and a [`ShutdownToken`] share a `watch` channel
//! carrying a single "cancelled" flag. The flag starts out `false` and only
//! ever moves to `true`. A dropped trigger counts as cancellation.

use log::debug;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::sync::watch;

/// Creates a connected trigger/token pair.
pub fn channel() -> (ShutdownTrigger, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownToken { rx })
}

/// The sending half. Owned by whatever observes the outside world.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// Records a cancellation request. Does nothing else.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// The receiving half, passed into the loop it stops.
#[derive(Debug, Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&mut self) {
        // An error here means the trigger is gone, which also cancels.
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Registered SIGINT and SIGTERM streams.
///
/// Install these before doing any work, so a failed registration is reported
/// up front rather than mistaken for a shutdown request.
#[derive(Debug)]
pub struct Signals {
    interrupt: Signal,
    terminate: Signal,
}

impl Signals {
    /// Registers both handlers. Must be called inside a tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Waits for the first signal and fires the trigger.
    ///
    /// Only the flag is touched here. Anything user-facing is left to the
    /// loop that observes the token.
    pub async fn listen(mut self, trigger: ShutdownTrigger) {
        tokio::select! {
            _ = self.interrupt.recv() => debug!("Received SIGINT."),
            _ = self.terminate.recv() => debug!("Received SIGTERM."),
        }
        trigger.trigger();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_token_starts_uncancelled() {
        let (_trigger, token) = channel();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_trigger_cancels_every_clone() {
        let (trigger, token) = channel();
        let other = token.clone();
        trigger.trigger();
        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_repeated_trigger_stays_cancelled() {
        let (trigger, token) = channel();
        trigger.trigger();
        trigger.trigger();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_dropped_trigger_counts_as_cancelled() {
        let (trigger, token) = channel();
        drop(trigger);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_trigger() {
        let (trigger, mut token) = channel();
        let waiter = tokio::spawn(async move {
            token.cancelled().await;
            token.is_cancelled()
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.trigger();

        let observed = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("cancelled() did not resolve")
            .unwrap();
        assert!(observed);
    }

    #[tokio::test]
    async fn test_installed_signals_fire_the_trigger() {
        let signals = Signals::install().unwrap();
        let (trigger, mut token) = channel();
        let listener = tokio::spawn(signals.listen(trigger));

        nix::sys::signal::raise(nix::sys::signal::Signal::SIGTERM).unwrap();

        tokio::time::timeout(Duration::from_secs(5), token.cancelled())
            .await
            .expect("SIGTERM did not cancel the token");
        assert!(token.is_cancelled());
        listener.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_is_pending_until_triggered() {
        let (_trigger, mut token) = channel();
        let result = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(result.is_err());
    }
}
