//! Session watcher — owns the provider subscription, translates sessions.
//!
//! DESIGN
//! ======
//! Exactly one subscription exists for the watcher's lifetime. Teardown is
//! scoped: `shutdown` cancels the provider handle idempotently, and dropping
//! the watcher releases it too. After shutdown no notification is observed,
//! including ones already buffered in the channel.

use tokio::sync::mpsc;
use tracing::debug;

use crate::identity::Identity;
use crate::provider::{IdentityProvider, SessionChange, SubscriptionHandle};

pub struct SessionWatcher {
    events: mpsc::UnboundedReceiver<SessionChange>,
    subscription: SubscriptionHandle,
    closed: bool,
}

impl SessionWatcher {
    /// Register the subscription with the provider and return the watcher.
    #[must_use]
    pub fn start(provider: &dyn IdentityProvider) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        let subscription = provider.subscribe(events_tx);
        Self { events, subscription, closed: false }
    }

    /// Next session notification, translated to the internal identity record.
    ///
    /// Yields `Some(Some(identity))` for a live session, `Some(None)` for no
    /// session, and `None` once the provider drops its end of the channel or
    /// the watcher has been shut down. Notifications are yielded in provider
    /// emission order.
    pub async fn next(&mut self) -> Option<Option<Identity>> {
        if self.closed {
            return None;
        }
        match self.events.recv().await? {
            SessionChange::SignedIn(session) => Some(Some(Identity::from(session))),
            SessionChange::SignedOut => Some(None),
        }
    }

    /// Release the provider subscription. Idempotent; notifications already
    /// buffered are discarded, never observed.
    pub fn shutdown(&mut self) {
        if !self.closed {
            debug!("session watcher shut down");
        }
        self.subscription.cancel();
        self.events.close();
        self.closed = true;
    }
}

#[cfg(test)]
#[path = "watcher_test.rs"]
mod tests;
