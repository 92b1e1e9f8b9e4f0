//! Identity-provider boundary — the consumed interface and its types.
//!
//! DESIGN
//! ======
//! The provider owns credential verification and session lifecycle; this
//! crate observes it and nothing more. Subscriptions are channel-based so the
//! core stays decoupled from whatever callback mechanism the concrete
//! provider uses, and the unsubscribe action is wrapped in a handle that
//! releases on every teardown path, including drop.

use tokio::sync::mpsc;

/// Provider-native session record delivered on each "signed in" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    /// Opaque provider-issued user identifier.
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// One session-change notification from the provider.
///
/// Explicit sign-out and external session expiry both arrive as
/// [`SessionChange::SignedOut`]; the model does not distinguish them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(ProviderSession),
    SignedOut,
}

/// Errors produced by provider sign-out.
#[derive(Debug, thiserror::Error)]
pub enum SignOutError {
    /// The provider rejected or failed the sign-out call.
    #[error("provider sign out failed: {0}")]
    Provider(String),
}

/// External identity provider: the system of record for sessions.
///
/// `subscribe` must emit the current session status shortly after
/// registration and again on every change, until the returned handle is
/// cancelled. Notifications must be emitted in session-change order.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a session-change subscription feeding the given channel.
    fn subscribe(&self, events: mpsc::UnboundedSender<SessionChange>) -> SubscriptionHandle;

    /// Terminate the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SignOutError`] if the provider rejects the call; the
    /// session is then still live.
    async fn sign_out(&self) -> Result<(), SignOutError>;
}

/// Scoped handle for a provider subscription.
///
/// [`cancel`](Self::cancel) runs the provider's unsubscribe action at most
/// once; dropping an uncancelled handle runs it too, so the subscription is
/// released on every teardown path.
pub struct SubscriptionHandle {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    /// Wrap the provider's unsubscribe action.
    #[must_use]
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self { unsubscribe: Some(Box::new(unsubscribe)) }
    }

    /// Release the subscription. Idempotent: second and later calls are
    /// no-ops.
    pub fn cancel(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// `true` once [`cancel`](Self::cancel) has run.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.unsubscribe.is_none()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionHandle").field("cancelled", &self.is_cancelled()).finish()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scripted in-memory provider for tests.
    ///
    /// Emits nothing on its own; tests drive it with [`MockProvider::emit`].
    /// Sign-out results are consumed front-to-back, then default to `Ok`.
    pub struct MockProvider {
        subscriber: Mutex<Option<mpsc::UnboundedSender<SessionChange>>>,
        unsubscribes: Arc<AtomicUsize>,
        sign_out_calls: AtomicUsize,
        sign_out_results: Mutex<Vec<Result<(), SignOutError>>>,
    }

    impl MockProvider {
        #[must_use]
        pub fn new() -> Self {
            Self::with_sign_out_results(Vec::new())
        }

        #[must_use]
        pub fn with_sign_out_results(results: Vec<Result<(), SignOutError>>) -> Self {
            Self {
                subscriber: Mutex::new(None),
                unsubscribes: Arc::new(AtomicUsize::new(0)),
                sign_out_calls: AtomicUsize::new(0),
                sign_out_results: Mutex::new(results),
            }
        }

        /// Push a session-change notification to the current subscriber.
        pub fn emit(&self, change: SessionChange) {
            if let Some(tx) = self.subscriber.lock().unwrap().as_ref() {
                let _ = tx.send(change);
            }
        }

        /// How many times the unsubscribe action has run.
        #[must_use]
        pub fn unsubscribe_count(&self) -> usize {
            self.unsubscribes.load(Ordering::SeqCst)
        }

        /// How many times `sign_out` has been called.
        #[must_use]
        pub fn sign_out_count(&self) -> usize {
            self.sign_out_calls.load(Ordering::SeqCst)
        }
    }

    impl Default for MockProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl IdentityProvider for MockProvider {
        fn subscribe(&self, events: mpsc::UnboundedSender<SessionChange>) -> SubscriptionHandle {
            *self.subscriber.lock().unwrap() = Some(events);
            let unsubscribes = Arc::clone(&self.unsubscribes);
            SubscriptionHandle::new(move || {
                unsubscribes.fetch_add(1, Ordering::SeqCst);
            })
        }

        async fn sign_out(&self) -> Result<(), SignOutError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.sign_out_results.lock().unwrap();
            if results.is_empty() { Ok(()) } else { results.remove(0) }
        }
    }

    /// Create a dummy `ProviderSession` for testing.
    #[must_use]
    pub fn dummy_session(uid: &str) -> ProviderSession {
        ProviderSession {
            uid: uid.into(),
            display_name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            photo_url: Some("https://example.com/ada.png".into()),
        }
    }
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
