//! Sign-out coordinator — the provider sign-out side effect.
//!
//! ERROR HANDLING
//! ==============
//! Failure is logged and swallowed: the user stays on the current view and
//! may retry by re-invoking. Success does not transition state either; the
//! watcher's subsequent "signed out" notification is the single source of
//! that truth, which also covers the case where the session ends for some
//! other reason while the sign-out call is in flight.

use std::sync::Arc;

use tracing::{error, info};

use crate::provider::IdentityProvider;

#[derive(Clone)]
pub struct SignOutCoordinator {
    provider: Arc<dyn IdentityProvider>,
}

impl SignOutCoordinator {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Ask the provider to end the session. Never fails the caller.
    pub async fn sign_out(&self) {
        match self.provider.sign_out().await {
            Ok(()) => info!("provider sign out completed"),
            Err(e) => error!(error = %e, "provider sign out failed; staying on current view"),
        }
    }
}

#[cfg(test)]
#[path = "signout_test.rs"]
mod tests;
