//! View controller — the state machine that owns view selection.
//!
//! DESIGN
//! ======
//! `ViewState` is derived, never stored on its own: it is a pure function of
//! (session known?, identity present?, launch intent). The controller is the
//! single writer; readers get a `watch::Receiver` and never write. Identity
//! loss clears the launch intent, so a stale "launch" queued behind a loss
//! lands on a no-op row instead of replaying once a fresh identity arrives.
//!
//! Event delivery never fails the caller: out-of-place navigation requests
//! resolve as no-ops, because failing the call would desynchronize the
//! provider's notification stream from controller state.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::identity::Identity;

// =============================================================================
// VIEW STATE
// =============================================================================

/// Which screen is currently active.
///
/// `Home` and `InApp` carry the identity, so authenticated views are
/// unrepresentable without one and the rendering layer gets the identity
/// fields alongside the selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    /// Session status not yet known. Held exactly once, at startup.
    Initializing,
    /// No identity present.
    Unauthenticated,
    /// Authenticated landing view.
    Home(Identity),
    /// The launched application.
    InApp(Identity),
}

impl ViewState {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Unauthenticated => "unauthenticated",
            Self::Home(_) => "home",
            Self::InApp(_) => "in_app",
        }
    }

    /// The identity backing the current view, when there is one.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Initializing | Self::Unauthenticated => None,
            Self::Home(identity) | Self::InApp(identity) => Some(identity),
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Session status as last reported by the watcher.
#[derive(Debug, Clone, PartialEq)]
enum Session {
    /// No notification observed yet.
    Unknown,
    /// At least one notification observed; holds the current identity.
    Known(Option<Identity>),
}

/// The state machine that owns view selection.
///
/// Transitions publish synchronously, before the triggering call returns.
pub struct ViewController {
    session: Session,
    launch_requested: bool,
    view_tx: watch::Sender<ViewState>,
}

impl ViewController {
    #[must_use]
    pub fn new() -> Self {
        let (view_tx, _) = watch::channel(ViewState::Initializing);
        Self { session: Session::Unknown, launch_requested: false, view_tx }
    }

    /// Observable read surface for the rendering layer.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view_tx.subscribe()
    }

    /// The currently published view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view_tx.borrow().clone()
    }

    /// Apply a session-change notification.
    ///
    /// Identity loss forces `Unauthenticated` from any view and clears the
    /// launch intent unconditionally; a fresh identity never restores it.
    pub fn on_session_changed(&mut self, identity: Option<Identity>) {
        if identity.is_none() {
            self.launch_requested = false;
        }
        self.session = Session::Known(identity);
        self.publish();
    }

    /// Enter the launched application. No-op from any view but `Home`.
    pub fn request_launch(&mut self) {
        if matches!(&*self.view_tx.borrow(), ViewState::Home(_)) {
            self.launch_requested = true;
            self.publish();
        } else {
            debug!(view = self.view_tx.borrow().name(), "launch request ignored");
        }
    }

    /// Leave the launched application. No-op from any view but `InApp`.
    pub fn request_return_home(&mut self) {
        if matches!(&*self.view_tx.borrow(), ViewState::InApp(_)) {
            self.launch_requested = false;
            self.publish();
        } else {
            debug!(view = self.view_tx.borrow().name(), "return-home request ignored");
        }
    }

    /// Recompute the derived view and publish it if it changed.
    fn publish(&mut self) {
        let next = derive_view(&self.session, self.launch_requested);
        if *self.view_tx.borrow() != next {
            info!(from = self.view_tx.borrow().name(), to = next.name(), "view transition");
            self.view_tx.send_replace(next);
        }
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

/// The pure derivation: (session known?, identity present?, intent) → view.
fn derive_view(session: &Session, launch_requested: bool) -> ViewState {
    match session {
        Session::Unknown => ViewState::Initializing,
        Session::Known(None) => ViewState::Unauthenticated,
        Session::Known(Some(identity)) if launch_requested => ViewState::InApp(identity.clone()),
        Session::Known(Some(identity)) => ViewState::Home(identity.clone()),
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
