//! assetgate — session-gated view selection for the asset-scoring app shell.
//!
//! ARCHITECTURE
//! ============
//! An external identity provider owns all session truth; this crate only
//! observes it. [`SessionWatcher`] holds the one subscription and translates
//! provider-native sessions into [`Identity`] records. [`ViewController`]
//! turns session presence plus navigation intent into a [`ViewState`] and is
//! its single writer. [`SignOutCoordinator`] performs the sign-out side
//! effect. [`AppShell`] runs all three on one event-loop task and is the
//! only surface a rendering layer touches.

pub mod controller;
pub mod identity;
pub mod provider;
pub mod shell;
pub mod signout;
pub mod watcher;

pub use controller::{ViewController, ViewState};
pub use identity::Identity;
pub use provider::{IdentityProvider, ProviderSession, SessionChange, SignOutError, SubscriptionHandle};
pub use shell::AppShell;
pub use signout::SignOutCoordinator;
pub use watcher::SessionWatcher;
