//! Application shell — the event loop behind the rendering layer's surface.
//!
//! ARCHITECTURE
//! ============
//! One spawned task owns the controller, the watcher and the coordinator, so
//! no two transitions ever run concurrently and `ViewState` needs no lock.
//! Session notifications and rendering-layer commands arrive on separate
//! channels; the select is biased toward session notifications, so an
//! identity loss always beats a concurrently queued navigation intent and
//! the stale intent falls through to a no-op row, never replayed.
//!
//! Sign-out runs on its own task: the provider call has real latency, and
//! the loop must keep applying session notifications while it is in flight.
//! The coordinator therefore never authors the final transition; the
//! provider's "signed out" notification does.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::{ViewController, ViewState};
use crate::provider::IdentityProvider;
use crate::signout::SignOutCoordinator;
use crate::watcher::SessionWatcher;

/// Rendering-layer commands, applied in arrival order by the event loop.
enum Command {
    RequestLaunch,
    RequestReturnHome,
    SignOutRequested,
}

/// Handle to a running shell.
///
/// Entry points are callable from any thread and none of them can fail the
/// caller. Dropping the handle stops the loop and releases the provider
/// subscription, same as [`shutdown`](Self::shutdown).
pub struct AppShell {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl AppShell {
    /// Wire the components against the given provider and start the loop.
    ///
    /// The subscription is registered before this returns; the published
    /// view stays [`ViewState::Initializing`] until the provider's first
    /// notification arrives, indefinitely if it never does.
    #[must_use]
    pub fn start(provider: Arc<dyn IdentityProvider>) -> Self {
        let controller = ViewController::new();
        let view = controller.subscribe();
        let watcher = SessionWatcher::start(provider.as_ref());
        let coordinator = SignOutCoordinator::new(provider);
        let (commands, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(controller, watcher, coordinator, command_rx));
        Self { commands, view, task }
    }

    /// Observable view selection for the rendering layer. Read-only.
    #[must_use]
    pub fn view_state(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// Ask to enter the launched application.
    pub fn request_launch(&self) {
        let _ = self.commands.send(Command::RequestLaunch);
    }

    /// Ask to leave the launched application.
    pub fn request_return_home(&self) {
        let _ = self.commands.send(Command::RequestReturnHome);
    }

    /// Ask the provider to end the session.
    pub fn sign_out_requested(&self) {
        let _ = self.commands.send(Command::SignOutRequested);
    }

    /// Stop the loop and release the provider subscription.
    pub async fn shutdown(self) {
        drop(self.commands);
        let _ = self.task.await;
    }
}

async fn run(
    mut controller: ViewController,
    mut watcher: SessionWatcher,
    coordinator: SignOutCoordinator,
    mut commands: mpsc::UnboundedReceiver<Command>,
) {
    let mut session_open = true;
    loop {
        tokio::select! {
            biased;

            change = watcher.next(), if session_open => match change {
                Some(identity) => controller.on_session_changed(identity),
                None => session_open = false,
            },
            command = commands.recv() => match command {
                Some(Command::RequestLaunch) => controller.request_launch(),
                Some(Command::RequestReturnHome) => controller.request_return_home(),
                Some(Command::SignOutRequested) => {
                    let coordinator = coordinator.clone();
                    tokio::spawn(async move { coordinator.sign_out().await });
                }
                None => break,
            },
        }
    }
    watcher.shutdown();
    debug!("app shell stopped");
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
