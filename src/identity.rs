//! Identity — the internal record for the authenticated principal.
//!
//! Built only by translating a provider-native session. Replaced wholesale on
//! every session change, never partially mutated.

use serde::Serialize;

use crate::provider::ProviderSession;

/// The authenticated principal as the rest of the crate sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Stable provider-issued identifier.
    pub id: String,
    /// Display name, if the provider has one.
    pub display_name: Option<String>,
    /// Email address, if the provider has one.
    pub email: Option<String>,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

impl From<ProviderSession> for Identity {
    /// Copy the session fields verbatim. No validation, no network calls.
    fn from(session: ProviderSession) -> Self {
        Self {
            id: session.uid,
            display_name: session.display_name,
            email: session.email,
            avatar_url: session.photo_url,
        }
    }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
