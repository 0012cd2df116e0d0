//! Session lifecycle.
//!
//! The only state machine in the client: a session is either present or not.
//! `Unauthenticated -> Authenticated` on login or a successful restore of a
//! stored token; `Authenticated -> Unauthenticated` on logout or any 401.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }
}

/// An established session: credentials plus the principal they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session<P> {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub principal: P,
}

impl<P> Session<P> {
    #[must_use]
    pub fn new(access_token: String, refresh_token: Option<String>, principal: P) -> Self {
        Self { access_token, refresh_token, principal }
    }

    /// Replace the principal after a profile re-fetch, keeping credentials.
    #[must_use]
    pub fn with_principal<Q>(self, principal: Q) -> Session<Q> {
        Session { access_token: self.access_token, refresh_token: self.refresh_token, principal }
    }
}
