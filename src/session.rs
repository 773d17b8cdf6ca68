//! Admin session state shared between the web layer and the gateway
//!
//! Models the server-side session's auth state as an explicit capability
//! threaded into gateway calls, keeping the gateway free of any
//! web-framework session type.

use std::sync::{Arc, RwLock};

/// Bearer credential holder for one logged-in admin session
///
/// Holds at most one opaque token, installed at admin login and destroyed on
/// logout or on a 401 from the backend. The handle is cheap to clone and
/// clones share state, so a 401 observed inside the gateway logs the owning
/// session out as well. A session without a token is an anonymous storefront
/// visitor; no `Authorization` header is sent on its behalf.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Creates an anonymous session holding no token
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already holding `token`
    pub fn authenticated(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.authorize(token);
        session
    }

    /// Installs the bearer token obtained at admin login
    pub fn authorize(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Returns a copy of the current token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    /// Whether the session currently holds a token
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Destroys the token (explicit logout, or a 401 from the backend)
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}
