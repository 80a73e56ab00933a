// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn { username: String, token: String },
}

/// Login context handed to gateways. Clones share the same state; sign-in
/// changes are broadcast to every `subscribe()` receiver.
#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::SignedOut);
        Self { tx: Arc::new(tx) }
    }

    pub fn with_token(username: impl Into<String>, token: impl Into<String>) -> Self {
        let s = Self::new();
        s.sign_in(username, token);
        s
    }

    pub fn sign_in(&self, username: impl Into<String>, token: impl Into<String>) {
        let username = username.into();
        tracing::info!(%username, "signed in");
        self.tx.send_replace(SessionState::SignedIn {
            username,
            token: token.into(),
        });
    }

    pub fn sign_out(&self) {
        if self.is_signed_in() {
            tracing::info!("signed out");
        }
        self.tx.send_replace(SessionState::SignedOut);
    }

    pub fn token(&self) -> Option<String> {
        match &*self.tx.borrow() {
            SessionState::SignedIn { token, .. } => Some(token.clone()),
            SessionState::SignedOut => None,
        }
    }

    pub fn username(&self) -> Option<String> {
        match &*self.tx.borrow() {
            SessionState::SignedIn { username, .. } => Some(username.clone()),
            SessionState::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(*self.tx.borrow(), SessionState::SignedIn { .. })
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
