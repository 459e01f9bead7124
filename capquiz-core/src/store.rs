//! In-memory per-user session store.
//!
//! Keeps each user's session state, profile, and the expected-next-action
//! marker between turns. The hosting request boundary serializes turns per
//! user, so plain single-writer access is enough; no locking here.

use crate::session::{Expected, SessionState, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
struct UserEntry {
    session: SessionState,
    profile: UserProfile,
    expected: Option<Expected>,
}

/// Per-user conversation state container.
#[derive(Debug, Default)]
pub struct SessionStore {
    users: HashMap<UserId, UserEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a user's session and profile, creating them empty
    /// on first sight.
    pub fn user_mut(&mut self, user: UserId) -> (&mut SessionState, &mut UserProfile) {
        let entry = self.users.entry(user).or_default();
        (&mut entry.session, &mut entry.profile)
    }

    pub fn session(&self, user: UserId) -> Option<&SessionState> {
        self.users.get(&user).map(|e| &e.session)
    }

    pub fn profile(&self, user: UserId) -> Option<&UserProfile> {
        self.users.get(&user).map(|e| &e.profile)
    }

    /// The marker currently valid for this user, if any.
    pub fn expected(&self, user: UserId) -> Option<Expected> {
        self.users.get(&user).and_then(|e| e.expected)
    }

    /// Consume one turn of the current marker's lifespan, dropping it when
    /// it expires.
    pub fn tick(&mut self, user: UserId) {
        if let Some(entry) = self.users.get_mut(&user) {
            if let Some(expected) = entry.expected.as_mut() {
                expected.turns = expected.turns.saturating_sub(1);
                if expected.turns == 0 {
                    entry.expected = None;
                }
            }
        }
    }

    /// Install the marker a reply carries, replacing any previous one.
    /// Replies without a marker leave the current one alone.
    pub fn set_expected(&mut self, user: UserId, expected: Option<Expected>) {
        if let Some(expected) = expected {
            self.users.entry(user).or_default().expected = Some(expected);
        }
    }

    /// Drop a user's session (profile survives).
    pub fn clear_session(&mut self, user: UserId) {
        if let Some(entry) = self.users.get_mut(&user) {
            entry.session.clear();
            entry.expected = None;
        }
    }
}
