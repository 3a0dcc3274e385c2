use dashmap::DashMap;

/// In-memory table of the single currently valid token per identity.
///
/// Issuing a new token for an identity replaces the previous one, which
/// makes [`is_valid`](SessionRegistry::is_valid) reject a superseded token
/// even while its signature and expiry still check out. Operations are
/// atomic per key; there is no lock spanning keys and no ordering across
/// keys. Concurrent `put`s for the same identity resolve last-writer-wins.
///
/// Not durable: the table is empty after a restart.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, String>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `token` as the active token for `identity`.
    pub fn put(&self, identity: &str, token: &str) {
        self.sessions
            .insert(identity.to_string(), token.to_string());
    }

    /// Drop the active token for `identity`, if any.
    pub fn remove(&self, identity: &str) {
        self.sessions.remove(identity);
    }

    /// True iff `token` is exactly the token last recorded for `identity`.
    pub fn is_valid(&self, identity: &str, token: &str) -> bool {
        self.sessions
            .get(identity)
            .map_or(false, |stored| stored.value() == token)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
