use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use tokio::sync::Mutex;
use tokio::sync::MutexGuard;

/// Lock-striped serialization of login attempts per identity.
///
/// Two attempts for the same identity always map to the same stripe, so
/// the failure counter read-modify-write against the store is not
/// interleaved within this process. Distinct identities only contend when
/// they hash to the same stripe. Memory is fixed regardless of how many
/// identities are seen.
pub struct LoginGate {
    stripes: Vec<Mutex<()>>,
}

impl LoginGate {
    pub const DEFAULT_STRIPES: usize = 64;

    pub fn new(stripes: usize) -> Self {
        Self {
            stripes: (0..stripes.max(1)).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Wait for exclusive access to `identity`'s stripe.
    pub async fn acquire(&self, identity: &str) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe_of(identity)].lock().await
    }

    fn stripe_of(&self, identity: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        (hasher.finish() % self.stripes.len() as u64) as usize
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STRIPES)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_same_identity_same_stripe() {
        let gate = LoginGate::default();
        assert_eq!(
            gate.stripe_of("alice@example.com"),
            gate.stripe_of("alice@example.com")
        );
    }

    #[test]
    fn test_zero_stripes_is_clamped() {
        let gate = LoginGate::new(0);
        assert_eq!(gate.stripes.len(), 1);
        assert_eq!(gate.stripe_of("anyone@example.com"), 0);
    }

    #[tokio::test]
    async fn test_acquire_excludes_same_identity() {
        let gate = Arc::new(LoginGate::default());
        let guard = gate.acquire("alice@example.com").await;

        let contender = Arc::clone(&gate);
        let blocked = tokio::time::timeout(Duration::from_millis(50), async move {
            let _guard = contender.acquire("alice@example.com").await;
        })
        .await;
        assert!(blocked.is_err());

        drop(guard);
        let _guard = gate.acquire("alice@example.com").await;
    }
}
