use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Session token claims.
///
/// Binds an identity to an issuance instant and an expiry. The `jti` is
/// random per token so that two logins within the same second still yield
/// distinct token strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    /// Create claims for an identity issued at `now` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `identity` - Account identity to bind (stored in `sub`)
    /// * `now` - Issuance instant
    /// * `ttl` - Validity duration
    ///
    /// # Returns
    /// Claims with sub, iat, exp and a fresh jti set. `exp` is rounded up
    /// to the next whole second so the token never expires before
    /// `now + ttl`.
    pub fn for_identity(identity: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: ceil_timestamp(now + ttl),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Get the bound identity.
    pub fn identity(&self) -> &str {
        &self.sub
    }

    /// Check if token is expired at the given instant.
    ///
    /// A token is valid strictly before its expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

fn ceil_timestamp(instant: DateTime<Utc>) -> i64 {
    if instant.timestamp_subsec_nanos() > 0 {
        instant.timestamp() + 1
    } else {
        instant.timestamp()
    }
}
