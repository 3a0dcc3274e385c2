use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Key material and lifetime for issued tokens.
///
/// Built once at startup and handed to [`TokenCodec::new`]. The key is not
/// rotated for the lifetime of the process.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Vec<u8>,
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Issues and validates self-contained signed tokens.
///
/// Uses HS256 (HMAC with SHA-256). Tokens are verifiable without storage.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenCodec {
    /// Create a new codec from token configuration.
    ///
    /// # Arguments
    /// * `config` - Signing secret and token lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            algorithm: Algorithm::HS256,
            ttl: config.ttl,
        }
    }

    /// Token lifetime applied by [`TokenCodec::issue`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token binding `identity`, valid from `now` for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, identity: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_identity(identity, now, self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token against the current wall clock.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Decode and validate a token as of `now`.
    ///
    /// The signature is verified before any claim is read. Expiry is then
    /// checked against `now` rather than the system clock. Because `exp`
    /// is rounded up to a whole second at issue, a token stays valid for
    /// every `now` strictly before issue time plus TTL, and for less than
    /// one second beyond it.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a parseable JWT or lacks required claims
    /// * `SignatureInvalid` - Token was not signed with this codec's key
    /// * `Expired` - `now` is at or past the token's expiry
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
