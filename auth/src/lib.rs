//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id) and strength rules
//! - Signed session token issuance and validation
//! - Time-boxed account lockout decisions
//! - Single-slot in-memory session registry
//!
//! Each service defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenConfig};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(TokenConfig::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//! ));
//! let token = codec.issue("alice@example.com", Utc::now()).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.identity(), "alice@example.com");
//! ```
//!
//! ## Lockout and Sessions
//! ```
//! use auth::{LockoutDecision, LockoutPolicy, SessionRegistry};
//! use chrono::Utc;
//!
//! let policy = LockoutPolicy::default();
//! let outcome = policy.record_failure(2);
//! assert!(outcome.should_lock);
//! assert_eq!(
//!     policy.evaluate(true, Some(Utc::now()), 3, Utc::now()),
//!     LockoutDecision::StillLocked
//! );
//!
//! let sessions = SessionRegistry::new();
//! sessions.put("alice@example.com", "t1");
//! sessions.put("alice@example.com", "t2");
//! assert!(!sessions.is_valid("alice@example.com", "t1"));
//! ```

pub mod jwt;
pub mod lockout;
pub mod password;
pub mod session;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenConfig;
pub use jwt::TokenError;
pub use lockout::FailureOutcome;
pub use lockout::LockoutDecision;
pub use lockout::LockoutPolicy;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordStrength;
pub use password::WeakPasswordError;
pub use session::SessionRegistry;
