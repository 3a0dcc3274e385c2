use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Consecutive failures that lock an account.
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 3;

/// How long a locked account stays locked.
pub const DEFAULT_LOCK_DURATION_MINUTES: i64 = 15;

/// Outcome of gating a login attempt on the account's lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutDecision {
    /// Account is not locked; proceed to password verification.
    Allow,
    /// Account is locked; reject without consulting the password verifier.
    StillLocked,
    /// Lock has elapsed; clear the lock and the failure counter, then proceed.
    AutoUnlock,
}

/// Counter state after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    pub failed_attempts: u32,
    pub should_lock: bool,
}

/// Time-boxed lockout rules.
///
/// Pure decision logic; callers own the account state and persist any
/// change the decision implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    max_failed_attempts: u32,
    lock_duration: Duration,
}

impl LockoutPolicy {
    /// # Arguments
    /// * `max_failed_attempts` - Failures that trigger a lock (clamped to at least 1)
    /// * `lock_duration` - Time an account stays locked
    pub fn new(max_failed_attempts: u32, lock_duration: Duration) -> Self {
        Self {
            max_failed_attempts: max_failed_attempts.max(1),
            lock_duration,
        }
    }

    pub fn max_failed_attempts(&self) -> u32 {
        self.max_failed_attempts
    }

    pub fn lock_duration(&self) -> Duration {
        self.lock_duration
    }

    /// Decide whether a login attempt may proceed.
    ///
    /// An account flagged locked without a lock time cannot be timed out,
    /// so it is treated as elapsed rather than locked forever.
    pub fn evaluate(
        &self,
        locked: bool,
        lock_time: Option<DateTime<Utc>>,
        _failed_attempts: u32,
        now: DateTime<Utc>,
    ) -> LockoutDecision {
        if !locked {
            return LockoutDecision::Allow;
        }

        match lock_time {
            Some(lock_time) if now < lock_time + self.lock_duration => {
                LockoutDecision::StillLocked
            }
            _ => LockoutDecision::AutoUnlock,
        }
    }

    /// Count one more failure.
    pub fn record_failure(&self, failed_attempts: u32) -> FailureOutcome {
        let failed_attempts = failed_attempts.saturating_add(1);
        FailureOutcome {
            failed_attempts,
            should_lock: failed_attempts >= self.max_failed_attempts,
        }
    }

    /// Failures left before the account locks.
    pub fn remaining_attempts(&self, failed_attempts: u32) -> u32 {
        self.max_failed_attempts.saturating_sub(failed_attempts)
    }

    /// Instant at which a lock taken at `lock_time` elapses.
    pub fn unlocks_at(&self, lock_time: DateTime<Utc>) -> DateTime<Utc> {
        lock_time + self.lock_duration
    }

    /// Time left on a lock taken at `lock_time`, never negative.
    pub fn retry_after(&self, lock_time: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        (self.unlocks_at(lock_time) - now).max(Duration::zero())
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_FAILED_ATTEMPTS,
            Duration::minutes(DEFAULT_LOCK_DURATION_MINUTES),
        )
    }
}
