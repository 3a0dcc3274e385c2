pub mod policy;

pub use policy::FailureOutcome;
pub use policy::LockoutDecision;
pub use policy::LockoutPolicy;
pub use policy::DEFAULT_LOCK_DURATION_MINUTES;
pub use policy::DEFAULT_MAX_FAILED_ATTEMPTS;
