//! Attempt rate limiting for the credential endpoints.
//!
//! In-memory and process-local, keyed by `client:route`. Records are best
//! effort: losing them (restart, sweep) fails open.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

/// Rate limiter tuning.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Attempts allowed inside one window.
    pub max_attempts: u32,
    /// Length of the counting window.
    pub window: Duration,
    /// How long a client stays locked out after exceeding the limit.
    pub lock_duration: Duration,
    /// How often the background sweeper drops stale entries.
    pub sweep_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::minutes(15),
            lock_duration: Duration::minutes(30),
            sweep_interval: Duration::minutes(60),
        }
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Attempts left in the current window. Zero on rejection.
    pub remaining_attempts: u32,
    /// When the current window resets. Present on allowed decisions.
    pub reset_at: Option<DateTime<Utc>>,
    /// When the lockout ends. Present on rejected decisions.
    pub blocked_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct AttemptRecord {
    attempts: u32,
    first_attempt: DateTime<Utc>,
    blocked_until: Option<DateTime<Utc>>,
}

/// Keyed attempt tracker, shared through application state.
///
/// Each check runs under the entry's lock, so concurrent attempts for the
/// same key serialize and the count is exact.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    records: DashMap<String, AttemptRecord>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record an attempt for `client_key` on `route` and decide whether it
    /// may proceed.
    pub fn check(&self, client_key: &str, route: &str) -> RateLimitDecision {
        self.check_at(client_key, route, Utc::now())
    }

    /// Same as [`RateLimiter::check`] with an explicit clock.
    pub fn check_at(
        &self,
        client_key: &str,
        route: &str,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let mut entry = self
            .records
            .entry(entry_key(client_key, route))
            .or_insert_with(|| AttemptRecord {
                attempts: 0,
                first_attempt: now,
                blocked_until: None,
            });
        let record = entry.value_mut();

        // An active lockout wins over everything else.
        if let Some(blocked_until) = record.blocked_until
            && now < blocked_until
        {
            return RateLimitDecision {
                allowed: false,
                remaining_attempts: 0,
                reset_at: None,
                blocked_until: Some(blocked_until),
            };
        }

        // Window elapsed (an expired lockout always implies this): start
        // fresh.
        if now - record.first_attempt > self.config.window {
            record.attempts = 0;
            record.first_attempt = now;
            record.blocked_until = None;
        }

        record.attempts += 1;

        if record.attempts > self.config.max_attempts {
            let blocked_until = now + self.config.lock_duration;
            record.blocked_until = Some(blocked_until);
            debug!(client_key, route, "attempt limit exceeded, locking out");
            return RateLimitDecision {
                allowed: false,
                remaining_attempts: 0,
                reset_at: None,
                blocked_until: Some(blocked_until),
            };
        }

        RateLimitDecision {
            allowed: true,
            remaining_attempts: self.config.max_attempts - record.attempts,
            reset_at: Some(record.first_attempt + self.config.window),
            blocked_until: None,
        }
    }

    /// Forget a client's attempts on `route` (used after successful
    /// sign-in).
    pub fn reset(&self, client_key: &str, route: &str) {
        self.records.remove(&entry_key(client_key, route));
    }

    /// Drop entries whose window has passed and whose lockout, if any, has
    /// expired.
    pub fn sweep(&self) {
        self.sweep_at(Utc::now());
    }

    /// Same as [`RateLimiter::sweep`] with an explicit clock.
    pub fn sweep_at(&self, now: DateTime<Utc>) {
        let before = self.records.len();
        self.records.retain(|_, record| {
            let window_active = now - record.first_attempt <= self.config.window;
            let lock_active = record.blocked_until.is_some_and(|until| now <= until);
            window_active || lock_active
        });
        let removed = before.saturating_sub(self.records.len());
        if removed > 0 {
            debug!(removed, "swept stale rate limit entries");
        }
    }

    /// Number of live entries.
    pub fn tracked_entries(&self) -> usize {
        self.records.len()
    }
}

fn entry_key(client_key: &str, route: &str) -> String {
    format!("{client_key}:{route}")
}
