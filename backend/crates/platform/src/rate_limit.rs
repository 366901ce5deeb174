//! Rate Limiting Infrastructure
//!
//! Fixed-window, per-key attempt counting for the sign-in endpoint, backed
//! by a bounded LRU cache so memory stays flat under distinct-key pressure.
//!
//! The window is fixed, not sliding: the first attempt from a key opens a
//! window, and the reset time stays put until the window elapses, no matter
//! how many further attempts (allowed or denied) arrive. Under extreme
//! distinct-key pressure the cache may evict a key mid-window, which forgives
//! that key early; that is an accepted memory/accuracy tradeoff.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::LruCache;
use crate::clock::Clock;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed in the window
    pub max_attempts: u32,
    /// Time window duration
    pub window: Duration,
    /// Maximum number of keys tracked at once
    pub cache_capacity: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_millis(120_000),
            cache_capacity: 1000,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
            ..Self::default()
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Attempts left in the current window
    pub remaining: u32,
    /// When the current window ends (ms epoch)
    pub reset_at_ms: i64,
}

/// Read-only view of a key's current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub attempts: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Per-key attempt counter within one fixed window
#[derive(Debug, Clone, Copy)]
struct AttemptWindow {
    attempts: u32,
    window_start_ms: i64,
    last_attempt_ms: i64,
}

/// Fixed-window per-key rate limiter
///
/// Constructed once at process start and shared across request handlers;
/// state is process-local and lost on restart (soft abuse deterrent, not a
/// security boundary).
pub struct LoginRateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    entries: Mutex<LruCache<String, AttemptWindow>>,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        let entries = Mutex::new(LruCache::new(config.cache_capacity));
        Self {
            config,
            clock,
            entries,
        }
    }

    /// Create with the given config and the system wall-clock
    pub fn with_system_clock(config: RateLimitConfig) -> Self {
        Self::new(config, Arc::new(crate::clock::SystemClock))
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record an attempt for `key` and decide whether it is allowed
    ///
    /// Never fails; always returns a decision. Once a key is at the limit,
    /// further denied calls do not grow the counter and do not move the
    /// window's reset time.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now_ms = self.clock.now_ms();
        let window_ms = self.config.window_ms();
        let max_attempts = self.config.max_attempts;

        let mut entries = self.lock_entries();
        let key_owned = key.to_string();
        let current = entries.get(&key_owned).copied();

        match current {
            Some(entry) if now_ms - entry.window_start_ms < window_ms => {
                let reset_at_ms = entry.window_start_ms + window_ms;

                if entry.attempts >= max_attempts {
                    // Already at the limit: deny without growing the counter
                    entries.insert(
                        key_owned,
                        AttemptWindow {
                            last_attempt_ms: now_ms,
                            ..entry
                        },
                    );
                    return RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at_ms,
                    };
                }

                let attempts = entry.attempts + 1;
                entries.insert(
                    key_owned,
                    AttemptWindow {
                        attempts,
                        window_start_ms: entry.window_start_ms,
                        last_attempt_ms: now_ms,
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    remaining: max_attempts.saturating_sub(attempts),
                    reset_at_ms,
                }
            }
            // Unseen key, or the previous window has elapsed: start fresh
            _ => {
                entries.insert(
                    key_owned,
                    AttemptWindow {
                        attempts: 1,
                        window_start_ms: now_ms,
                        last_attempt_ms: now_ms,
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    remaining: max_attempts.saturating_sub(1),
                    reset_at_ms: now_ms + window_ms,
                }
            }
        }
    }

    /// Read a key's current window without mutating anything
    ///
    /// Returns `None` for unseen keys and for keys whose window has elapsed.
    pub fn status(&self, key: &str) -> Option<RateLimitStatus> {
        let now_ms = self.clock.now_ms();
        let window_ms = self.config.window_ms();

        let entries = self.lock_entries();
        let entry = entries.peek(&key.to_string())?;

        if now_ms - entry.window_start_ms >= window_ms {
            return None;
        }

        Some(RateLimitStatus {
            attempts: entry.attempts,
            remaining: self.config.max_attempts.saturating_sub(entry.attempts),
            reset_at_ms: entry.window_start_ms + window_ms,
        })
    }

    /// Forget a key entirely
    ///
    /// Called after a successful sign-in so a legitimate user is not
    /// penalized by earlier attempts.
    pub fn reset(&self, key: &str) {
        let mut entries = self.lock_entries();
        entries.remove(&key.to_string());
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.lock_entries().len()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, LruCache<String, AttemptWindow>> {
        // No code path panics while holding the lock
        self.entries.lock().expect("rate limiter lock poisoned")
    }
}

impl std::fmt::Debug for LoginRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRateLimiter")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn limiter(clock: Arc<ManualClock>) -> LoginRateLimiter {
        LoginRateLimiter::new(RateLimitConfig::default(), clock)
    }

    #[test]
    fn test_default_config_contract() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.window_ms(), 120_000);
        assert_eq!(config.cache_capacity, 1000);
    }

    #[test]
    fn test_first_attempt_opens_window() {
        let clock = Arc::new(ManualClock::new(1_000));
        let limiter = limiter(clock.clone());

        let decision = limiter.check("10.0.0.1");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
        assert_eq!(decision.reset_at_ms, 1_000 + 120_000);
    }

    #[test]
    fn test_denied_after_max_attempts_with_stable_reset() {
        let clock = Arc::new(ManualClock::new(1_000));
        let limiter = limiter(clock.clone());

        let first = limiter.check("ip");
        for _ in 0..4 {
            clock.advance_ms(1_000);
            assert!(limiter.check("ip").allowed);
        }

        // Sixth call inside the same window is denied, and the reset time
        // is the one announced on the very first call
        clock.advance_ms(1_000);
        let denied = limiter.check("ip");
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.reset_at_ms, first.reset_at_ms);
    }

    #[test]
    fn test_denial_is_idempotent() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(clock.clone());

        for _ in 0..20 {
            limiter.check("ip");
        }

        // Counter never grows past the limit
        let status = limiter.status("ip").unwrap();
        assert_eq!(status.attempts, 5);
        assert_eq!(status.remaining, 0);
        assert_eq!(status.reset_at_ms, 120_000);
    }

    #[test]
    fn test_denied_calls_do_not_slide_window() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(clock.clone());

        for _ in 0..6 {
            limiter.check("ip");
        }

        // Hammering right up to the boundary must not extend the window
        clock.set_ms(119_999);
        assert!(!limiter.check("ip").allowed);

        clock.set_ms(120_000);
        let decision = limiter.check("ip");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
        assert_eq!(decision.reset_at_ms, 120_000 + 120_000);
    }

    #[test]
    fn test_window_rollover_resets_counter() {
        let clock = Arc::new(ManualClock::new(5_000));
        let limiter = limiter(clock.clone());

        limiter.check("ip");
        limiter.check("ip");

        clock.advance_ms(120_000);
        let decision = limiter.check("ip");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn test_reset_clears_state() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(clock.clone());

        for _ in 0..6 {
            limiter.check("ip");
        }
        assert!(!limiter.check("ip").allowed);

        limiter.reset("ip");
        assert!(limiter.status("ip").is_none());

        // Behaves exactly like a first-ever call
        let decision = limiter.check("ip");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn test_status_unseen_and_expired() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(clock.clone());

        assert!(limiter.status("ip").is_none());

        limiter.check("ip");
        assert!(limiter.status("ip").is_some());

        clock.advance_ms(120_000);
        assert!(limiter.status("ip").is_none());
    }

    #[test]
    fn test_status_does_not_mutate() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(clock.clone());

        limiter.check("ip");
        for _ in 0..10 {
            let _ = limiter.status("ip");
        }

        let status = limiter.status("ip").unwrap();
        assert_eq!(status.attempts, 1);
        assert_eq!(status.remaining, 4);
    }

    #[test]
    fn test_keys_are_independent() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(clock.clone());

        for _ in 0..6 {
            limiter.check("attacker");
        }

        assert!(!limiter.check("attacker").allowed);
        assert!(limiter.check("bystander").allowed);
    }

    #[test]
    fn test_capacity_pressure_evicts_oldest_key() {
        let clock = Arc::new(ManualClock::new(0));
        let config = RateLimitConfig {
            cache_capacity: 3,
            ..RateLimitConfig::default()
        };
        let limiter = LoginRateLimiter::new(config, clock.clone());

        for _ in 0..6 {
            limiter.check("first");
        }
        limiter.check("second");
        limiter.check("third");
        limiter.check("fourth"); // pushes "first" out

        assert_eq!(limiter.tracked_keys(), 3);
        assert!(limiter.status("first").is_none());

        // Evicted mid-window: the key starts over, forgiven early
        let decision = limiter.check("first");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn test_status_does_not_protect_key_from_eviction() {
        let clock = Arc::new(ManualClock::new(0));
        let config = RateLimitConfig {
            cache_capacity: 2,
            ..RateLimitConfig::default()
        };
        let limiter = LoginRateLimiter::new(config, clock.clone());

        limiter.check("a");
        limiter.check("b");
        let _ = limiter.status("a"); // read-only, must not refresh recency
        limiter.check("c");

        assert!(limiter.status("a").is_none());
        assert!(limiter.status("b").is_some());
    }

    #[test]
    fn test_check_refreshes_recency() {
        let clock = Arc::new(ManualClock::new(0));
        let config = RateLimitConfig {
            cache_capacity: 2,
            ..RateLimitConfig::default()
        };
        let limiter = LoginRateLimiter::new(config, clock.clone());

        limiter.check("a");
        limiter.check("b");
        limiter.check("a"); // "a" becomes most recent
        limiter.check("c"); // evicts "b"

        assert!(limiter.status("a").is_some());
        assert!(limiter.status("b").is_none());
    }
}
