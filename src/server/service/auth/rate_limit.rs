//! Sliding-window rate limiting for the OTP login endpoints.
//!
//! An explicit, injectable counter store keyed by (source address, operation)
//! rather than a module-level global: the application owns one instance in
//! its state and tests construct their own with a short window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Length of one counting window
pub const WINDOW: Duration = Duration::from_secs(15 * 60);
/// Maximum login code sends per address per window
pub const MAX_SEND: u32 = 5;
/// Maximum code verification attempts per address per window
pub const MAX_VERIFY: u32 = 10;

/// Operation being rate limited; each has its own counter per address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RateLimitOp {
    SendCode,
    VerifyCode,
}

impl RateLimitOp {
    fn max_attempts(self) -> u32 {
        match self {
            Self::SendCode => MAX_SEND,
            Self::VerifyCode => MAX_VERIFY,
        }
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited { retry_after_seconds: u64 },
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// In-memory sliding-window counter store.
pub struct RateLimiter {
    window: Duration,
    entries: Mutex<HashMap<(String, RateLimitOp), WindowEntry>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(WINDOW)
    }
}

impl RateLimiter {
    /// Creates a limiter with the given window length
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Counts one attempt for the address and operation against the current
    /// window, rejecting once the operation's cap is reached
    pub fn check(&self, source_addr: &str, op: RateLimitOp) -> RateLimitDecision {
        self.check_at(source_addr, op, Instant::now())
    }

    /// Counts one attempt against an explicit clock reading
    pub fn check_at(&self, source_addr: &str, op: RateLimitOp, now: Instant) -> RateLimitDecision {
        let mut entries = self.entries.lock().expect("rate limiter mutex poisoned");

        entries.retain(|_, entry| now < entry.reset_at);

        let entry = entries
            .entry((source_addr.to_string(), op))
            .or_insert(WindowEntry {
                count: 0,
                reset_at: now + self.window,
            });

        if entry.count >= op.max_attempts() {
            let remaining = entry.reset_at.saturating_duration_since(now);
            let mut retry_after_seconds = remaining.as_secs();
            if remaining.subsec_nanos() > 0 {
                retry_after_seconds += 1;
            }

            return RateLimitDecision::Limited {
                retry_after_seconds,
            };
        }

        entry.count += 1;

        RateLimitDecision::Allowed
    }
}
