//! Fixed-window rate limiting.
//!
//! Each caller identity gets one counting window per rule. A request is
//! admitted only when every applicable rule has headroom, and admission
//! increments every rule's window in the same critical section, so the
//! `count <= limit` invariant holds even under concurrent checks for the
//! same identity.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::rate_limit::RateRule;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Every rule admitted; all counters were incremented.
    Admitted,

    /// At least one rule is exhausted; no counter was changed.
    ///
    /// `retry_after` is the time until the soonest-resetting violated
    /// window expires.
    Denied { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Admission control per caller identity across a set of window rules.
///
/// Defined as a trait so the middleware works unchanged against the
/// in-memory limiter used here and a shared external counter store in a
/// multi-process deployment.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Decide whether a request from `identity` may proceed under `rules`.
    ///
    /// All rules must pass for the request to be admitted. Evaluation order
    /// never affects the outcome, and a denial reports the tightest
    /// (soonest-to-reset) violated rule.
    async fn admit(&self, identity: &str, rules: &[RateRule]) -> Admission;
}

/// One counting interval for a single `(identity, rule)` pair.
#[derive(Debug)]
struct RateWindow {
    window_start: Instant,
    count: u32,
}

/// In-memory fixed-window limiter.
///
/// Windows are created lazily on first request, reset in place once the
/// current time passes `window_start + rule.window`, and never explicitly
/// destroyed. All windows live under a single mutex: the critical section is
/// a short in-memory pass with no await points, and it makes the
/// check-everything-then-increment-everything step linearizable, which rules
/// out the lost-update race of an unsynchronized read-then-write.
#[derive(Debug, Default)]
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<(String, RateRule), RateWindow>>,
}

impl FixedWindowLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admission check against an explicit clock reading.
    ///
    /// The trait method feeds in `Instant::now()`; tests feed in shifted
    /// instants to exercise window expiry without sleeping.
    pub async fn admit_at(&self, now: Instant, identity: &str, rules: &[RateRule]) -> Admission {
        // Identical rules share one window; count each at most once so a
        // rule appearing in both the defaults and a route override does not
        // consume two slots per request.
        let mut unique: Vec<RateRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if !unique.contains(rule) {
                unique.push(*rule);
            }
        }
        let rules = &unique;

        let mut windows = self.windows.lock().await;

        // Pass 1: reset expired windows, collect the soonest reset among
        // violated rules.
        let mut earliest_reset: Option<Duration> = None;

        for rule in rules {
            let window = windows
                .entry((identity.to_string(), *rule))
                .or_insert_with(|| RateWindow {
                    window_start: now,
                    count: 0,
                });

            let elapsed = now.saturating_duration_since(window.window_start);
            if elapsed >= rule.window {
                window.window_start = now;
                window.count = 0;
            }

            if window.count >= rule.limit {
                let reset_in = rule
                    .window
                    .saturating_sub(now.saturating_duration_since(window.window_start));
                earliest_reset = Some(match earliest_reset {
                    Some(current) => current.min(reset_in),
                    None => reset_in,
                });
            }
        }

        if let Some(retry_after) = earliest_reset {
            return Admission::Denied { retry_after };
        }

        // Pass 2: every rule has headroom, consume one slot from each. Still
        // inside the same lock, so no interleaved check can overcount.
        for rule in rules {
            if let Some(window) = windows.get_mut(&(identity.to_string(), *rule)) {
                window.count += 1;
            }
        }

        Admission::Admitted
    }
}

#[async_trait]
impl RateLimiter for FixedWindowLimiter {
    async fn admit(&self, identity: &str, rules: &[RateRule]) -> Admission {
        self.admit_at(Instant::now(), identity, rules).await
    }
}

/// Round a retry hint up to whole seconds for the HTTP response.
///
/// Rounding up means a client that waits exactly the hinted time always
/// lands after the window reset, never just before it.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 { secs + 1 } else { secs }
}
