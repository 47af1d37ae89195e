//! Rate-limit rules and the declarative route-to-rules mapping.
//!
//! A [`RateRule`] caps how many requests a single identity may make within a
//! fixed window. Rules for a given request are the global defaults plus any
//! per-route overrides; overrides stack with the defaults, they never replace
//! them.

use std::collections::HashMap;
use std::time::Duration;

/// A single rate-limit rule: at most `limit` admitted requests per `window`.
///
/// Rules are used as part of the limiter's window key, so they derive `Hash`
/// and `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateRule {
    /// Maximum admissible count within one window
    pub limit: u32,

    /// Duration of the counting interval
    pub window: Duration,
}

impl RateRule {
    pub const fn per_minute(limit: u32) -> Self {
        Self {
            limit,
            window: Duration::from_secs(60),
        }
    }

    pub const fn per_hour(limit: u32) -> Self {
        Self {
            limit,
            window: Duration::from_secs(3600),
        }
    }

    pub const fn per_day(limit: u32) -> Self {
        Self {
            limit,
            window: Duration::from_secs(86400),
        }
    }
}

/// Declarative mapping from route path to its rate-limit rules.
///
/// Built once at startup and consulted by the rate-limit middleware for
/// every request, instead of wiring limiter rules into each handler
/// individually.
#[derive(Debug, Default)]
pub struct RouteRules {
    /// Account-wide default rules applied to every rate-limited route
    defaults: Vec<RateRule>,

    /// Additional per-path rules that stack with the defaults
    overrides: HashMap<String, Vec<RateRule>>,
}

impl RouteRules {
    /// Create a rule set with the given global defaults.
    pub fn new(defaults: Vec<RateRule>) -> Self {
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Register override rules for a route path (builder style).
    pub fn route(mut self, path: impl Into<String>, rules: Vec<RateRule>) -> Self {
        self.overrides.insert(path.into(), rules);
        self
    }

    /// All rules applicable to `path`: the global defaults followed by any
    /// route-specific overrides. A request must satisfy every returned rule.
    pub fn rules_for(&self, path: &str) -> Vec<RateRule> {
        let mut rules = self.defaults.clone();
        if let Some(extra) = self.overrides.get(path) {
            rules.extend_from_slice(extra);
        }
        rules
    }
}
