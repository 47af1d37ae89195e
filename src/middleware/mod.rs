//! Request-processing middleware stages.
//!
//! Protected routes pass through an ordered chain: authentication first,
//! then rate limiting. Each stage can short-circuit with a terminal JSON
//! response; only on double-success does control reach the route handler.

pub mod auth;
pub mod rate_limit;
