//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, namely trace
//! correlation and throttling.

pub mod rate_limit;
pub mod trace;

pub use rate_limit::{RateLimit, RateLimitConfig};
pub use trace::Trace;
