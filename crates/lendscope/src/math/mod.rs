//! Decimal-safe financial math.
//!
//! Everything here is a pure function of its arguments plus an explicit
//! [`DecimalContext`]; there is no module-level numeric state, so tests can
//! run several precisions concurrently.

pub mod context;
pub mod rates;
pub mod scale;

pub use context::DecimalContext;
