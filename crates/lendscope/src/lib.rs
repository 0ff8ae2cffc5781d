//! Normalized lending-market metrics over batched on-chain reads.
//!
//! `lendscope` turns raw lending/borrowing protocol state (market rates,
//! user positions) into comparable, decimal-safe numbers: supply/borrow
//! APYs, blended net APY across a whole position, collateralization ratios
//! and liquidation prices.
//!
//! Two subsystems do the heavy lifting:
//!
//! - [`multicall`] — packs an arbitrary list of heterogeneous read-only
//!   contract calls into a single Multicall3 round trip at a pinned block
//!   height and unpacks the results back into submission order, tolerating
//!   individual sub-call failures.
//! - [`math`] + [`position`] — `rust_decimal` arithmetic under an explicit
//!   [`DecimalContext`] (truncation toward zero, so figures never overstate
//!   on-chain values), APR/APY conversion, and aggregation of per-asset
//!   positions into one [`position::AggregatedPosition`].
//!
//! Protocol-specific glue (address registries, ABI catalogs, formatters
//! turning raw words into [`position::AssetMarketData`]) lives in the host
//! process; this crate only consumes descriptors and decoded values.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod math;
pub mod multicall;
pub mod position;

pub use errors::LensError;
pub use math::context::DecimalContext;
pub use multicall::{BatchExecutor, BatchResult, CallDescriptor};
pub use position::{
    aggregate, AggregateOptions, AggregatedPosition, AssetMarketData, CollateralRatio, UsedAsset,
};
