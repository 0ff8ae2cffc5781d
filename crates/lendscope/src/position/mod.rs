//! Position aggregation: per-asset market rates + per-asset balances →
//! one blended, USD-denominated record.

pub mod aggregator;
pub mod health;
pub mod rate_providers;
pub mod types;

pub use aggregator::{aggregate, AggregateOptions};
pub use health::{compute_ratio, health_factor, liquidation_price, minimum_ratio};
pub use types::{AggregatedPosition, AssetMarketData, CollateralRatio, UsedAsset};
