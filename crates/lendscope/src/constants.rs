use alloy::primitives::{address, Address};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Numeric constants
// ---------------------------------------------------------------------------

/// WAD: 1e18 — standard EVM fixed-point scale for amounts, prices, health factors.
pub const WAD: Decimal = dec!(1_000_000_000_000_000_000);

/// RAY: 1e27 — Aave-style interest rate scale.
pub const RAY: Decimal = dec!(1_000_000_000_000_000_000_000_000_000);

/// 1e8 — Chainlink price feed scale / USD base currency unit.
pub const USD_FEED_SCALE: Decimal = dec!(100_000_000);

/// Seconds in a non-leap year; the default compounding period count for
/// continuously-accruing on-chain rates.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

// ---------------------------------------------------------------------------
// Infrastructure
// ---------------------------------------------------------------------------

/// Multicall3 is deployed at the same deterministic address on every major
/// EVM chain.
pub const MULTICALL3: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default number of sub-calls packed into one aggregate call.
pub const DEFAULT_MULTICALL_BATCH_SIZE: usize = 25;

/// Default fractional digits carried by the decimal context; the maximum
/// `rust_decimal` supports.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 28;
