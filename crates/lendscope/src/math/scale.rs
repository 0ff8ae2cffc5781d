//! Raw fixed-point words → off-chain `Decimal`.
//!
//! Lending protocols publish integers at protocol-specific scales: WAD
//! (1e18) for amounts and health factors, RAY (1e27) for interest rates,
//! 1e8 for USD price feeds, basis points for thresholds. Formatters use
//! these helpers to normalize decoded batch results before any financial
//! math runs.

use alloy::primitives::U256;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Convert a raw fixed-point `U256` with `decimals` fractional digits.
///
/// Values whose magnitude exceeds `Decimal`'s 96-bit mantissa lose their
/// fractional part: the division happens in integer space first, which
/// truncates toward zero — the same conservative bias the rest of the math
/// layer applies. A quotient that still does not fit saturates to
/// [`Decimal::MAX`] (e.g. the `U256::MAX` "no cap" sentinel some protocols
/// use).
pub fn from_fixed_point(raw: U256, decimals: u32) -> Decimal {
    let scale = Decimal::from(10u64)
        .checked_powu(u64::from(decimals))
        .unwrap_or(Decimal::MAX);
    if let Ok(value) = Decimal::from_str(&raw.to_string()) {
        return value / scale;
    }
    let truncated = raw / U256::from(10u64).pow(U256::from(decimals));
    Decimal::from_str(&truncated.to_string()).unwrap_or(Decimal::MAX)
}

/// WAD-scaled (18 decimals) value to `Decimal`.
pub fn wad_to_decimal(raw: U256) -> Decimal {
    from_fixed_point(raw, 18)
}

/// RAY-scaled (27 decimals) value to `Decimal`.
pub fn ray_to_decimal(raw: U256) -> Decimal {
    from_fixed_point(raw, 27)
}

/// RAY-scaled per-year interest rate to an APR percentage.
pub fn ray_rate_to_apr_percent(raw: U256) -> Decimal {
    ray_to_decimal(raw) * dec!(100)
}

/// Chainlink 8-decimal USD price to `Decimal`.
pub fn price_to_decimal(raw: U256) -> Decimal {
    from_fixed_point(raw, 8)
}

/// Basis points to a fraction (7500 bps → 0.75).
pub fn bps_to_fraction(raw: U256) -> Decimal {
    from_fixed_point(raw, 4)
}
