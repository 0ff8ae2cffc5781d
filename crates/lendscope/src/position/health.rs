//! Collateralization ratio, minimum-ratio selection, and liquidation price.
//!
//! Pure functions of their inputs and the ambient [`DecimalContext`] — no
//! state survives between calls, because on-chain state moves every block
//! and a cached ratio without a block-height invalidation story is a bug,
//! not an optimization.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::math::context::DecimalContext;

use super::types::CollateralRatio;

/// Current collateral/debt ratio, percent.
///
/// Zero debt is unbounded, not "very large"; an empty position has no
/// ratio at all. An overflowing quotient collapses into [`Infinite`] too —
/// at that magnitude the distinction carries no risk information.
///
/// [`Infinite`]: CollateralRatio::Infinite
pub fn compute_ratio(
    collateral_usd: Decimal,
    debt_usd: Decimal,
    ctx: &DecimalContext,
) -> CollateralRatio {
    if debt_usd.is_zero() {
        return if collateral_usd.is_zero() {
            CollateralRatio::Undefined
        } else {
            CollateralRatio::Infinite
        };
    }
    match collateral_usd
        .checked_mul(dec!(100))
        .and_then(|scaled| scaled.checked_div(debt_usd))
    {
        Some(ratio) => CollateralRatio::Finite(ctx.round(ratio)),
        None => CollateralRatio::Infinite,
    }
}

/// Health factor: `collateral * threshold% / debt`, where `1` is the
/// liquidation boundary. Same sentinel rules as [`compute_ratio`].
pub fn health_factor(
    collateral_usd: Decimal,
    debt_usd: Decimal,
    liquidation_threshold_percent: Decimal,
    ctx: &DecimalContext,
) -> CollateralRatio {
    if debt_usd.is_zero() {
        return if collateral_usd.is_zero() {
            CollateralRatio::Undefined
        } else {
            CollateralRatio::Infinite
        };
    }
    match collateral_usd
        .checked_mul(liquidation_threshold_percent)
        .and_then(|weighted| weighted.checked_div(dec!(100)))
        .and_then(|weighted| weighted.checked_div(debt_usd))
    {
        Some(hf) => CollateralRatio::Finite(ctx.round(hf)),
        None => CollateralRatio::Infinite,
    }
}

/// Minimum required ratio under the current system mode.
///
/// Protocols with a global risk mode (a "recovery mode" active above a
/// system-wide threshold) demand a higher floor while it lasts. The flag is
/// an input read from system state by the caller — this function never
/// infers the mode.
pub fn minimum_ratio(
    normal_min_percent: Decimal,
    recovery_min_percent: Decimal,
    recovery_mode_active: bool,
) -> Decimal {
    if recovery_mode_active {
        recovery_min_percent
    } else {
        normal_min_percent
    }
}

/// Collateral price, denominated in the debt asset, at which the position's
/// ratio hits `min_ratio_percent`.
///
/// `min_ratio * debt / collateral / 100`; only defined for positive
/// collateral.
pub fn liquidation_price(
    min_ratio_percent: Decimal,
    total_debt_units: Decimal,
    total_collateral_units: Decimal,
    ctx: &DecimalContext,
) -> Option<Decimal> {
    if total_collateral_units <= Decimal::ZERO {
        return None;
    }
    let price = min_ratio_percent
        .checked_mul(total_debt_units)?
        .checked_div(total_collateral_units)?
        .checked_div(dec!(100))?;
    Some(ctx.round(price))
}
