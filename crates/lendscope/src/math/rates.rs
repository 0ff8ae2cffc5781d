//! APR/APY conversion and interest accrual.
//!
//! Rates move through the system as percentages (`5` = 5%). Compounding
//! defaults to per-second ([`SECONDS_PER_YEAR`] periods), the common case
//! for continuously-accruing on-chain rates. Integer period counts go
//! through exponentiation by squaring at full `Decimal` width; only
//! fractional period counts fall back to `powd`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::SECONDS_PER_YEAR;

use super::context::DecimalContext;

/// Horizon over which interest accrues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestPeriod {
    Year,
    Month,
    Week,
}

impl InterestPeriod {
    /// Fraction of a year this horizon covers.
    pub fn fraction(self) -> Decimal {
        match self {
            Self::Year => Decimal::ONE,
            Self::Month => Decimal::ONE / dec!(12),
            Self::Week => Decimal::ONE / dec!(52),
        }
    }
}

/// Simple annualized rate → compounded annual yield.
///
/// `apy = ((1 + apr/100/n)^n - 1) * 100` with `n = periods_per_year`.
/// A zero rate short-circuits to zero without any power operation.
pub fn apr_to_apy(apr_percent: Decimal, periods_per_year: u64, ctx: &DecimalContext) -> Decimal {
    if apr_percent.is_zero() {
        return Decimal::ZERO;
    }
    let n = Decimal::from(periods_per_year);
    let per_period = apr_percent / dec!(100) / n;
    let grown = (Decimal::ONE + per_period).powu(periods_per_year);
    ctx.round((grown - Decimal::ONE) * dec!(100))
}

/// Inverse of [`apr_to_apy`]: compounded annual yield → simple rate.
///
/// `apr = ((1 + apy/100)^(1/n) - 1) * n * 100`.
pub fn apy_to_apr(apy_percent: Decimal, periods_per_year: u64, ctx: &DecimalContext) -> Decimal {
    if apy_percent.is_zero() {
        return Decimal::ZERO;
    }
    let n = Decimal::from(periods_per_year);
    let root = (Decimal::ONE + apy_percent / dec!(100)).powd(Decimal::ONE / n);
    ctx.round((root - Decimal::ONE) * n * dec!(100))
}

/// Absolute interest accrued on `principal` over `period`.
///
/// An already-compounded rate (an APY) is applied pro-rata; a simple rate
/// re-derives per-second compounding over `SECONDS_PER_YEAR * fraction`
/// periods. A zero rate returns exactly zero for every principal and
/// period.
pub fn interest_earned(
    principal: Decimal,
    rate_percent: Decimal,
    period: InterestPeriod,
    already_compounded: bool,
    ctx: &DecimalContext,
) -> Decimal {
    if rate_percent.is_zero() {
        return Decimal::ZERO;
    }
    let fraction = period.fraction();
    if already_compounded {
        return ctx.round(principal * rate_percent / dec!(100) * fraction);
    }

    let n = Decimal::from(SECONDS_PER_YEAR);
    let per_period = rate_percent / dec!(100) / n;
    let periods = n * fraction;
    let grown = match periods.to_u64().filter(|_| periods.fract().is_zero()) {
        Some(whole) => (Decimal::ONE + per_period).powu(whole),
        None => (Decimal::ONE + per_period).powd(periods),
    };
    ctx.round(principal * (grown - Decimal::ONE))
}

/// Incentive emission → simple annualized rate (APR percent).
///
/// `100 * seconds_per_year * emission * reward_price / (asset_price * total)`.
/// An empty market (`total_amount == 0`) or an overflowing intermediate has
/// no finite answer: the caller gets `None` and decides display policy.
pub fn incentive_apr(
    emission_per_second: Decimal,
    reward_price_usd: Decimal,
    asset_price_usd: Decimal,
    total_amount: Decimal,
    ctx: &DecimalContext,
) -> Option<Decimal> {
    let yearly_usd = Decimal::from(SECONDS_PER_YEAR)
        .checked_mul(emission_per_second)?
        .checked_mul(reward_price_usd)?;
    let denominator = asset_price_usd.checked_mul(total_amount)?;
    let apr = dec!(100).checked_mul(yearly_usd)?.checked_div(denominator)?;
    Some(ctx.round(apr))
}

/// Incentive emission → compounded annual yield (APY percent).
pub fn incentive_apy(
    emission_per_second: Decimal,
    reward_price_usd: Decimal,
    asset_price_usd: Decimal,
    total_amount: Decimal,
    ctx: &DecimalContext,
) -> Option<Decimal> {
    incentive_apr(
        emission_per_second,
        reward_price_usd,
        asset_price_usd,
        total_amount,
        ctx,
    )
    .map(|apr| apr_to_apy(apr, SECONDS_PER_YEAR, ctx))
}
