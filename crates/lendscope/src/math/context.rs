use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DEFAULT_DECIMAL_PRECISION;
use crate::errors::LensError;

/// Hard ceiling on fractional digits — `rust_decimal`'s 96-bit mantissa
/// carries at most 28.
pub const MAX_PRECISION: u32 = 28;

/// Numeric configuration every financial computation honors.
///
/// Built once at process start (usually from
/// [`PrecisionConfig`](crate::config::PrecisionConfig)), then passed
/// explicitly into each math entry point. Rounding is fixed to truncation
/// toward zero: liquidity and debt figures must never round up past the true
/// on-chain value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalContext {
    precision: u32,
    rounding: RoundingStrategy,
    min_exponent: i32,
    max_exponent: i32,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: DEFAULT_DECIMAL_PRECISION,
            rounding: RoundingStrategy::ToZero,
            min_exponent: -(MAX_PRECISION as i32),
            max_exponent: MAX_PRECISION as i32,
        }
    }
}

impl DecimalContext {
    /// Context carrying `precision` fractional digits.
    pub fn new(precision: u32) -> Result<Self, LensError> {
        if precision > MAX_PRECISION {
            return Err(LensError::Precision {
                precision,
                max: MAX_PRECISION,
            });
        }
        Ok(Self {
            precision,
            min_exponent: -(precision as i32),
            ..Self::default()
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> RoundingStrategy {
        self.rounding
    }

    /// Smallest power of ten the context resolves; `10^min_exponent` is one
    /// unit in the last carried fractional digit.
    pub fn min_exponent(&self) -> i32 {
        self.min_exponent
    }

    /// Largest power of ten the underlying representation can hold.
    pub fn max_exponent(&self) -> i32 {
        self.max_exponent
    }

    /// Truncate `value` to the context's precision.
    ///
    /// Every multi-step computation ends with this so that results never
    /// carry more digits than the context admits and never round away from
    /// zero.
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.precision, self.rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_context_truncates_toward_zero() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.rounding(), RoundingStrategy::ToZero);
        assert_eq!(ctx.precision(), 28);
    }

    #[test]
    fn round_truncates_positive() {
        let ctx = DecimalContext::new(2).unwrap();
        assert_eq!(ctx.round(dec!(1.999)), dec!(1.99));
        assert_eq!(ctx.round(dec!(1.991)), dec!(1.99));
    }

    #[test]
    fn round_truncates_negative_toward_zero() {
        let ctx = DecimalContext::new(2).unwrap();
        assert_eq!(ctx.round(dec!(-1.999)), dec!(-1.99));
    }

    #[test]
    fn round_is_identity_below_precision() {
        let ctx = DecimalContext::new(6).unwrap();
        assert_eq!(ctx.round(dec!(3.14)), dec!(3.14));
    }

    #[test]
    fn excessive_precision_rejected() {
        let err = DecimalContext::new(29).unwrap_err();
        assert!(matches!(
            err,
            LensError::Precision {
                precision: 29,
                max: 28
            }
        ));
    }

    #[test]
    fn contexts_with_distinct_precisions_coexist() {
        // No hidden global: two contexts give different answers side by side.
        let coarse = DecimalContext::new(2).unwrap();
        let fine = DecimalContext::new(10).unwrap();
        let value = dec!(0.123456789123);
        assert_eq!(coarse.round(value), dec!(0.12));
        assert_eq!(fine.round(value), dec!(0.1234567891));
    }
}
