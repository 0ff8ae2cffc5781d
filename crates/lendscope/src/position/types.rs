use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of one lending market, already normalized by a protocol
/// formatter: rates are APR percentages (scaled down from RAY or
/// per-block units), incentive fields are APY percentages, amounts and
/// prices are USD-denominated decimals.
///
/// One instance per market per query; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMarketData {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_usd: Decimal,
    /// Base supply APR percent.
    #[serde(with = "rust_decimal::serde::str")]
    pub supply_rate: Decimal,
    /// Variable borrow APR percent; absent on fixed-rate-only markets.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub borrow_rate: Option<Decimal>,
    /// Stable borrow APR percent, where the protocol offers one.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub stable_borrow_rate: Option<Decimal>,
    /// Protocol special-case rate (e.g. a discounted rate tied to one
    /// specific asset); takes precedence over the base rate when present.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub discount_rate: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_supply: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_borrow: Decimal,
    /// Max borrow power per unit of collateral, percent.
    #[serde(with = "rust_decimal::serde::str")]
    pub collateral_factor: Decimal,
    /// Threshold at which liquidation triggers, percent.
    #[serde(with = "rust_decimal::serde::str")]
    pub liquidation_threshold: Decimal,
    /// Reward-token yield on the supply side, APY percent.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub incentive_supply_apy: Option<Decimal>,
    /// Reward-token yield on the borrow side, APY percent.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub incentive_borrow_apy: Option<Decimal>,
}

/// One line of a user's position in one asset. Built fresh per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsedAsset {
    pub symbol: String,
    pub is_supplied: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub supplied_usd: Decimal,
    pub is_borrowed: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub borrowed_usd: Decimal,
    /// Peer-to-peer matched rate, APR percent; honored only when the
    /// aggregation runs with the p2p option and the override is non-zero.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub rate_override: Option<Decimal>,
    /// Whether the borrow leg accrues at the market's stable rate.
    #[serde(default)]
    pub uses_stable_rate: bool,
}

impl UsedAsset {
    /// Pure supply leg.
    pub fn supplied(symbol: impl Into<String>, supplied_usd: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            is_supplied: true,
            supplied_usd,
            is_borrowed: false,
            borrowed_usd: Decimal::ZERO,
            rate_override: None,
            uses_stable_rate: false,
        }
    }

    /// Pure borrow leg.
    pub fn borrowed(symbol: impl Into<String>, borrowed_usd: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            is_supplied: false,
            supplied_usd: Decimal::ZERO,
            is_borrowed: true,
            borrowed_usd,
            rate_override: None,
            uses_stable_rate: false,
        }
    }

    pub fn with_rate_override(mut self, rate_percent: Decimal) -> Self {
        self.rate_override = Some(rate_percent);
        self
    }

    pub fn with_stable_rate(mut self) -> Self {
        self.uses_stable_rate = true;
        self
    }
}

/// A collateral/debt ratio that may not be finite.
///
/// No debt means no liquidation risk — unbounded, which is not the same
/// thing as "very high", and an empty position has no ratio at all. Both
/// cases are values, never panics, so callers can choose their own display
/// policy ("∞", "N/A", ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralRatio {
    /// Percent: collateral / debt * 100.
    Finite(Decimal),
    /// Debt is zero; no liquidation risk.
    Infinite,
    /// Neither collateral nor debt.
    Undefined,
}

impl CollateralRatio {
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn as_finite(&self) -> Option<Decimal> {
        match self {
            Self::Finite(value) => Some(*value),
            _ => None,
        }
    }
}

/// Blended view of a whole position. Derived on every query — on-chain
/// state moves every block, so nothing here is ever cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedPosition {
    #[serde(with = "rust_decimal::serde::str")]
    pub supplied_usd: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub borrowed_usd: Decimal,
    /// Blended net yield, percent. `None` when the net balance is zero —
    /// the formula has no finite value there and no clamping is applied.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub net_apy: Option<Decimal>,
    /// Annual reward-token earnings, USD; kept apart from base interest so
    /// front-ends can surface it separately.
    #[serde(with = "rust_decimal::serde::str")]
    pub incentive_usd: Decimal,
    pub ratio: CollateralRatio,
    /// Minimum collateral/debt percentage before liquidation, from the
    /// supply-weighted liquidation thresholds; `None` without supply.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub liquidation_ratio: Option<Decimal>,
    /// Collateral price (in debt units) at which liquidation triggers.
    /// Filled by [`health::liquidation_price`](super::health::liquidation_price)
    /// when the caller knows unit amounts; aggregation alone cannot.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub liquidation_price: Option<Decimal>,
}
