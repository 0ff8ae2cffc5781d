//! Rate selection as an explicit provider chain.
//!
//! Which APR a position leg accrues at depends on protocol specifics:
//! peer-to-peer matching, per-asset discounts, stable-rate borrowing.
//! Instead of nested conditionals, each rule is a pure function returning
//! `Some(rate)` when it applies; the chains below are evaluated
//! first-match-wins. Precedence order is part of the contract:
//!
//! 1. peer-to-peer override (p2p aggregation, non-zero override),
//! 2. market discount rate (protocol special case),
//! 3. base market rate,
//! 4. stable-rate variant, for legs that use one.

use rust_decimal::Decimal;

use super::aggregator::AggregateOptions;
use super::types::{AssetMarketData, UsedAsset};

/// One rate-selection rule: `Some(apr_percent)` when it applies.
pub type RateProvider = fn(&UsedAsset, &AssetMarketData, &AggregateOptions) -> Option<Decimal>;

/// Precedence chain for supply legs.
pub const SUPPLY_RATE_PROVIDERS: &[RateProvider] =
    &[peer_to_peer_override, market_discount, base_supply_rate];

/// Precedence chain for borrow legs.
pub const BORROW_RATE_PROVIDERS: &[RateProvider] = &[
    peer_to_peer_override,
    market_discount,
    base_borrow_rate,
    stable_borrow_rate,
];

/// First provider that applies wins; `None` when the chain is exhausted.
pub fn select_rate(
    providers: &[RateProvider],
    asset: &UsedAsset,
    market: &AssetMarketData,
    options: &AggregateOptions,
) -> Option<Decimal> {
    providers
        .iter()
        .find_map(|provider| provider(asset, market, options))
}

fn peer_to_peer_override(
    asset: &UsedAsset,
    _market: &AssetMarketData,
    options: &AggregateOptions,
) -> Option<Decimal> {
    if !options.p2p {
        return None;
    }
    asset.rate_override.filter(|rate| !rate.is_zero())
}

fn market_discount(
    _asset: &UsedAsset,
    market: &AssetMarketData,
    _options: &AggregateOptions,
) -> Option<Decimal> {
    market.discount_rate
}

fn base_supply_rate(
    _asset: &UsedAsset,
    market: &AssetMarketData,
    _options: &AggregateOptions,
) -> Option<Decimal> {
    Some(market.supply_rate)
}

fn base_borrow_rate(
    _asset: &UsedAsset,
    market: &AssetMarketData,
    _options: &AggregateOptions,
) -> Option<Decimal> {
    market.borrow_rate
}

fn stable_borrow_rate(
    asset: &UsedAsset,
    market: &AssetMarketData,
    _options: &AggregateOptions,
) -> Option<Decimal> {
    if asset.uses_stable_rate {
        market.stable_borrow_rate
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market() -> AssetMarketData {
        AssetMarketData {
            symbol: "DAI".into(),
            price_usd: dec!(1),
            supply_rate: dec!(3),
            borrow_rate: Some(dec!(5)),
            stable_borrow_rate: Some(dec!(7)),
            discount_rate: None,
            total_supply: dec!(1_000_000),
            total_borrow: dec!(500_000),
            collateral_factor: dec!(75),
            liquidation_threshold: dec!(80),
            incentive_supply_apy: None,
            incentive_borrow_apy: None,
        }
    }

    fn p2p() -> AggregateOptions {
        AggregateOptions { p2p: true }
    }

    #[test]
    fn base_rates_win_by_default() {
        let asset = UsedAsset::supplied("DAI", dec!(100));
        let rate = select_rate(
            SUPPLY_RATE_PROVIDERS,
            &asset,
            &market(),
            &AggregateOptions::default(),
        );
        assert_eq!(rate, Some(dec!(3)));

        let asset = UsedAsset::borrowed("DAI", dec!(100));
        let rate = select_rate(
            BORROW_RATE_PROVIDERS,
            &asset,
            &market(),
            &AggregateOptions::default(),
        );
        assert_eq!(rate, Some(dec!(5)));
    }

    #[test]
    fn p2p_override_takes_precedence() {
        let asset = UsedAsset::borrowed("DAI", dec!(100)).with_rate_override(dec!(4.2));
        let rate = select_rate(BORROW_RATE_PROVIDERS, &asset, &market(), &p2p());
        assert_eq!(rate, Some(dec!(4.2)));
    }

    #[test]
    fn zero_override_falls_through() {
        let asset = UsedAsset::borrowed("DAI", dec!(100)).with_rate_override(dec!(0));
        let rate = select_rate(BORROW_RATE_PROVIDERS, &asset, &market(), &p2p());
        assert_eq!(rate, Some(dec!(5)));
    }

    #[test]
    fn override_ignored_without_p2p_option() {
        let asset = UsedAsset::borrowed("DAI", dec!(100)).with_rate_override(dec!(4.2));
        let rate = select_rate(
            BORROW_RATE_PROVIDERS,
            &asset,
            &market(),
            &AggregateOptions::default(),
        );
        assert_eq!(rate, Some(dec!(5)));
    }

    #[test]
    fn discount_beats_base_rate() {
        let mut discounted = market();
        discounted.discount_rate = Some(dec!(1.5));
        let asset = UsedAsset::borrowed("DAI", dec!(100));
        let rate = select_rate(
            BORROW_RATE_PROVIDERS,
            &asset,
            &discounted,
            &AggregateOptions::default(),
        );
        assert_eq!(rate, Some(dec!(1.5)));
    }

    #[test]
    fn stable_rate_used_when_variable_missing() {
        let mut fixed_only = market();
        fixed_only.borrow_rate = None;
        let asset = UsedAsset::borrowed("DAI", dec!(100)).with_stable_rate();
        let rate = select_rate(
            BORROW_RATE_PROVIDERS,
            &asset,
            &fixed_only,
            &AggregateOptions::default(),
        );
        assert_eq!(rate, Some(dec!(7)));
    }

    #[test]
    fn chain_exhausted_yields_none() {
        let mut bare = market();
        bare.borrow_rate = None;
        bare.stable_borrow_rate = None;
        let asset = UsedAsset::borrowed("DAI", dec!(100));
        let rate = select_rate(
            BORROW_RATE_PROVIDERS,
            &asset,
            &bare,
            &AggregateOptions::default(),
        );
        assert_eq!(rate, None);
    }
}
