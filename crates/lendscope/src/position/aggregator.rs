//! Blend per-asset legs into one position-level record.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::errors::LensError;
use crate::math::context::DecimalContext;
use crate::math::rates::{interest_earned, InterestPeriod};

use super::health::compute_ratio;
use super::rate_providers::{select_rate, BORROW_RATE_PROVIDERS, SUPPLY_RATE_PROVIDERS};
use super::types::{AggregatedPosition, AssetMarketData, UsedAsset};

/// Aggregation-wide switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOptions {
    /// Honor peer-to-peer rate overrides on the used assets.
    pub p2p: bool,
}

/// Combine a user's per-asset legs with market snapshots into totals,
/// blended net APY, and collateralization figures.
///
/// Base interest accrues at the APR selected by the provider chain,
/// re-compounded per second; incentive APYs apply pro-rata and accumulate
/// separately in `incentive_usd`. Borrow interest subtracts from the net.
/// The blended figure is
///
/// `net_apy = (supply_interest - borrow_interest + incentive_usd) / (supplied - borrowed) * 100`
///
/// which has no finite value when the denominator is zero (`net_apy =
/// None`) and goes negative-side-up for over-borrowed positions — both are
/// surfaced as-is for the caller to present.
///
/// Accumulation is plain decimal addition, so the result does not depend on
/// the order of `used` beyond truncation at the context's precision.
pub fn aggregate(
    used: &[UsedAsset],
    markets: &HashMap<String, AssetMarketData>,
    options: &AggregateOptions,
    ctx: &DecimalContext,
) -> Result<AggregatedPosition, LensError> {
    let mut supplied_usd = Decimal::ZERO;
    let mut borrowed_usd = Decimal::ZERO;
    let mut net_interest = Decimal::ZERO;
    let mut incentive_usd = Decimal::ZERO;
    let mut weighted_threshold = Decimal::ZERO;

    for asset in used {
        let market = markets
            .get(&asset.symbol)
            .ok_or_else(|| LensError::UnknownMarket {
                symbol: asset.symbol.clone(),
            })?;

        if asset.is_supplied {
            supplied_usd += asset.supplied_usd;
            let rate = selected_rate(SUPPLY_RATE_PROVIDERS, asset, market, options, "supply");
            net_interest +=
                interest_earned(asset.supplied_usd, rate, InterestPeriod::Year, false, ctx);
            if let Some(apy) = market.incentive_supply_apy {
                incentive_usd +=
                    interest_earned(asset.supplied_usd, apy, InterestPeriod::Year, true, ctx);
            }
            weighted_threshold += asset.supplied_usd * market.liquidation_threshold;
        }

        if asset.is_borrowed {
            borrowed_usd += asset.borrowed_usd;
            let rate = selected_rate(BORROW_RATE_PROVIDERS, asset, market, options, "borrow");
            net_interest -=
                interest_earned(asset.borrowed_usd, rate, InterestPeriod::Year, false, ctx);
            if let Some(apy) = market.incentive_borrow_apy {
                incentive_usd +=
                    interest_earned(asset.borrowed_usd, apy, InterestPeriod::Year, true, ctx);
            }
        }
    }

    let net_balance = supplied_usd - borrowed_usd;
    let net_apy = (net_interest + incentive_usd)
        .checked_div(net_balance)
        .map(|apy| ctx.round(apy * dec!(100)));

    // Supply-weighted liquidation threshold → minimum collateral/debt
    // percentage: a 80% threshold means liquidation at 125%.
    let liquidation_ratio = weighted_threshold
        .checked_div(supplied_usd)
        .and_then(|average| dec!(10_000).checked_div(average))
        .map(|ratio| ctx.round(ratio));

    Ok(AggregatedPosition {
        supplied_usd,
        borrowed_usd,
        net_apy,
        incentive_usd,
        ratio: compute_ratio(supplied_usd, borrowed_usd, ctx),
        liquidation_ratio,
        liquidation_price: None,
    })
}

fn selected_rate(
    providers: &[super::rate_providers::RateProvider],
    asset: &UsedAsset,
    market: &AssetMarketData,
    options: &AggregateOptions,
    side: &str,
) -> Decimal {
    match select_rate(providers, asset, market, options) {
        Some(rate) => rate,
        None => {
            warn!(symbol = %asset.symbol, side, "no rate provider matched; assuming 0%");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> DecimalContext {
        DecimalContext::default()
    }

    fn market(symbol: &str, supply_rate: Decimal, borrow_rate: Decimal) -> AssetMarketData {
        AssetMarketData {
            symbol: symbol.into(),
            price_usd: dec!(1),
            supply_rate,
            borrow_rate: Some(borrow_rate),
            stable_borrow_rate: None,
            discount_rate: None,
            total_supply: dec!(10_000_000),
            total_borrow: dec!(4_000_000),
            collateral_factor: dec!(75),
            liquidation_threshold: dec!(80),
            incentive_supply_apy: None,
            incentive_borrow_apy: None,
        }
    }

    fn two_asset_markets() -> HashMap<String, AssetMarketData> {
        let mut a = market("AAA", dec!(5), dec!(6));
        a.incentive_supply_apy = Some(dec!(2));
        let b = market("BBB", dec!(1), dec!(8));
        HashMap::from([("AAA".to_string(), a), ("BBB".to_string(), b)])
    }

    // -----------------------------------------------------------------------
    // Reference scenario: AAA supplied 1000 @ 5% + 2% incentive,
    // BBB borrowed 400 @ 8%.
    // -----------------------------------------------------------------------

    #[test]
    fn two_asset_scenario_matches_reference() {
        let markets = two_asset_markets();
        let used = vec![
            UsedAsset::supplied("AAA", dec!(1000)),
            UsedAsset::borrowed("BBB", dec!(400)),
        ];

        let position = aggregate(&used, &markets, &AggregateOptions::default(), &ctx()).unwrap();

        assert_eq!(position.supplied_usd, dec!(1000));
        assert_eq!(position.borrowed_usd, dec!(400));
        // Incentive: flat 2% APY on 1000.
        assert_eq!(position.incentive_usd, dec!(20));

        // Hand-computed: (1000*(e^0.05-1) + 20 - 400*(e^0.08-1)) / 600 * 100
        //              = (51.271096.. + 20 - 33.314827..) / 6
        //              = 6.326044..%
        let net_apy = position.net_apy.expect("finite net APY");
        assert!(net_apy > dec!(6.32604), "net_apy = {net_apy}");
        assert!(net_apy < dec!(6.32605), "net_apy = {net_apy}");

        // Cross-check against the rate layer itself.
        let expected = (interest_earned(dec!(1000), dec!(5), InterestPeriod::Year, false, &ctx())
            + dec!(20)
            - interest_earned(dec!(400), dec!(8), InterestPeriod::Year, false, &ctx()))
            / dec!(600)
            * dec!(100);
        assert!((net_apy - expected).abs() < dec!(0.000001));

        // 80% threshold everywhere → liquidation at 125%.
        assert_eq!(position.liquidation_ratio, Some(dec!(125)));
        // Ratio: 1000/400 = 250%.
        assert_eq!(
            position.ratio,
            super::super::types::CollateralRatio::Finite(dec!(250))
        );
    }

    // -----------------------------------------------------------------------
    // Edge cases
    // -----------------------------------------------------------------------

    #[test]
    fn empty_position() {
        let position = aggregate(
            &[],
            &two_asset_markets(),
            &AggregateOptions::default(),
            &ctx(),
        )
        .unwrap();
        assert_eq!(position.supplied_usd, dec!(0));
        assert_eq!(position.borrowed_usd, dec!(0));
        assert_eq!(position.net_apy, None);
        assert_eq!(position.liquidation_ratio, None);
        assert_eq!(
            position.ratio,
            super::super::types::CollateralRatio::Undefined
        );
    }

    #[test]
    fn fully_leveraged_position_has_no_net_apy() {
        // supplied == borrowed → zero denominator → surfaced as None.
        let markets = two_asset_markets();
        let used = vec![
            UsedAsset::supplied("AAA", dec!(500)),
            UsedAsset::borrowed("BBB", dec!(500)),
        ];
        let position = aggregate(&used, &markets, &AggregateOptions::default(), &ctx()).unwrap();
        assert_eq!(position.net_apy, None);
    }

    #[test]
    fn over_borrowed_position_keeps_negative_denominator_semantics() {
        // borrowed > supplied: the source formula's sign flip is preserved,
        // not clamped.
        let markets = two_asset_markets();
        let used = vec![
            UsedAsset::supplied("AAA", dec!(100)),
            UsedAsset::borrowed("BBB", dec!(500)),
        ];
        let position = aggregate(&used, &markets, &AggregateOptions::default(), &ctx()).unwrap();
        let net_apy = position.net_apy.expect("finite, though sign-flipped");
        // net interest is negative (interest on 500 at 8% dwarfs 100 at 5%),
        // denominator is -400 → the quotient comes out positive.
        assert!(net_apy > Decimal::ZERO);
    }

    #[test]
    fn unknown_market_is_an_error() {
        let err = aggregate(
            &[UsedAsset::supplied("ZZZ", dec!(100))],
            &two_asset_markets(),
            &AggregateOptions::default(),
            &ctx(),
        )
        .unwrap_err();
        assert!(matches!(err, LensError::UnknownMarket { symbol } if symbol == "ZZZ"));
    }

    #[test]
    fn borrow_incentives_accumulate() {
        let mut markets = two_asset_markets();
        markets.get_mut("BBB").unwrap().incentive_borrow_apy = Some(dec!(1));
        let used = vec![
            UsedAsset::supplied("AAA", dec!(1000)),
            UsedAsset::borrowed("BBB", dec!(400)),
        ];
        let position = aggregate(&used, &markets, &AggregateOptions::default(), &ctx()).unwrap();
        // 2% of 1000 plus 1% of 400.
        assert_eq!(position.incentive_usd, dec!(24));
    }

    #[test]
    fn p2p_override_changes_the_blend() {
        let markets = two_asset_markets();
        let used = vec![
            UsedAsset::supplied("AAA", dec!(1000)),
            UsedAsset::borrowed("BBB", dec!(400)).with_rate_override(dec!(4)),
        ];
        let base = aggregate(&used, &markets, &AggregateOptions::default(), &ctx()).unwrap();
        let p2p = aggregate(&used, &markets, &AggregateOptions { p2p: true }, &ctx()).unwrap();
        // Borrowing at 4% instead of 8% lifts the net yield.
        assert!(p2p.net_apy.unwrap() > base.net_apy.unwrap());
    }

    #[test]
    fn same_asset_supplied_and_borrowed() {
        // One leg can do both; both sides accumulate.
        let markets = two_asset_markets();
        let used = vec![UsedAsset {
            symbol: "AAA".into(),
            is_supplied: true,
            supplied_usd: dec!(1000),
            is_borrowed: true,
            borrowed_usd: dec!(300),
            rate_override: None,
            uses_stable_rate: false,
        }];
        let position = aggregate(&used, &markets, &AggregateOptions::default(), &ctx()).unwrap();
        assert_eq!(position.supplied_usd, dec!(1000));
        assert_eq!(position.borrowed_usd, dec!(300));
    }

    // -----------------------------------------------------------------------
    // Permutation invariance
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn permutation_invariant(order in Just(base_assets()).prop_shuffle()) {
            let markets = two_asset_markets();
            let reference = aggregate(
                &base_assets(),
                &markets,
                &AggregateOptions::default(),
                &ctx(),
            )
            .unwrap();
            let shuffled = aggregate(&order, &markets, &AggregateOptions::default(), &ctx())
                .unwrap();

            prop_assert_eq!(reference.supplied_usd, shuffled.supplied_usd);
            prop_assert_eq!(reference.borrowed_usd, shuffled.borrowed_usd);
            prop_assert_eq!(reference.incentive_usd, shuffled.incentive_usd);

            let lhs = reference.net_apy.expect("finite");
            let rhs = shuffled.net_apy.expect("finite");
            prop_assert!((lhs - rhs).abs() <= dec!(0.0000000000000001));
        }
    }

    fn base_assets() -> Vec<UsedAsset> {
        vec![
            UsedAsset::supplied("AAA", dec!(1000)),
            UsedAsset::supplied("BBB", dec!(250)),
            UsedAsset::borrowed("BBB", dec!(400)),
            UsedAsset::borrowed("AAA", dec!(50)),
        ]
    }
}
