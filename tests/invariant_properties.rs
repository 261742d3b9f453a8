//! Property-based coverage for the quantified invariants: constant-sum
//! pricing, no buy->sell arbitrage, share conservation, and weak solvency.

use primitive_types::U256;
use proptest::prelude::*;

use street_consensus_core::config::{EngineConfig, HeatLevel};
use street_consensus_core::engine::Engine;
use street_consensus_core::math::{buy_shares, price_no, price_yes, sell_proceeds};
use street_consensus_core::operations::trading;
use street_consensus_core::types::{AccountId, Side};

fn share_scale() -> U256 {
    U256::from(10u8).pow(U256::from(18u8))
}

fn unit_price() -> U256 {
    U256::from(10u8).pow(U256::from(16u8))
}

fn vl_from(raw: u64) -> U256 {
    U256::from(raw) * share_scale()
}

fn acct(n: u8) -> AccountId {
    AccountId([n; 32])
}

fn test_engine() -> Engine {
    let config = EngineConfig::scenario_default(acct(9), vec![acct(1), acct(2), acct(3)]);
    Engine::new(config).unwrap()
}

proptest! {
    /// `price_yes + price_no == U`, up to one unit of rounding from floor
    /// division, for any reachable (yes_supply, no_supply, virtual_liquidity).
    #[test]
    fn constant_sum_holds_for_any_supplies(
        yes_raw in 0u64..1_000_000,
        no_raw in 0u64..1_000_000,
        vl_raw in 1u64..1_000,
    ) {
        let yes_supply = U256::from(yes_raw) * share_scale();
        let no_supply = U256::from(no_raw) * share_scale();
        let vl = vl_from(vl_raw);

        let yes = price_yes(yes_supply, no_supply, vl).unwrap();
        let no = price_no(yes_supply, no_supply, vl).unwrap();
        let sum = yes + no;
        let diff = if sum > unit_price() { sum - unit_price() } else { unit_price() - sum };
        prop_assert!(diff <= U256::one(), "price_yes={} price_no={} sum={}", yes, no, sum);
    }

    /// An instantaneous buy immediately followed by a sell of the resulting
    /// shares, in the pure pricing kernel (no fees), can never extract more
    /// collateral than was paid in: pricing the sell against the post-sell
    /// state is what keeps this true.
    #[test]
    fn buy_then_sell_never_profits_before_fees(
        amount_raw in 1u64..10_000,
        vl_raw in 10u64..1_000,
        side_is_yes in any::<bool>(),
    ) {
        let amount = U256::from(amount_raw) * share_scale() / U256::from(1_000u32);
        let vl = vl_from(vl_raw);
        let side = if side_is_yes { Side::Yes } else { Side::No };
        let (yes_supply, no_supply) = (U256::zero(), U256::zero());

        let shares = buy_shares(amount, side, yes_supply, no_supply, vl).unwrap();
        let (post_yes, post_no) = match side {
            Side::Yes => (shares, U256::zero()),
            Side::No => (U256::zero(), shares),
        };
        let proceeds = sell_proceeds(shares, side, post_yes, post_no, vl).unwrap();
        prop_assert!(proceeds <= amount, "proceeds={} amount={}", proceeds, amount);
    }

    /// After an arbitrary sequence of buys and sells against one market,
    /// `yes_supply`/`no_supply` equal the net of every mint and burn this
    /// test itself performed — the engine never materializes or destroys
    /// shares outside of what buy/sell return.
    #[test]
    fn share_supply_matches_net_trade_history(
        trades in proptest::collection::vec(
            (1u64..50, any::<bool>(), any::<bool>()),
            1..15,
        ),
    ) {
        let mut engine = test_engine();
        let created = trading::create_market(
            &mut engine,
            acct(20),
            "does share supply stay exact".to_string(),
            String::new(),
            String::new(),
            String::new(),
            10_000_000,
            HeatLevel::Warm,
            U256::zero(),
            0,
        ).unwrap();

        let mut expected_yes = U256::zero();
        let mut expected_no = U256::zero();
        let mut held: Vec<(AccountId, U256, U256)> = Vec::new();

        for (i, (amount_raw, side_is_yes, is_buy)) in trades.iter().enumerate() {
            let trader = acct(100 + (i as u8 % 5));
            let side = if *side_is_yes { Side::Yes } else { Side::No };
            let entry = held.iter_mut().find(|(a, _, _)| *a == trader);
            let (yes_held, no_held) = match entry {
                Some((_, y, n)) => (*y, *n),
                None => (U256::zero(), U256::zero()),
            };
            let already_held = if *side_is_yes { yes_held } else { no_held };

            if *is_buy || already_held.is_zero() {
                let amount = U256::from(*amount_raw) * share_scale() / U256::from(10u32);
                if let Ok(result) = trading::buy(&mut engine, created.market_id, trader, side, amount, U256::zero(), 0) {
                    match side {
                        Side::Yes => expected_yes += result.shares_out,
                        Side::No => expected_no += result.shares_out,
                    }
                    match held.iter_mut().find(|(a, _, _)| *a == trader) {
                        Some((_, y, n)) => if *side_is_yes { *y += result.shares_out } else { *n += result.shares_out },
                        None => held.push((trader, if *side_is_yes { result.shares_out } else { U256::zero() }, if *side_is_yes { U256::zero() } else { result.shares_out })),
                    }
                }
            } else {
                let sell_amount = already_held / U256::from(2u32) + U256::one();
                if let Ok(_) = trading::sell(&mut engine, created.market_id, trader, side, sell_amount, U256::zero(), 0) {
                    match side {
                        Side::Yes => expected_yes -= sell_amount,
                        Side::No => expected_no -= sell_amount,
                    }
                    if let Some((_, y, n)) = held.iter_mut().find(|(a, _, _)| *a == trader) {
                        if *side_is_yes { *y -= sell_amount } else { *n -= sell_amount }
                    }
                }
            }
        }

        let market = engine.market(created.market_id).unwrap();
        prop_assert_eq!(market.yes_supply, expected_yes);
        prop_assert_eq!(market.no_supply, expected_no);
    }

    /// After an arbitrary sequence of buys and sells, the weak solvency
    /// check (pool balances + open bonds + jury pools + both ledgers) never
    /// exceeds collateral received minus collateral disbursed — expressed
    /// as `solvency_headroom()` never erroring with an underflow.
    #[test]
    fn solvency_headroom_never_underflows(
        trades in proptest::collection::vec((1u64..50, any::<bool>(), any::<bool>()), 1..20),
    ) {
        let mut engine = test_engine();
        let created = trading::create_market(
            &mut engine,
            acct(20),
            "does the engine stay solvent".to_string(),
            String::new(),
            String::new(),
            String::new(),
            10_000_000,
            HeatLevel::Warm,
            U256::zero(),
            0,
        ).unwrap();

        for (i, (amount_raw, side_is_yes, is_buy)) in trades.iter().enumerate() {
            let trader = acct(150 + (i as u8 % 5));
            let side = if *side_is_yes { Side::Yes } else { Side::No };

            if *is_buy {
                let amount = U256::from(*amount_raw) * share_scale() / U256::from(10u32);
                let _ = trading::buy(&mut engine, created.market_id, trader, side, amount, U256::zero(), 0);
            } else if let Some(position) = engine.position(created.market_id, trader) {
                let shares = position.shares(side);
                if !shares.is_zero() {
                    let _ = trading::sell(&mut engine, created.market_id, trader, side, shares / U256::from(2u32) + U256::one(), U256::zero(), 0);
                }
            }

            prop_assert!(engine.solvency_headroom().is_ok());
        }
    }
}
