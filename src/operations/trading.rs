//! Create, buy, and sell: the value-bearing operations that populate a
//! market's supplies and pool before any resolution activity begins.
//!
//! Every operation here follows checks-effects-interactions: state mutation
//! (supplies, pool, ledger credits) completes before the function returns
//! the amount, if any, the host must push directly to an external account
//! (treasury or the caller themselves). Pull-ledger credits never require a
//! push — they are claimed later via [`crate::operations::admin`]'s
//! sibling withdrawal calls.

use primitive_types::U256;

use crate::config::HeatLevel;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::events::{emit, Event};
use crate::fees::split_trading_fee;
use crate::math::{buy_shares, sell_proceeds};
use crate::state::market::Market;
use crate::types::{AccountId, MarketId, Side, Timestamp};

/// Amount the host must push to the configured treasury account after a
/// successful `create_market` or `create_market_and_buy` call.
pub struct CreateResult {
    pub market_id: MarketId,
    pub treasury_payout: U256,
}

pub struct CreateAndBuyResult {
    pub market_id: MarketId,
    pub treasury_payout: U256,
    pub shares_out: U256,
}

pub struct BuyResult {
    pub shares_out: U256,
    pub treasury_payout: U256,
}

pub struct SellResult {
    pub net_out: U256,
    pub treasury_payout: U256,
}

#[allow(clippy::too_many_arguments)]
fn new_market(
    engine: &mut Engine,
    caller: AccountId,
    question: String,
    evidence_link: String,
    rules: String,
    image_url: String,
    expiry: Timestamp,
    heat_level: HeatLevel,
) -> Result<MarketId, EngineError> {
    if question.trim().is_empty() {
        tracing::debug!(op = "create_market", "rejected: empty question");
        return Err(EngineError::EmptyQuestion);
    }
    if caller.is_zero() {
        tracing::warn!(op = "create_market", "rejected: zero account");
        return Err(EngineError::InvalidAccount);
    }

    let id = engine.next_market_id();
    let virtual_liquidity = engine.config.heat_levels.get(heat_level);
    let market = Market::new(
        id,
        question.clone(),
        evidence_link,
        rules,
        image_url,
        caller,
        expiry,
        heat_level,
        virtual_liquidity,
    );
    engine.markets.insert(id, market);

    emit(&Event::MarketCreated {
        id,
        creator: caller,
        question,
        expiry,
        heat_level,
        virtual_liquidity,
    });

    Ok(id)
}

/// Create a market with no initial trade. The entire posted `value` must
/// cover the creation fee and is forwarded to treasury in full.
#[allow(clippy::too_many_arguments)]
pub fn create_market(
    engine: &mut Engine,
    caller: AccountId,
    question: String,
    evidence_link: String,
    rules: String,
    image_url: String,
    expiry: Timestamp,
    heat_level: HeatLevel,
    value: U256,
    now: Timestamp,
) -> Result<CreateResult, EngineError> {
    if engine.config.paused {
        tracing::warn!(op = "create_market", "rejected: engine paused");
        return Err(EngineError::EnginePaused);
    }
    if expiry <= now {
        tracing::debug!(op = "create_market", expiry, now, "rejected: expiry not in the future");
        return Err(EngineError::InvalidExpiry);
    }
    if value < engine.config.creation_fee {
        tracing::debug!(op = "create_market", "rejected: insufficient creation fee");
        return Err(EngineError::InsufficientCreationFee);
    }

    engine.record_received(value)?;
    let market_id = new_market(engine, caller, question, evidence_link, rules, image_url, expiry, heat_level)?;
    engine.record_disbursed(value)?;

    Ok(CreateResult {
        market_id,
        treasury_payout: value,
    })
}

/// Create a market and immediately execute a first buy on the creator's
/// behalf with whatever value remains after the creation fee, so no other
/// party can be the market's first trader.
#[allow(clippy::too_many_arguments)]
pub fn create_market_and_buy(
    engine: &mut Engine,
    caller: AccountId,
    question: String,
    evidence_link: String,
    rules: String,
    image_url: String,
    expiry: Timestamp,
    heat_level: HeatLevel,
    side: Side,
    value: U256,
    min_shares_out: U256,
    now: Timestamp,
) -> Result<CreateAndBuyResult, EngineError> {
    if engine.config.paused {
        tracing::warn!(op = "create_market_and_buy", "rejected: engine paused");
        return Err(EngineError::EnginePaused);
    }
    if expiry <= now {
        tracing::debug!(op = "create_market_and_buy", expiry, now, "rejected: expiry not in the future");
        return Err(EngineError::InvalidExpiry);
    }
    if value < engine.config.creation_fee {
        tracing::debug!(op = "create_market_and_buy", "rejected: insufficient creation fee");
        return Err(EngineError::InsufficientCreationFee);
    }

    engine.record_received(value)?;
    let market_id = new_market(engine, caller, question, evidence_link, rules, image_url, expiry, heat_level)?;

    let creation_fee = engine.config.creation_fee;
    let buy_amount = crate::math::checked_sub(value, creation_fee)?;

    let buy_result = execute_buy(engine, market_id, caller, side, buy_amount, min_shares_out, now)?;
    engine.record_disbursed(creation_fee)?;

    Ok(CreateAndBuyResult {
        market_id,
        treasury_payout: crate::math::checked_add(creation_fee, buy_result.treasury_payout)?,
        shares_out: buy_result.shares_out,
    })
}

pub fn buy(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    side: Side,
    value: U256,
    min_shares_out: U256,
    now: Timestamp,
) -> Result<BuyResult, EngineError> {
    if engine.config.paused {
        tracing::warn!(market_id = ?market_id, op = "buy", "rejected: engine paused");
        return Err(EngineError::EnginePaused);
    }
    engine.record_received(value)?;
    execute_buy(engine, market_id, caller, side, value, min_shares_out, now)
}

fn execute_buy(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    side: Side,
    amount: U256,
    min_shares_out: U256,
    now: Timestamp,
) -> Result<BuyResult, EngineError> {
    if amount < engine.config.min_bet {
        tracing::debug!(market_id = ?market_id, op = "buy", amount = %amount, "rejected: below minimum bet");
        return Err(EngineError::BelowMinimumBet);
    }

    let platform_bps = engine.config.platform_fee_bps;
    let creator_bps = engine.config.creator_fee_bps;
    let breakdown = split_trading_fee(amount, platform_bps, creator_bps)?;

    let market = engine.market(market_id)?;
    if market.status(now) != crate::state::MarketStatus::Active {
        tracing::debug!(market_id = ?market_id, op = "buy", "rejected: market not active");
        return Err(EngineError::MarketNotActive);
    }
    let shares = buy_shares(breakdown.net, side, market.yes_supply, market.no_supply, market.virtual_liquidity)?;
    if shares < min_shares_out {
        tracing::debug!(market_id = ?market_id, op = "buy", shares = %shares, min_shares_out = %min_shares_out, "rejected: slippage exceeded");
        return Err(EngineError::SlippageExceeded);
    }

    let creator = market.creator;
    let market = engine.market_mut(market_id)?;
    match side {
        Side::Yes => market.yes_supply = crate::math::checked_add(market.yes_supply, shares)?,
        Side::No => market.no_supply = crate::math::checked_add(market.no_supply, shares)?,
    }
    market.pool_balance = crate::math::checked_add(market.pool_balance, breakdown.net)?;

    let position = engine.position_mut(market_id, caller);
    let held = position.shares_mut(side);
    *held = crate::math::checked_add(*held, shares)?;

    engine.creator_ledger.credit(creator, breakdown.creator_fee)?;
    emit(&Event::CreatorFeesCredited { account: creator, amount: breakdown.creator_fee });
    engine.record_disbursed(breakdown.platform_fee)?;

    emit(&Event::Trade {
        id: market_id,
        trader: caller,
        side,
        is_buy: true,
        shares,
        net_collateral: breakdown.net,
    });

    Ok(BuyResult {
        shares_out: shares,
        treasury_payout: breakdown.platform_fee,
    })
}

pub fn sell(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    side: Side,
    shares: U256,
    min_out: U256,
    now: Timestamp,
) -> Result<SellResult, EngineError> {
    if engine.config.paused {
        tracing::warn!(market_id = ?market_id, op = "sell", "rejected: engine paused");
        return Err(EngineError::EnginePaused);
    }

    let market = engine.market(market_id)?;
    if market.status(now) != crate::state::MarketStatus::Active {
        tracing::debug!(market_id = ?market_id, op = "sell", "rejected: market not active");
        return Err(EngineError::MarketNotActive);
    }

    let position = engine.position(market_id, caller).ok_or_else(|| {
        tracing::debug!(market_id = ?market_id, op = "sell", "rejected: no position");
        EngineError::InsufficientShares
    })?;
    if position.shares(side) < shares {
        tracing::debug!(market_id = ?market_id, op = "sell", "rejected: insufficient shares");
        return Err(EngineError::InsufficientShares);
    }

    let gross = sell_proceeds(shares, side, market.yes_supply, market.no_supply, market.virtual_liquidity)?;
    if gross > market.pool_balance {
        tracing::warn!(market_id = ?market_id, op = "sell", gross = %gross, "rejected: insufficient pool balance");
        return Err(EngineError::InsufficientPoolBalance);
    }

    let platform_bps = engine.config.platform_fee_bps;
    let creator_bps = engine.config.creator_fee_bps;
    let breakdown = split_trading_fee(gross, platform_bps, creator_bps)?;
    if breakdown.net < min_out {
        tracing::debug!(market_id = ?market_id, op = "sell", net = %breakdown.net, min_out = %min_out, "rejected: slippage exceeded");
        return Err(EngineError::SlippageExceeded);
    }

    let creator = market.creator;
    let market = engine.market_mut(market_id)?;
    match side {
        Side::Yes => market.yes_supply = crate::math::checked_sub(market.yes_supply, shares)?,
        Side::No => market.no_supply = crate::math::checked_sub(market.no_supply, shares)?,
    }
    market.pool_balance = crate::math::checked_sub(market.pool_balance, gross)?;

    let position = engine.position_mut(market_id, caller);
    let held = position.shares_mut(side);
    *held = crate::math::checked_sub(*held, shares)?;

    engine.creator_ledger.credit(creator, breakdown.creator_fee)?;
    emit(&Event::CreatorFeesCredited { account: creator, amount: breakdown.creator_fee });
    let total_out = crate::math::checked_add(breakdown.platform_fee, breakdown.net)?;
    engine.record_disbursed(total_out)?;

    emit(&Event::Trade {
        id: market_id,
        trader: caller,
        side,
        is_buy: false,
        shares,
        net_collateral: breakdown.net,
    });

    Ok(SellResult {
        net_out: breakdown.net,
        treasury_payout: breakdown.platform_fee,
    })
}
