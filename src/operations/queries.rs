//! Read-only queries: pure functions of engine state. Every query here
//! composes the pricing kernel and bond-sizing helpers against a market's
//! current record rather than mutating anything, as free functions over
//! `Engine` rather than methods on the market record itself.

use primitive_types::U256;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::math::{buy_shares, max_sellable as max_sellable_kernel, price_no, price_yes, sell_proceeds};
use crate::operations::bonds::{required_dispute_bond, required_proposal_bond};
use crate::state::MarketStatus;
use crate::types::{AccountId, MarketId, Side};

/// Current YES price for a market.
pub fn current_price_yes(engine: &Engine, market_id: MarketId) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    price_yes(market.yes_supply, market.no_supply, market.virtual_liquidity)
}

/// Current NO price for a market.
pub fn current_price_no(engine: &Engine, market_id: MarketId) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    price_no(market.yes_supply, market.no_supply, market.virtual_liquidity)
}

/// Status of a market at `now`, without mutating anything.
pub fn market_status(engine: &Engine, market_id: MarketId, now: u64) -> Result<MarketStatus, EngineError> {
    Ok(engine.market(market_id)?.status(now))
}

/// Shares a buy of `amount` post-fee collateral would mint, at the market's
/// *current* pre-trade price. Does not account for the trading fee split —
/// callers preview against the post-fee amount they intend to pass to `buy`.
pub fn preview_buy(engine: &Engine, market_id: MarketId, side: Side, amount: U256) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    buy_shares(amount, side, market.yes_supply, market.no_supply, market.virtual_liquidity)
}

/// Gross collateral proceeds (pre-fee) a sell of `shares` would yield,
/// priced at the post-sell state per spec §4.2.
pub fn preview_sell(engine: &Engine, market_id: MarketId, side: Side, shares: U256) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    sell_proceeds(shares, side, market.yes_supply, market.no_supply, market.virtual_liquidity)
}

/// Largest share count of `side` that `account` could sell right now without
/// exceeding the market's pool balance.
pub fn max_sellable(engine: &Engine, market_id: MarketId, account: AccountId, side: Side) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    let user_shares = engine.position(market_id, account).map(|p| p.shares(side)).unwrap_or_default();
    max_sellable_kernel(
        user_shares,
        side,
        market.yes_supply,
        market.no_supply,
        market.virtual_liquidity,
        market.pool_balance,
    )
}

/// Bond a proposer would need to post right now to propose an outcome.
pub fn required_bond(engine: &Engine, market_id: MarketId) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    required_proposal_bond(market.pool_balance, &engine.config)
}

/// Bond a disputer would need to post right now, given the market's current
/// proposal bond (zero if there is none, matching the precondition that
/// dispute only applies to a `Proposed` market).
pub fn dispute_bond(engine: &Engine, market_id: MarketId) -> Result<U256, EngineError> {
    let market = engine.market(market_id)?;
    required_dispute_bond(market.proposal_bond)
}

/// Amount currently credited to `account` on the bond/voter pull ledger.
pub fn pending_bond_withdrawal(engine: &Engine, account: AccountId) -> U256 {
    engine.bond_ledger_balance(account)
}

/// Amount currently credited to `account` on the creator-rebate pull ledger.
pub fn pending_creator_withdrawal(engine: &Engine, account: AccountId) -> U256 {
    engine.creator_ledger_balance(account)
}
