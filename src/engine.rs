//! The engine: one explicit, in-memory state object threaded through every
//! operation. No ambient statics — a host embeds `Engine` and serializes
//! access to it (one coarse lock, or a single-consumer command channel),
//! per the concurrency model's single-threaded-per-instance rule.

use std::collections::HashMap;

use primitive_types::U256;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::state::{Market, PendingAction, Position, PullLedger};
use crate::types::{AccountId, ActionId, MarketId};

/// Key into the position table: one position per (market, account) pair.
pub type PositionKey = (MarketId, AccountId);

#[derive(Debug, Clone)]
pub struct Engine {
    pub config: EngineConfig,

    pub(crate) markets: HashMap<MarketId, Market>,
    pub(crate) positions: HashMap<PositionKey, Position>,
    pub(crate) pending_actions: HashMap<ActionId, PendingAction>,

    /// Bond returns, proposer rewards, tie refunds, bond-winner/voter
    /// distributions, and jury-fee claims.
    pub(crate) bond_ledger: PullLedger,
    /// Market-creator trading rebates.
    pub(crate) creator_ledger: PullLedger,

    next_market_id: MarketId,
    next_action_id: ActionId,

    /// Total collateral ever received by the engine, across every
    /// value-bearing command. Used for the weak solvency invariant.
    pub(crate) total_received: U256,
    /// Total collateral ever pushed or withdrawn out of the engine.
    pub(crate) total_disbursed: U256,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Engine {
            config,
            markets: HashMap::new(),
            positions: HashMap::new(),
            pending_actions: HashMap::new(),
            bond_ledger: PullLedger::new(),
            creator_ledger: PullLedger::new(),
            next_market_id: 0,
            next_action_id: 0,
            total_received: U256::zero(),
            total_disbursed: U256::zero(),
        })
    }

    pub(crate) fn record_received(&mut self, amount: U256) -> Result<(), EngineError> {
        self.total_received = crate::math::checked_add(self.total_received, amount)?;
        Ok(())
    }

    pub(crate) fn record_disbursed(&mut self, amount: U256) -> Result<(), EngineError> {
        self.total_disbursed = crate::math::checked_add(self.total_disbursed, amount)?;
        Ok(())
    }

    /// Maps a host's outbound-push failure to the closed error set. Every
    /// disbursement an operation reports (`treasury_payout`, `net_out`, a
    /// claim's `net`, …) is pushed by the host *after* this call returns, per
    /// the checks-effects-interactions ordering — call this with the push's
    /// own result to surface a typed rejection instead of losing track of
    /// undelivered value.
    pub fn acknowledge_disbursement(push_result: Result<(), ()>) -> Result<(), EngineError> {
        push_result.map_err(|_| {
            tracing::warn!(op = "disbursement", "rejected: host transfer failed");
            EngineError::TransferFailed
        })
    }

    pub(crate) fn next_market_id(&mut self) -> MarketId {
        let id = self.next_market_id;
        self.next_market_id += 1;
        id
    }

    pub(crate) fn next_action_id(&mut self) -> ActionId {
        let id = self.next_action_id;
        self.next_action_id += 1;
        id
    }

    pub fn market(&self, id: MarketId) -> Result<&Market, EngineError> {
        self.markets.get(&id).ok_or(EngineError::MarketNotActive)
    }

    pub(crate) fn market_mut(&mut self, id: MarketId) -> Result<&mut Market, EngineError> {
        self.markets.get_mut(&id).ok_or(EngineError::MarketNotActive)
    }

    pub fn position(&self, market_id: MarketId, account: AccountId) -> Option<&Position> {
        self.positions.get(&(market_id, account))
    }

    /// Materializes a position on first trade or first vote, never before.
    pub(crate) fn position_mut(&mut self, market_id: MarketId, account: AccountId) -> &mut Position {
        self.positions.entry((market_id, account)).or_insert_with(Position::new)
    }

    pub fn pending_action(&self, id: ActionId) -> Option<&PendingAction> {
        self.pending_actions.get(&id)
    }

    pub fn bond_ledger_balance(&self, account: AccountId) -> U256 {
        self.bond_ledger.balance_of(account)
    }

    pub fn creator_ledger_balance(&self, account: AccountId) -> U256 {
        self.creator_ledger.balance_of(account)
    }

    pub fn markets_len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_paused(&self) -> bool {
        self.config.paused
    }

    /// Weak solvency check (invariant 2, §3.2): pool balances + open bonds +
    /// jury-fee pools + both ledger totals must never exceed what the
    /// engine has received minus what it has already disbursed.
    pub fn solvency_headroom(&self) -> Result<U256, EngineError> {
        let mut committed = U256::zero();
        for market in self.markets.values() {
            committed = crate::math::checked_add(committed, market.pool_balance)?;
            committed = crate::math::checked_add(committed, market.proposal_bond)?;
            committed = crate::math::checked_add(committed, market.dispute_bond)?;
            committed = crate::math::checked_add(committed, market.jury_fees_pool)?;
        }
        committed = crate::math::checked_add(committed, self.bond_ledger.total())?;
        committed = crate::math::checked_add(committed, self.creator_ledger.total())?;

        let available = crate::math::checked_sub(self.total_received, self.total_disbursed)?;
        crate::math::checked_sub(available, committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EngineConfig {
        EngineConfig::scenario_default(
            AccountId([9u8; 32]),
            vec![AccountId([1u8; 32]), AccountId([2u8; 32]), AccountId([3u8; 32])],
        )
    }

    #[test]
    fn test_new_engine_has_no_markets() {
        let engine = Engine::new(test_config()).unwrap();
        assert_eq!(engine.markets_len(), 0);
    }

    #[test]
    fn test_new_engine_rejects_invalid_config() {
        let mut config = test_config();
        config.treasury = AccountId::ZERO;
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_market_not_found_is_market_not_active() {
        let engine = Engine::new(test_config()).unwrap();
        assert_eq!(engine.market(0), Err(EngineError::MarketNotActive));
    }

    #[test]
    fn test_position_absent_until_materialized() {
        let mut engine = Engine::new(test_config()).unwrap();
        assert!(engine.position(0, AccountId([5u8; 32])).is_none());
        engine.position_mut(0, AccountId([5u8; 32]));
        assert!(engine.position(0, AccountId([5u8; 32])).is_some());
    }

    #[test]
    fn test_solvency_headroom_starts_at_zero() {
        let engine = Engine::new(test_config()).unwrap();
        assert_eq!(engine.solvency_headroom().unwrap(), U256::zero());
    }

    #[test]
    fn test_acknowledge_disbursement_maps_host_failure() {
        assert!(Engine::acknowledge_disbursement(Ok(())).is_ok());
        assert_eq!(Engine::acknowledge_disbursement(Err(())), Err(EngineError::TransferFailed));
    }
}
