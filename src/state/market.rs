//! A single binary prediction market and the pure status computation that
//! drives the Street Consensus state machine.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, HeatLevel};
use crate::types::{AccountId, MarketId, Timestamp};

/// Computed market status. Never stored — always derived from the record
/// and the current time, per the resolution state machine's "status is a
/// pure function" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketStatus {
    Active,
    Expired,
    Proposed,
    Disputed,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,

    pub question: String,
    pub evidence_link: String,
    pub rules: String,
    pub image_url: String,
    pub creator: AccountId,
    pub expiry: Timestamp,

    pub yes_supply: U256,
    pub no_supply: U256,
    pub pool_balance: U256,

    pub virtual_liquidity: U256,
    pub heat_level: HeatLevel,

    pub resolved: bool,
    pub outcome: bool,

    pub proposer: Option<AccountId>,
    pub proposed_outcome: bool,
    pub proposal_time: Timestamp,
    pub proposal_bond: U256,

    pub disputer: Option<AccountId>,
    pub dispute_time: Timestamp,
    pub dispute_bond: U256,

    pub yes_votes: U256,
    pub no_votes: U256,

    pub jury_fees_pool: U256,
}

impl Market {
    pub fn new(
        id: MarketId,
        question: String,
        evidence_link: String,
        rules: String,
        image_url: String,
        creator: AccountId,
        expiry: Timestamp,
        heat_level: HeatLevel,
        virtual_liquidity: U256,
    ) -> Self {
        Market {
            id,
            question,
            evidence_link,
            rules,
            image_url,
            creator,
            expiry,
            yes_supply: U256::zero(),
            no_supply: U256::zero(),
            pool_balance: U256::zero(),
            virtual_liquidity,
            heat_level,
            resolved: false,
            outcome: false,
            proposer: None,
            proposed_outcome: false,
            proposal_time: 0,
            proposal_bond: U256::zero(),
            disputer: None,
            dispute_time: 0,
            dispute_bond: U256::zero(),
            yes_votes: U256::zero(),
            no_votes: U256::zero(),
            jury_fees_pool: U256::zero(),
        }
    }

    /// `resolved -> Resolved; else disputer present -> Disputed; else
    /// proposer present -> Proposed; else now >= expiry -> Expired; else
    /// Active.` Never stored — recomputed on every access.
    pub fn status(&self, now: Timestamp) -> MarketStatus {
        if self.resolved {
            MarketStatus::Resolved
        } else if self.disputer.is_some() {
            MarketStatus::Disputed
        } else if self.proposer.is_some() {
            MarketStatus::Proposed
        } else if now >= self.expiry {
            MarketStatus::Expired
        } else {
            MarketStatus::Active
        }
    }

    pub fn is_one_sided(&self) -> bool {
        self.yes_supply.is_zero() || self.no_supply.is_zero()
    }

    pub fn creator_priority_active(&self, now: Timestamp, config: &EngineConfig) -> bool {
        now < self.expiry + config.creator_priority_window
    }

    pub fn dispute_window_open(&self, now: Timestamp, config: &EngineConfig) -> bool {
        now <= self.proposal_time + config.dispute_window
    }

    pub fn voting_window_open(&self, now: Timestamp, config: &EngineConfig) -> bool {
        now <= self.dispute_time + config.voting_window
    }

    pub fn proposal_cutoff(&self, config: &EngineConfig) -> Timestamp {
        self.expiry + config.emergency_refund_delay - config.proposal_cutoff_buffer
    }

    pub fn emergency_refund_eligible(&self, now: Timestamp, config: &EngineConfig) -> bool {
        now >= self.expiry + config.emergency_refund_delay
    }

    pub fn winning_supply(&self) -> U256 {
        if self.outcome {
            self.yes_supply
        } else {
            self.no_supply
        }
    }

    pub fn winning_votes(&self) -> U256 {
        if self.outcome {
            self.yes_votes
        } else {
            self.no_votes
        }
    }
}
