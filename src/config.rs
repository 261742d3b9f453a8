//! Engine-wide configuration: fee schedule, bond parameters, timing windows,
//! heat-level tiers, and the administrator set.
//!
//! Every tunable field validates as one unit via [`EngineConfig::validate`] —
//! there is no narrower, field-local validation path. Value bounds and fee
//! ceilings are engine constants, never administratively tunable, per the
//! administrative action queue's validation table.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::math::BPS_DENOMINATOR;
use crate::types::AccountId;

/// Named tiers selecting a new market's immutable virtual liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatLevel {
    Cold,
    Cool,
    Warm,
    Hot,
    Blazing,
}

impl HeatLevel {
    pub const ALL: [HeatLevel; 5] = [
        HeatLevel::Cold,
        HeatLevel::Cool,
        HeatLevel::Warm,
        HeatLevel::Hot,
        HeatLevel::Blazing,
    ];
}

/// Per-tier virtual liquidity values, in `1e18`-scaled share units.
///
/// `Warm = 200 * 1e18` matches the literal scenario default used throughout
/// the end-to-end examples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatLevelTiers {
    pub cold: U256,
    pub cool: U256,
    pub warm: U256,
    pub hot: U256,
    pub blazing: U256,
}

impl HeatLevelTiers {
    pub fn get(&self, level: HeatLevel) -> U256 {
        match level {
            HeatLevel::Cold => self.cold,
            HeatLevel::Cool => self.cool,
            HeatLevel::Warm => self.warm,
            HeatLevel::Hot => self.hot,
            HeatLevel::Blazing => self.blazing,
        }
    }

    pub fn set(&mut self, level: HeatLevel, value: U256) {
        match level {
            HeatLevel::Cold => self.cold = value,
            HeatLevel::Cool => self.cool = value,
            HeatLevel::Warm => self.warm = value,
            HeatLevel::Hot => self.hot = value,
            HeatLevel::Blazing => self.blazing = value,
        }
    }
}

impl Default for HeatLevelTiers {
    fn default() -> Self {
        let share = U256::from(10u8).pow(U256::from(18u8));
        HeatLevelTiers {
            cold: U256::from(50u32) * share,
            cool: U256::from(100u32) * share,
            warm: U256::from(200u32) * share,
            hot: U256::from(400u32) * share,
            blazing: U256::from(800u32) * share,
        }
    }
}

/// Which fee a `SetFee` administrative action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeKind {
    Platform,
    Creator,
    Resolution,
    ProposerReward,
    Creation,
}

/// Engine-wide configuration. A single instance lives inside [`crate::engine::Engine`].
///
/// All bounds below are compile-time constants (see the `*_MAX`/`*_MIN`
/// associated constants); administrative setters reject values outside
/// them and then re-run [`EngineConfig::validate`] against the whole
/// resulting config before committing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub treasury: AccountId,
    pub administrators: Vec<AccountId>,
    pub confirmation_threshold: usize,

    pub platform_fee_bps: u32,
    pub creator_fee_bps: u32,
    pub resolution_fee_bps: u32,
    pub proposer_reward_bps: u32,
    pub creation_fee: U256,

    pub min_bet: U256,
    pub min_bond_floor: U256,
    pub dynamic_bond_bps: u32,
    pub bond_winner_bps: u32,

    pub heat_levels: HeatLevelTiers,

    pub creator_priority_window: u64,
    pub dispute_window: u64,
    pub voting_window: u64,
    pub emergency_refund_delay: u64,
    pub proposal_cutoff_buffer: u64,
    pub action_expiry_window: u64,

    pub paused: bool,
}

impl EngineConfig {
    pub const MAX_TRADING_FEE_BPS: u32 = 1_000; // 10%, platform+creator ceiling each
    pub const MAX_RESOLUTION_FEE_BPS: u32 = 500; // 5%
    pub const MAX_PROPOSER_REWARD_BPS: u32 = 1_000; // 10%
    pub const MIN_BET_LO: u128 = 10u128.pow(12);
    pub const MIN_BET_HI: u128 = 10u128.pow(18);
    pub const MIN_BOND_FLOOR_LO: u128 = 10u128.pow(12);
    pub const MIN_BOND_FLOOR_HI: u128 = 10u128.pow(18);
    pub const DYNAMIC_BOND_BPS_HI: u32 = 2_000; // 20%
    pub const BOND_WINNER_BPS_HI: u32 = BPS_DENOMINATOR; // a full sweep to the winner is permitted
    pub const HEAT_LEVEL_LO: u128 = 10u128.pow(18);
    pub const HEAT_LEVEL_HI: u128 = 100_000u128 * 10u128.pow(18);
    pub const MAX_CREATION_FEE: u128 = 10u128.pow(18);

    /// A configuration matching the literal scenario values used throughout
    /// the end-to-end test suite: platform 100bps, creator 50bps,
    /// resolution 30bps, proposer reward 50bps, bond winner 5000bps (50%),
    /// min bet `5e15`, min bond floor `5e15`, dynamic bond 100bps, warm
    /// virtual liquidity `200e18`.
    pub fn scenario_default(treasury: AccountId, administrators: Vec<AccountId>) -> Self {
        let threshold = administrators.len().max(1);
        EngineConfig {
            treasury,
            administrators,
            confirmation_threshold: threshold,
            platform_fee_bps: 100,
            creator_fee_bps: 50,
            resolution_fee_bps: 30,
            proposer_reward_bps: 50,
            creation_fee: U256::zero(),
            min_bet: U256::from(5_000_000_000_000_000u64),
            min_bond_floor: U256::from(5_000_000_000_000_000u64),
            dynamic_bond_bps: 100,
            bond_winner_bps: 5_000,
            heat_levels: HeatLevelTiers::default(),
            creator_priority_window: 600,
            dispute_window: 1_800,
            voting_window: 3_600,
            emergency_refund_delay: 86_400,
            proposal_cutoff_buffer: 7_200,
            action_expiry_window: 259_200,
            paused: false,
        }
    }

    /// Sum of the two per-trade fees applied on buys and sells.
    pub fn trading_fee_bps(&self) -> u32 {
        self.platform_fee_bps + self.creator_fee_bps
    }

    /// Validate every invariant the configuration must hold, regardless of
    /// which field was most recently changed. Administrative setters always
    /// call this against the full post-change config before committing —
    /// there is no narrower, field-local validation path.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.platform_fee_bps > Self::MAX_TRADING_FEE_BPS
            || self.creator_fee_bps > Self::MAX_TRADING_FEE_BPS
        {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.trading_fee_bps() >= BPS_DENOMINATOR {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.resolution_fee_bps > Self::MAX_RESOLUTION_FEE_BPS {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.proposer_reward_bps > Self::MAX_PROPOSER_REWARD_BPS {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.creation_fee.as_u128() > Self::MAX_CREATION_FEE {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.bond_winner_bps > Self::BOND_WINNER_BPS_HI {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.dynamic_bond_bps > Self::DYNAMIC_BOND_BPS_HI {
            return Err(EngineError::ParameterOutOfBounds);
        }

        let min_bet = self.min_bet.as_u128();
        if !(Self::MIN_BET_LO..=Self::MIN_BET_HI).contains(&min_bet) {
            return Err(EngineError::ParameterOutOfBounds);
        }
        let min_bond_floor = self.min_bond_floor.as_u128();
        if !(Self::MIN_BOND_FLOOR_LO..=Self::MIN_BOND_FLOOR_HI).contains(&min_bond_floor) {
            return Err(EngineError::ParameterOutOfBounds);
        }

        for tier in HeatLevel::ALL {
            let value = self.heat_levels.get(tier).as_u128();
            if !(Self::HEAT_LEVEL_LO..=Self::HEAT_LEVEL_HI).contains(&value) {
                return Err(EngineError::ParameterOutOfBounds);
            }
        }

        if self.treasury.is_zero() {
            return Err(EngineError::InvalidAccount);
        }
        if self.administrators.is_empty() {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.confirmation_threshold == 0 || self.confirmation_threshold > self.administrators.len() {
            return Err(EngineError::ParameterOutOfBounds);
        }

        if self.creator_priority_window == 0
            || self.dispute_window == 0
            || self.voting_window == 0
            || self.emergency_refund_delay == 0
            || self.proposal_cutoff_buffer == 0
            || self.action_expiry_window == 0
        {
            return Err(EngineError::ParameterOutOfBounds);
        }
        if self.proposal_cutoff_buffer >= self.emergency_refund_delay {
            return Err(EngineError::ParameterOutOfBounds);
        }

        Ok(())
    }

    pub fn fee_bps(&self, kind: FeeKind) -> u32 {
        match kind {
            FeeKind::Platform => self.platform_fee_bps,
            FeeKind::Creator => self.creator_fee_bps,
            FeeKind::Resolution => self.resolution_fee_bps,
            FeeKind::ProposerReward => self.proposer_reward_bps,
            FeeKind::Creation => 0, // creation fee is a flat amount, not bps
        }
    }

    pub fn set_fee_bps(&mut self, kind: FeeKind, value: u32) -> Result<(), EngineError> {
        let mut candidate = self.clone();
        candidate.set_fee_bps_in_place(kind, value)?;
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Apply a fee change without validating — callers that re-validate the
    /// whole config afterward (the administrative action queue) use this
    /// directly to avoid validating twice.
    pub fn set_fee_bps_in_place(&mut self, kind: FeeKind, value: u32) -> Result<(), EngineError> {
        match kind {
            FeeKind::Platform => self.platform_fee_bps = value,
            FeeKind::Creator => self.creator_fee_bps = value,
            FeeKind::Resolution => self.resolution_fee_bps = value,
            FeeKind::ProposerReward => self.proposer_reward_bps = value,
            FeeKind::Creation => return Err(EngineError::ParameterOutOfBounds),
        }
        Ok(())
    }
}
