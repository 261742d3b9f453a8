//! Bond sizing and the winner/voter split applied on disputed resolution.

use primitive_types::U256;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::math::{bps_of, checked_sub};

/// `max(min_bond_floor, pool_balance * dynamic_bond_bps / BPS)` — the
/// proposal bond required to propose an outcome on a given market.
pub fn required_proposal_bond(pool_balance: U256, config: &EngineConfig) -> Result<U256, EngineError> {
    let dynamic = bps_of(pool_balance, config.dynamic_bond_bps, crate::math::BPS_DENOMINATOR)?;
    Ok(config.min_bond_floor.max(dynamic))
}

/// Exactly double the proposal bond.
pub fn required_dispute_bond(proposal_bond: U256) -> Result<U256, EngineError> {
    crate::math::checked_mul(proposal_bond, U256::from(2u8))
}

/// Split a forfeited loser bond between the winning bonder and the
/// jury-fee pool reserved for winning voters.
pub fn split_loser_bond(loser_bond: U256, bond_winner_bps: u32, config: &EngineConfig) -> Result<(U256, U256), EngineError> {
    let _ = config;
    let winner_share = bps_of(loser_bond, bond_winner_bps, crate::math::BPS_DENOMINATOR)?;
    let voter_pool = checked_sub(loser_bond, winner_share)?;
    Ok((winner_share, voter_pool))
}
