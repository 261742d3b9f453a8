//! Fee splitting for trades and single-fee skims for resolution flows.
//!
//! Trading fees are two *independent* floor divisions against the trade
//! amount — `platform_fee = amount * platform_bps / BPS`, `creator_fee =
//! amount * creator_bps / BPS` — with the net amount defined as whatever
//! remains after both are subtracted. Because the net is a residual by
//! subtraction rather than a third independent division, there is nothing
//! for the two fee components to leak against.

use primitive_types::U256;

use crate::error::EngineError;
use crate::math::{bps_of, checked_sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingFeeBreakdown {
    pub platform_fee: U256,
    pub creator_fee: U256,
    pub total_fee: U256,
    pub net: U256,
}

/// Split `amount` into a platform fee, a creator fee, and the remainder,
/// each component computed as its own independent `amount * bps / BPS` floor
/// division against `amount` directly.
pub fn split_trading_fee(
    amount: U256,
    platform_bps: u32,
    creator_bps: u32,
) -> Result<TradingFeeBreakdown, EngineError> {
    let platform_fee = bps_of(amount, platform_bps, crate::math::BPS_DENOMINATOR)?;
    let creator_fee = bps_of(amount, creator_bps, crate::math::BPS_DENOMINATOR)?;
    let total_fee = crate::math::checked_add(platform_fee, creator_fee)?;
    let net = checked_sub(amount, total_fee)?;

    Ok(TradingFeeBreakdown {
        platform_fee,
        creator_fee,
        total_fee,
        net,
    })
}

/// A single bps-denominated skim, e.g. the resolution fee taken from a
/// proposal/dispute bond post or a claim's gross payout.
pub fn skim(amount: U256, bps: u32) -> Result<(U256, U256), EngineError> {
    let fee = bps_of(amount, bps, crate::math::BPS_DENOMINATOR)?;
    let remainder = checked_sub(amount, fee)?;
    Ok((fee, remainder))
}
