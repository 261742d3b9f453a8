//! Street Consensus: propose → dispute → vote → finalize, plus the claim,
//! emergency-refund, and jury-fee-claim payout paths.

use primitive_types::U256;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::events::{emit, Event};
use crate::fees::skim;
use crate::math::{checked_sub, mul_div_floor};
use crate::operations::bonds::{required_dispute_bond, required_proposal_bond, split_loser_bond};
use crate::state::MarketStatus;
use crate::types::{AccountId, MarketId, Timestamp};

pub struct ProposeResult {
    pub treasury_payout: U256,
}

pub struct DisputeResult {
    pub treasury_payout: U256,
}

pub struct ClaimResult {
    pub net: U256,
    pub treasury_payout: U256,
}

pub struct EmergencyRefundResult {
    pub amount: U256,
}

pub struct JuryFeesClaimResult {
    pub amount: U256,
}

pub fn propose_outcome(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    proposed_outcome: bool,
    value: U256,
    now: Timestamp,
) -> Result<ProposeResult, EngineError> {
    engine.record_received(value)?;

    let market = engine.market(market_id)?;
    match market.status(now) {
        MarketStatus::Proposed | MarketStatus::Disputed | MarketStatus::Resolved => {
            tracing::debug!(market_id = ?market_id, op = "propose_outcome", "rejected: already proposed");
            return Err(EngineError::AlreadyProposed);
        }
        MarketStatus::Active => {
            tracing::debug!(market_id = ?market_id, op = "propose_outcome", "rejected: market not expired");
            return Err(EngineError::MarketNotExpired);
        }
        MarketStatus::Expired => {}
    }
    if market.is_one_sided() {
        tracing::debug!(market_id = ?market_id, op = "propose_outcome", "rejected: one-sided market");
        return Err(EngineError::OneSidedMarket);
    }
    if now >= market.proposal_cutoff(&engine.config) {
        tracing::debug!(market_id = ?market_id, op = "propose_outcome", "rejected: proposal window closed");
        return Err(EngineError::ProposalWindowClosed);
    }
    if market.creator_priority_active(now, &engine.config) && caller != market.creator {
        tracing::debug!(market_id = ?market_id, op = "propose_outcome", "rejected: creator priority window active");
        return Err(EngineError::CreatorPriorityActive);
    }

    let required = required_proposal_bond(market.pool_balance, &engine.config)?;
    let (fee, remainder) = skim(value, engine.config.resolution_fee_bps)?;
    if remainder < required {
        tracing::debug!(market_id = ?market_id, op = "propose_outcome", "rejected: insufficient bond");
        return Err(EngineError::InsufficientBond);
    }

    let market = engine.market_mut(market_id)?;
    market.proposer = Some(caller);
    market.proposed_outcome = proposed_outcome;
    market.proposal_time = now;
    market.proposal_bond = remainder;

    engine.record_disbursed(fee)?;

    emit(&Event::OutcomeProposed {
        id: market_id,
        proposer: caller,
        proposed_outcome,
        bond: remainder,
    });

    Ok(ProposeResult { treasury_payout: fee })
}

pub fn dispute(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    value: U256,
    now: Timestamp,
) -> Result<DisputeResult, EngineError> {
    engine.record_received(value)?;

    let market = engine.market(market_id)?;
    if market.status(now) != MarketStatus::Proposed {
        tracing::debug!(market_id = ?market_id, op = "dispute", "rejected: no proposed outcome to dispute");
        return Err(EngineError::NotProposed);
    }
    if !market.dispute_window_open(now, &engine.config) {
        tracing::debug!(market_id = ?market_id, op = "dispute", "rejected: dispute window expired");
        return Err(EngineError::DisputeWindowExpired);
    }

    let required = required_dispute_bond(market.proposal_bond)?;
    let (fee, remainder) = skim(value, engine.config.resolution_fee_bps)?;
    if remainder < required {
        tracing::debug!(market_id = ?market_id, op = "dispute", "rejected: insufficient bond");
        return Err(EngineError::InsufficientBond);
    }

    let market = engine.market_mut(market_id)?;
    market.disputer = Some(caller);
    market.dispute_time = now;
    market.dispute_bond = remainder;

    engine.record_disbursed(fee)?;

    emit(&Event::ProposalDisputed {
        id: market_id,
        disputer: caller,
        bond: remainder,
    });

    Ok(DisputeResult { treasury_payout: fee })
}

pub fn vote(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    outcome: bool,
    now: Timestamp,
) -> Result<(), EngineError> {
    let market = engine.market(market_id)?;
    if market.status(now) != MarketStatus::Disputed {
        tracing::debug!(market_id = ?market_id, op = "vote", "rejected: market not under dispute");
        return Err(EngineError::NotDisputed);
    }
    if !market.voting_window_open(now, &engine.config) {
        tracing::debug!(market_id = ?market_id, op = "vote", "rejected: voting window expired");
        return Err(EngineError::VotingWindowExpired);
    }

    let position = engine.position(market_id, caller).ok_or_else(|| {
        tracing::debug!(market_id = ?market_id, op = "vote", "rejected: no shares for voting");
        EngineError::NoSharesForVoting
    })?;
    if position.has_voted {
        tracing::debug!(market_id = ?market_id, op = "vote", "rejected: already voted");
        return Err(EngineError::AlreadyVoted);
    }
    let weight = position.total_shares();
    if weight.is_zero() {
        tracing::debug!(market_id = ?market_id, op = "vote", "rejected: zero voting weight");
        return Err(EngineError::NoSharesForVoting);
    }

    let position = engine.position_mut(market_id, caller);
    position.has_voted = true;
    position.voted_outcome = outcome;

    let market = engine.market_mut(market_id)?;
    if outcome {
        market.yes_votes = crate::math::checked_add(market.yes_votes, weight)?;
    } else {
        market.no_votes = crate::math::checked_add(market.no_votes, weight)?;
    }

    emit(&Event::VoteCast {
        id: market_id,
        voter: caller,
        outcome,
        weight,
    });

    Ok(())
}

pub fn finalize(engine: &mut Engine, market_id: MarketId, now: Timestamp) -> Result<(), EngineError> {
    let market = engine.market(market_id)?;
    match market.status(now) {
        MarketStatus::Proposed => finalize_proposed(engine, market_id, now),
        MarketStatus::Disputed => finalize_disputed(engine, market_id, now),
        _ => {
            tracing::debug!(market_id = ?market_id, op = "finalize", "rejected: not finalizable from this status");
            Err(EngineError::NotFinalizable)
        }
    }
}

fn finalize_proposed(engine: &mut Engine, market_id: MarketId, now: Timestamp) -> Result<(), EngineError> {
    let market = engine.market(market_id)?;
    if market.dispute_window_open(now, &engine.config) {
        tracing::debug!(market_id = ?market_id, op = "finalize", "rejected: dispute window still open");
        return Err(EngineError::NotFinalizable);
    }

    let proposer = market.proposer.expect("status Proposed implies proposer is set");
    let proposed_outcome = market.proposed_outcome;
    let winning_supply_is_zero = if proposed_outcome {
        market.yes_supply.is_zero()
    } else {
        market.no_supply.is_zero()
    };

    if winning_supply_is_zero {
        let bond = market.proposal_bond;
        let market = engine.market_mut(market_id)?;
        market.proposer = None;
        market.proposal_bond = U256::zero();
        engine.bond_ledger.credit(proposer, bond)?;
        emit(&Event::WithdrawalCredited { account: proposer, amount: bond });

        emit(&Event::MarketResolutionFailed { id: market_id });
        return Ok(());
    }

    let proposer_reward = mul_div_floor(
        market.pool_balance,
        U256::from(engine.config.proposer_reward_bps),
        U256::from(crate::math::BPS_DENOMINATOR),
    )?;
    let bond = market.proposal_bond;

    let market = engine.market_mut(market_id)?;
    market.pool_balance = checked_sub(market.pool_balance, proposer_reward)?;
    market.resolved = true;
    market.outcome = proposed_outcome;
    market.proposal_bond = U256::zero();

    let credit = crate::math::checked_add(bond, proposer_reward)?;
    engine.bond_ledger.credit(proposer, credit)?;
    emit(&Event::WithdrawalCredited { account: proposer, amount: credit });

    emit(&Event::ProposerRewardPaid {
        id: market_id,
        proposer,
        amount: proposer_reward,
    });
    emit(&Event::MarketResolved {
        id: market_id,
        outcome: proposed_outcome,
        was_disputed: false,
    });

    Ok(())
}

fn finalize_disputed(engine: &mut Engine, market_id: MarketId, now: Timestamp) -> Result<(), EngineError> {
    let market = engine.market(market_id)?;
    if market.voting_window_open(now, &engine.config) {
        tracing::debug!(market_id = ?market_id, op = "finalize", "rejected: voting window not ended yet");
        return Err(EngineError::VotingNotEnded);
    }

    let is_tie = market.yes_votes == market.no_votes;
    let majority_outcome = market.yes_votes > market.no_votes;
    let majority_supply_is_zero = if majority_outcome {
        market.yes_supply.is_zero()
    } else {
        market.no_supply.is_zero()
    };

    if is_tie || majority_supply_is_zero {
        return finalize_tie(engine, market_id);
    }

    let proposer = market.proposer.expect("status Disputed implies proposer is set");
    let disputer = market.disputer.expect("status Disputed implies disputer is set");
    let proposed_outcome = market.proposed_outcome;
    let proposer_wins = proposed_outcome == majority_outcome;

    let proposal_bond = market.proposal_bond;
    let dispute_bond = market.dispute_bond;
    let pool_balance = market.pool_balance;

    let proposer_reward = if proposer_wins {
        mul_div_floor(
            pool_balance,
            U256::from(engine.config.proposer_reward_bps),
            U256::from(crate::math::BPS_DENOMINATOR),
        )?
    } else {
        U256::zero()
    };

    let (winner, winner_bond, loser_bond) = if proposer_wins {
        (proposer, proposal_bond, dispute_bond)
    } else {
        (disputer, dispute_bond, proposal_bond)
    };

    let (winner_share, voter_pool) = split_loser_bond(loser_bond, engine.config.bond_winner_bps, &engine.config)?;

    let market = engine.market_mut(market_id)?;
    market.resolved = true;
    market.outcome = majority_outcome;
    market.proposal_bond = U256::zero();
    market.dispute_bond = U256::zero();
    if proposer_wins {
        market.pool_balance = checked_sub(market.pool_balance, proposer_reward)?;
    }

    let total_winning_votes = if majority_outcome { market.yes_votes } else { market.no_votes };

    let mut credit = crate::math::checked_add(winner_bond, winner_share)?;
    if proposer_wins {
        credit = crate::math::checked_add(credit, proposer_reward)?;
        emit(&Event::ProposerRewardPaid {
            id: market_id,
            proposer,
            amount: proposer_reward,
        });
    }
    engine.bond_ledger.credit(winner, credit)?;
    emit(&Event::WithdrawalCredited { account: winner, amount: credit });
    emit(&Event::BondDistributed {
        id: market_id,
        winner,
        amount: credit,
    });

    if total_winning_votes.is_zero() {
        engine.record_disbursed(voter_pool)?;
    } else if !voter_pool.is_zero() {
        let market = engine.market_mut(market_id)?;
        market.jury_fees_pool = voter_pool;
        emit(&Event::JuryFeesPoolCreated {
            id: market_id,
            amount: voter_pool,
        });
    }

    emit(&Event::MarketResolved {
        id: market_id,
        outcome: majority_outcome,
        was_disputed: true,
    });

    Ok(())
}

fn finalize_tie(engine: &mut Engine, market_id: MarketId) -> Result<(), EngineError> {
    let market = engine.market(market_id)?;
    let proposer = market.proposer.expect("status Disputed implies proposer is set");
    let disputer = market.disputer.expect("status Disputed implies disputer is set");
    let proposal_bond = market.proposal_bond;
    let dispute_bond = market.dispute_bond;

    let market = engine.market_mut(market_id)?;
    market.proposer = None;
    market.disputer = None;
    market.proposal_bond = U256::zero();
    market.dispute_bond = U256::zero();

    engine.bond_ledger.credit(proposer, proposal_bond)?;
    emit(&Event::WithdrawalCredited { account: proposer, amount: proposal_bond });
    engine.bond_ledger.credit(disputer, dispute_bond)?;
    emit(&Event::WithdrawalCredited { account: disputer, amount: dispute_bond });

    emit(&Event::TieFinalized { id: market_id });
    Ok(())
}

pub fn claim(engine: &mut Engine, market_id: MarketId, caller: AccountId, now: Timestamp) -> Result<ClaimResult, EngineError> {
    let _ = now;
    let market = engine.market(market_id)?;
    if !market.resolved {
        tracing::debug!(market_id = ?market_id, op = "claim", "rejected: market not resolved");
        return Err(EngineError::NotResolved);
    }
    let outcome = market.outcome;

    let position = engine.position(market_id, caller).ok_or_else(|| {
        tracing::debug!(market_id = ?market_id, op = "claim", "rejected: no position");
        EngineError::NoPosition
    })?;
    if position.claimed {
        tracing::debug!(market_id = ?market_id, op = "claim", "rejected: already claimed");
        return Err(EngineError::AlreadyClaimed);
    }
    if position.emergency_refunded {
        tracing::debug!(market_id = ?market_id, op = "claim", "rejected: already emergency-refunded");
        return Err(EngineError::AlreadyEmergencyRefunded);
    }
    let winning_shares = position.winning_shares(outcome);
    if winning_shares.is_zero() {
        tracing::debug!(market_id = ?market_id, op = "claim", "rejected: nothing to claim");
        return Err(EngineError::NothingToClaim);
    }

    let total_winning = market.winning_supply();
    let gross = mul_div_floor(winning_shares, market.pool_balance, total_winning)?;
    let (fee, net) = skim(gross, engine.config.resolution_fee_bps)?;

    let market = engine.market_mut(market_id)?;
    market.pool_balance = checked_sub(market.pool_balance, gross)?;
    if outcome {
        market.yes_supply = checked_sub(market.yes_supply, winning_shares)?;
    } else {
        market.no_supply = checked_sub(market.no_supply, winning_shares)?;
    }

    let position = engine.position_mut(market_id, caller);
    position.claimed = true;

    engine.record_disbursed(gross)?;

    emit(&Event::Claimed {
        id: market_id,
        account: caller,
        gross,
        net,
    });

    Ok(ClaimResult {
        net,
        treasury_payout: fee,
    })
}

pub fn emergency_refund(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
    now: Timestamp,
) -> Result<EmergencyRefundResult, EngineError> {
    let market = engine.market(market_id)?;
    if market.resolved {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: market already resolved");
        return Err(EngineError::AlreadyResolved);
    }
    if !market.emergency_refund_eligible(now, &engine.config) {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: not yet eligible");
        return Err(EngineError::NotFinalizable);
    }
    if !engine.config.paused && market.proposer.is_some() {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: resolution in progress");
        return Err(EngineError::ResolutionInProgress);
    }

    let position = engine.position(market_id, caller).ok_or_else(|| {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: no position");
        EngineError::NoPosition
    })?;
    if position.emergency_refunded {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: already emergency-refunded");
        return Err(EngineError::AlreadyEmergencyRefunded);
    }
    if position.claimed {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: already claimed");
        return Err(EngineError::AlreadyClaimed);
    }
    let user_shares = position.total_shares();
    if user_shares.is_zero() {
        tracing::debug!(market_id = ?market_id, op = "emergency_refund", "rejected: nothing to refund");
        return Err(EngineError::NothingToClaim);
    }

    let total_shares = crate::math::checked_add(market.yes_supply, market.no_supply)?;
    let refund = mul_div_floor(user_shares, market.pool_balance, total_shares)?;

    let yes_shares = position.yes_shares;
    let no_shares = position.no_shares;

    let market = engine.market_mut(market_id)?;
    market.pool_balance = checked_sub(market.pool_balance, refund)?;
    market.yes_supply = checked_sub(market.yes_supply, yes_shares)?;
    market.no_supply = checked_sub(market.no_supply, no_shares)?;

    let position = engine.position_mut(market_id, caller);
    position.emergency_refunded = true;
    position.yes_shares = U256::zero();
    position.no_shares = U256::zero();

    engine.record_disbursed(refund)?;

    emit(&Event::EmergencyRefunded {
        id: market_id,
        account: caller,
        amount: refund,
    });

    Ok(EmergencyRefundResult { amount: refund })
}

pub fn claim_jury_fees(
    engine: &mut Engine,
    market_id: MarketId,
    caller: AccountId,
) -> Result<JuryFeesClaimResult, EngineError> {
    let market = engine.market(market_id)?;
    if !market.resolved {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: market not resolved");
        return Err(EngineError::NotResolved);
    }
    if market.jury_fees_pool.is_zero() {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: no jury fee pool");
        return Err(EngineError::NoJuryFeesPool);
    }
    let outcome = market.outcome;

    let position = engine.position(market_id, caller).ok_or_else(|| {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: did not vote");
        EngineError::DidNotVote
    })?;
    if !position.has_voted {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: did not vote");
        return Err(EngineError::DidNotVote);
    }
    if position.jury_fees_claimed {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: already claimed");
        return Err(EngineError::JuryFeesAlreadyClaimed);
    }
    if position.voted_outcome != outcome {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: voted for losing outcome");
        return Err(EngineError::VotedForLosingOutcome);
    }

    let voter_weight = position.total_shares();
    let total_winning_votes = market.winning_votes();
    if total_winning_votes.is_zero() {
        tracing::debug!(market_id = ?market_id, op = "claim_jury_fees", "rejected: no jury fee pool");
        return Err(EngineError::NoJuryFeesPool);
    }
    let amount = mul_div_floor(market.jury_fees_pool, voter_weight, total_winning_votes)?;

    let position = engine.position_mut(market_id, caller);
    position.jury_fees_claimed = true;

    engine.record_disbursed(amount)?;

    emit(&Event::JuryFeesClaimed {
        id: market_id,
        account: caller,
        amount,
    });

    Ok(JuryFeesClaimResult { amount })
}
