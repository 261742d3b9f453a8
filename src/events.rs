//! Typed notification stream. One event per successful, significant
//! operation — enough to rebuild external indexes without replaying engine
//! state. Emitted through `tracing` as a structured enum so a host can
//! filter/index on individual fields rather than parsing a formatted message.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::config::HeatLevel;
use crate::types::{AccountId, ActionId, MarketId, Side};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    MarketCreated {
        id: MarketId,
        creator: AccountId,
        question: String,
        expiry: u64,
        heat_level: HeatLevel,
        virtual_liquidity: U256,
    },
    Trade {
        id: MarketId,
        trader: AccountId,
        side: Side,
        is_buy: bool,
        shares: U256,
        net_collateral: U256,
    },
    OutcomeProposed {
        id: MarketId,
        proposer: AccountId,
        proposed_outcome: bool,
        bond: U256,
    },
    ProposalDisputed {
        id: MarketId,
        disputer: AccountId,
        bond: U256,
    },
    VoteCast {
        id: MarketId,
        voter: AccountId,
        outcome: bool,
        weight: U256,
    },
    MarketResolved {
        id: MarketId,
        outcome: bool,
        was_disputed: bool,
    },
    MarketResolutionFailed {
        id: MarketId,
    },
    TieFinalized {
        id: MarketId,
    },
    Claimed {
        id: MarketId,
        account: AccountId,
        gross: U256,
        net: U256,
    },
    EmergencyRefunded {
        id: MarketId,
        account: AccountId,
        amount: U256,
    },
    BondDistributed {
        id: MarketId,
        winner: AccountId,
        amount: U256,
    },
    ProposerRewardPaid {
        id: MarketId,
        proposer: AccountId,
        amount: U256,
    },
    JuryFeesPoolCreated {
        id: MarketId,
        amount: U256,
    },
    JuryFeesClaimed {
        id: MarketId,
        account: AccountId,
        amount: U256,
    },
    WithdrawalCredited {
        account: AccountId,
        amount: U256,
    },
    WithdrawalClaimed {
        account: AccountId,
        amount: U256,
    },
    CreatorFeesCredited {
        account: AccountId,
        amount: U256,
    },
    CreatorFeesClaimed {
        account: AccountId,
        amount: U256,
    },
    ActionProposed {
        id: ActionId,
        proposer: AccountId,
    },
    ActionConfirmed {
        id: ActionId,
        confirmer: AccountId,
    },
    ActionExecuted {
        id: ActionId,
    },
    Paused,
    Unpaused,
    SignerReplaced {
        old: AccountId,
        new: AccountId,
    },
}

/// Emit an event at `info` level, one named field per headline number, so
/// a host can filter/index on `market_id`, `op`, `shares`, `amount`, etc.
/// without parsing a formatted message.
pub fn emit(event: &Event) {
    match event {
        Event::MarketCreated { id, creator, question, expiry, heat_level, virtual_liquidity } => {
            tracing::info!(
                market_id = ?id,
                op = "market_created",
                creator = ?creator,
                question,
                expiry,
                heat_level = ?heat_level,
                virtual_liquidity = %virtual_liquidity,
                "engine event"
            );
        }
        Event::Trade { id, trader, side, is_buy, shares, net_collateral } => {
            tracing::info!(
                market_id = ?id,
                op = if *is_buy { "buy" } else { "sell" },
                trader = ?trader,
                side = ?side,
                shares = %shares,
                net_collateral = %net_collateral,
                "engine event"
            );
        }
        Event::OutcomeProposed { id, proposer, proposed_outcome, bond } => {
            tracing::info!(
                market_id = ?id,
                op = "outcome_proposed",
                proposer = ?proposer,
                proposed_outcome,
                bond = %bond,
                "engine event"
            );
        }
        Event::ProposalDisputed { id, disputer, bond } => {
            tracing::info!(
                market_id = ?id,
                op = "proposal_disputed",
                disputer = ?disputer,
                bond = %bond,
                "engine event"
            );
        }
        Event::VoteCast { id, voter, outcome, weight } => {
            tracing::info!(
                market_id = ?id,
                op = "vote_cast",
                voter = ?voter,
                outcome,
                weight = %weight,
                "engine event"
            );
        }
        Event::MarketResolved { id, outcome, was_disputed } => {
            tracing::info!(
                market_id = ?id,
                op = "market_resolved",
                outcome,
                was_disputed,
                "engine event"
            );
        }
        Event::MarketResolutionFailed { id } => {
            tracing::info!(market_id = ?id, op = "market_resolution_failed", "engine event");
        }
        Event::TieFinalized { id } => {
            tracing::info!(market_id = ?id, op = "tie_finalized", "engine event");
        }
        Event::Claimed { id, account, gross, net } => {
            tracing::info!(
                market_id = ?id,
                op = "claimed",
                account = ?account,
                gross = %gross,
                net = %net,
                "engine event"
            );
        }
        Event::EmergencyRefunded { id, account, amount } => {
            tracing::info!(
                market_id = ?id,
                op = "emergency_refunded",
                account = ?account,
                amount = %amount,
                "engine event"
            );
        }
        Event::BondDistributed { id, winner, amount } => {
            tracing::info!(
                market_id = ?id,
                op = "bond_distributed",
                winner = ?winner,
                amount = %amount,
                "engine event"
            );
        }
        Event::ProposerRewardPaid { id, proposer, amount } => {
            tracing::info!(
                market_id = ?id,
                op = "proposer_reward_paid",
                proposer = ?proposer,
                amount = %amount,
                "engine event"
            );
        }
        Event::JuryFeesPoolCreated { id, amount } => {
            tracing::info!(market_id = ?id, op = "jury_fees_pool_created", amount = %amount, "engine event");
        }
        Event::JuryFeesClaimed { id, account, amount } => {
            tracing::info!(
                market_id = ?id,
                op = "jury_fees_claimed",
                account = ?account,
                amount = %amount,
                "engine event"
            );
        }
        Event::WithdrawalCredited { account, amount } => {
            tracing::info!(op = "withdrawal_credited", account = ?account, amount = %amount, "engine event");
        }
        Event::WithdrawalClaimed { account, amount } => {
            tracing::info!(op = "withdrawal_claimed", account = ?account, amount = %amount, "engine event");
        }
        Event::CreatorFeesCredited { account, amount } => {
            tracing::info!(op = "creator_fees_credited", account = ?account, amount = %amount, "engine event");
        }
        Event::CreatorFeesClaimed { account, amount } => {
            tracing::info!(op = "creator_fees_claimed", account = ?account, amount = %amount, "engine event");
        }
        Event::ActionProposed { id, proposer } => {
            tracing::info!(action_id = ?id, op = "action_proposed", proposer = ?proposer, "engine event");
        }
        Event::ActionConfirmed { id, confirmer } => {
            tracing::info!(action_id = ?id, op = "action_confirmed", confirmer = ?confirmer, "engine event");
        }
        Event::ActionExecuted { id } => {
            tracing::info!(action_id = ?id, op = "action_executed", "engine event");
        }
        Event::Paused => {
            tracing::info!(op = "paused", "engine event");
        }
        Event::Unpaused => {
            tracing::info!(op = "unpaused", "engine event");
        }
        Event::SignerReplaced { old, new } => {
            tracing::info!(op = "signer_replaced", old = ?old, new = ?new, "engine event");
        }
    }
}
