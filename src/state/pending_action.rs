//! Queued administrative actions awaiting multisig confirmation.

use std::collections::HashSet;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::config::{FeeKind, HeatLevel};
use crate::types::{AccountId, ActionId, Timestamp};

/// Typed payload for every administrative action enumerated in the
/// administrative action queue's validation table. Each kind's validation
/// bounds live on [`crate::config::EngineConfig`], re-checked in full on
/// execution via `EngineConfig::validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionKind {
    SetFee { kind: FeeKind, value: u32 },
    SetCreationFee { value: U256 },
    SetMinimumBet { value: U256 },
    SetTreasury { account: AccountId },
    Pause,
    Unpause,
    SetMinBondFloor { value: U256 },
    SetDynamicBondBps { value: u32 },
    SetBondWinnerBps { value: u32 },
    SetHeatLevel { tier: HeatLevel, value: U256 },
    ReplaceAdministrator { old: AccountId, new: AccountId },
}

impl ActionKind {
    /// Replace-administrator gets the reduced N-1 confirmation threshold
    /// emergency escape hatch; every other kind needs the full threshold.
    pub fn uses_reduced_threshold(&self) -> bool {
        matches!(self, ActionKind::ReplaceAdministrator { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAction {
    pub id: ActionId,
    pub kind: ActionKind,
    pub created_at: Timestamp,
    pub executed: bool,
    pub confirmed_by: HashSet<AccountId>,
}

impl PendingAction {
    /// A new action auto-confirms for its proposer.
    pub fn new(id: ActionId, kind: ActionKind, proposer: AccountId, created_at: Timestamp) -> Self {
        let mut confirmed_by = HashSet::new();
        confirmed_by.insert(proposer);
        PendingAction {
            id,
            kind,
            created_at,
            executed: false,
            confirmed_by,
        }
    }

    pub fn confirmations(&self) -> usize {
        self.confirmed_by.len()
    }

    pub fn is_expired(&self, now: Timestamp, expiry_window: u64) -> bool {
        now >= self.created_at + expiry_window
    }

    /// Confirmation threshold actually required for this action, given the
    /// engine's configured N and the reduced-threshold carve-out.
    pub fn required_confirmations(&self, n: usize) -> usize {
        if self.kind.uses_reduced_threshold() {
            n.saturating_sub(1).max(1)
        } else {
            n
        }
    }

    pub fn ready_to_execute(&self, n: usize) -> bool {
        self.confirmations() >= self.required_confirmations(n)
    }
}
