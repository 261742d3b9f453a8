//! Administrative action queue: propose, confirm, execute. Every kind
//! re-validates the whole [`EngineConfig`] as one unit before committing —
//! there is no narrower, field-local validation path.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::events::{emit, Event};
use crate::state::pending_action::{ActionKind, PendingAction};
use crate::types::{AccountId, ActionId, Timestamp};

fn require_administrator(engine: &Engine, caller: AccountId) -> Result<(), EngineError> {
    if engine.config.administrators.contains(&caller) {
        Ok(())
    } else {
        tracing::warn!(caller = ?caller, "rejected: caller is not an administrator");
        Err(EngineError::NotAdministrator)
    }
}

pub fn propose_action(
    engine: &mut Engine,
    caller: AccountId,
    kind: ActionKind,
    now: Timestamp,
) -> Result<ActionId, EngineError> {
    require_administrator(engine, caller)?;

    let id = engine.next_action_id();
    let action = PendingAction::new(id, kind, caller, now);
    engine.pending_actions.insert(id, action);

    emit(&Event::ActionProposed { id, proposer: caller });
    Ok(id)
}

pub fn confirm_action(
    engine: &mut Engine,
    action_id: ActionId,
    caller: AccountId,
    now: Timestamp,
) -> Result<(), EngineError> {
    require_administrator(engine, caller)?;

    let threshold = engine.config.confirmation_threshold;
    let action = engine.pending_actions.get_mut(&action_id).ok_or_else(|| {
        tracing::debug!(action_id = ?action_id, op = "confirm_action", "rejected: action not found");
        EngineError::ActionNotFound
    })?;

    if action.executed {
        tracing::debug!(action_id = ?action_id, op = "confirm_action", "rejected: already executed");
        return Err(EngineError::ActionAlreadyExecuted);
    }
    if action.is_expired(now, engine.config.action_expiry_window) {
        tracing::debug!(action_id = ?action_id, op = "confirm_action", "rejected: action expired");
        return Err(EngineError::ActionExpired);
    }
    if action.confirmed_by.contains(&caller) {
        tracing::debug!(action_id = ?action_id, op = "confirm_action", "rejected: already confirmed by caller");
        return Err(EngineError::AlreadyConfirmed);
    }
    action.confirmed_by.insert(caller);

    emit(&Event::ActionConfirmed {
        id: action_id,
        confirmer: caller,
    });

    if action.ready_to_execute(threshold) {
        execute_action(engine, action_id, now)?;
    }
    Ok(())
}

/// Explicit execute call, for when a caller wants to trigger execution
/// without being the confirmation that crosses the threshold (e.g. after
/// the threshold was already reached by a prior confirm).
pub fn execute_action(engine: &mut Engine, action_id: ActionId, now: Timestamp) -> Result<(), EngineError> {
    let threshold = engine.config.confirmation_threshold;
    let action = engine.pending_actions.get(&action_id).ok_or_else(|| {
        tracing::debug!(action_id = ?action_id, op = "execute_action", "rejected: action not found");
        EngineError::ActionNotFound
    })?;

    if action.executed {
        tracing::debug!(action_id = ?action_id, op = "execute_action", "rejected: already executed");
        return Err(EngineError::ActionAlreadyExecuted);
    }
    if action.is_expired(now, engine.config.action_expiry_window) {
        tracing::debug!(action_id = ?action_id, op = "execute_action", "rejected: action expired");
        return Err(EngineError::ActionExpired);
    }
    if !action.ready_to_execute(threshold) {
        tracing::debug!(action_id = ?action_id, op = "execute_action", "rejected: not enough confirmations");
        return Err(EngineError::NotEnoughConfirmations);
    }

    let kind = action.kind.clone();
    apply(engine, &kind)?;

    let action = engine.pending_actions.get_mut(&action_id).expect("action present");
    action.executed = true;

    emit(&Event::ActionExecuted { id: action_id });
    Ok(())
}

fn apply(engine: &mut Engine, kind: &ActionKind) -> Result<(), EngineError> {
    let mut candidate = engine.config.clone();

    match kind {
        ActionKind::SetFee { kind: fee_kind, value } => {
            candidate.set_fee_bps_in_place(*fee_kind, *value)?;
        }
        ActionKind::SetCreationFee { value } => {
            candidate.creation_fee = *value;
        }
        ActionKind::SetMinimumBet { value } => {
            candidate.min_bet = *value;
        }
        ActionKind::SetTreasury { account } => {
            candidate.treasury = *account;
        }
        ActionKind::Pause => {
            candidate.paused = true;
        }
        ActionKind::Unpause => {
            candidate.paused = false;
        }
        ActionKind::SetMinBondFloor { value } => {
            candidate.min_bond_floor = *value;
        }
        ActionKind::SetDynamicBondBps { value } => {
            candidate.dynamic_bond_bps = *value;
        }
        ActionKind::SetBondWinnerBps { value } => {
            candidate.bond_winner_bps = *value;
        }
        ActionKind::SetHeatLevel { tier, value } => {
            candidate.heat_levels.set(*tier, *value);
        }
        ActionKind::ReplaceAdministrator { old, new } => {
            if new.is_zero() || new == old {
                tracing::warn!(op = "replace_administrator", "rejected: invalid signer replacement");
                return Err(EngineError::InvalidSignerReplacement);
            }
            if candidate.administrators.contains(new) {
                tracing::warn!(op = "replace_administrator", "rejected: invalid signer replacement");
                return Err(EngineError::InvalidSignerReplacement);
            }
            let slot = candidate.administrators.iter_mut().find(|a| **a == *old).ok_or_else(|| {
                tracing::warn!(op = "replace_administrator", "rejected: signer not found");
                EngineError::SignerNotFound
            })?;
            *slot = *new;
        }
    }

    if let Err(err) = candidate.validate() {
        tracing::debug!(?err, "rejected: administrative action would produce an invalid configuration");
        return Err(err);
    }

    let was_replace = matches!(kind, ActionKind::ReplaceAdministrator { .. });
    let was_pause = matches!(kind, ActionKind::Pause);
    let was_unpause = matches!(kind, ActionKind::Unpause);

    engine.config = candidate;

    if was_pause {
        emit(&Event::Paused);
    } else if was_unpause {
        emit(&Event::Unpaused);
    } else if was_replace {
        if let ActionKind::ReplaceAdministrator { old, new } = kind {
            emit(&Event::SignerReplaced { old: *old, new: *new });
        }
    }

    Ok(())
}

pub fn withdraw_bond(engine: &mut Engine, caller: AccountId) -> Result<primitive_types::U256, EngineError> {
    let amount = engine.bond_ledger.withdraw(caller)?;
    emit(&Event::WithdrawalClaimed { account: caller, amount });
    Ok(amount)
}

pub fn withdraw_creator_fees(engine: &mut Engine, caller: AccountId) -> Result<primitive_types::U256, EngineError> {
    let amount = engine.creator_ledger.withdraw(caller)?;
    emit(&Event::CreatorFeesClaimed { account: caller, amount });
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, FeeKind};

    fn test_engine() -> Engine {
        let config = EngineConfig::scenario_default(
            AccountId([9u8; 32]),
            vec![AccountId([1u8; 32]), AccountId([2u8; 32]), AccountId([3u8; 32])],
        );
        Engine::new(config).unwrap()
    }

    #[test]
    fn test_propose_rejects_non_administrator() {
        let mut engine = test_engine();
        let result = propose_action(&mut engine, AccountId([99u8; 32]), ActionKind::Pause, 0);
        assert_eq!(result.unwrap_err(), EngineError::NotAdministrator);
    }

    #[test]
    fn test_propose_auto_confirms_and_executes_at_threshold() {
        let mut engine = test_engine();
        let id = propose_action(&mut engine, AccountId([1u8; 32]), ActionKind::Pause, 0).unwrap();
        confirm_action(&mut engine, id, AccountId([2u8; 32]), 0).unwrap();
        assert!(!engine.is_paused());
        confirm_action(&mut engine, id, AccountId([3u8; 32]), 0).unwrap();
        assert!(engine.is_paused());
    }

    #[test]
    fn test_confirm_rejects_double_confirmation() {
        let mut engine = test_engine();
        let id = propose_action(&mut engine, AccountId([1u8; 32]), ActionKind::Pause, 0).unwrap();
        let result = confirm_action(&mut engine, id, AccountId([1u8; 32]), 0);
        assert_eq!(result.unwrap_err(), EngineError::AlreadyConfirmed);
    }

    #[test]
    fn test_action_expiry() {
        let mut engine = test_engine();
        let id = propose_action(&mut engine, AccountId([1u8; 32]), ActionKind::Pause, 0).unwrap();
        let result = confirm_action(&mut engine, id, AccountId([2u8; 32]), engine.config.action_expiry_window + 1);
        assert_eq!(result.unwrap_err(), EngineError::ActionExpired);
    }

    #[test]
    fn test_replace_administrator_uses_reduced_threshold() {
        let mut engine = test_engine();
        let id = propose_action(
            &mut engine,
            AccountId([1u8; 32]),
            ActionKind::ReplaceAdministrator {
                old: AccountId([3u8; 32]),
                new: AccountId([4u8; 32]),
            },
            0,
        )
        .unwrap();
        // only one more confirmation needed (N-1 = 2)
        confirm_action(&mut engine, id, AccountId([2u8; 32]), 0).unwrap();
        assert!(engine.config.administrators.contains(&AccountId([4u8; 32])));
        assert!(!engine.config.administrators.contains(&AccountId([3u8; 32])));
    }

    #[test]
    fn test_set_fee_rejects_out_of_bounds_value_without_mutating() {
        let mut engine = test_engine();
        let before = engine.config.resolution_fee_bps;
        let id = propose_action(
            &mut engine,
            AccountId([1u8; 32]),
            ActionKind::SetFee {
                kind: FeeKind::Resolution,
                value: EngineConfig::MAX_RESOLUTION_FEE_BPS + 1,
            },
            0,
        )
        .unwrap();
        confirm_action(&mut engine, id, AccountId([2u8; 32]), 0).unwrap();
        let result = confirm_action(&mut engine, id, AccountId([3u8; 32]), 0);
        assert!(result.is_err());
        assert_eq!(engine.config.resolution_fee_bps, before);
    }

    #[test]
    fn test_withdraw_bond_and_creator_fees() {
        let mut engine = test_engine();
        engine.bond_ledger.credit(AccountId([50u8; 32]), primitive_types::U256::from(10u32)).unwrap();
        let amount = withdraw_bond(&mut engine, AccountId([50u8; 32])).unwrap();
        assert_eq!(amount, primitive_types::U256::from(10u32));
    }
}
