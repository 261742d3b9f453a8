//! Per-account pull-payment ledger: `credit` accumulates, `withdraw` zeroes
//! and hands the amount back to the caller for external disbursement. This
//! is the only path bonds, tie refunds, proposer rewards, bond-winner
//! distributions, and creator trading rebates leave the engine.

use std::collections::HashMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::math::checked_add;
use crate::types::AccountId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullLedger {
    balances: HashMap<AccountId, U256>,
    total: U256,
}

impl PullLedger {
    pub fn new() -> Self {
        PullLedger {
            balances: HashMap::new(),
            total: U256::zero(),
        }
    }

    pub fn balance_of(&self, account: AccountId) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn total(&self) -> U256 {
        self.total
    }

    pub fn credit(&mut self, account: AccountId, amount: U256) -> Result<(), EngineError> {
        if amount.is_zero() {
            return Ok(());
        }
        let entry = self.balances.entry(account).or_insert_with(U256::zero);
        *entry = checked_add(*entry, amount)?;
        self.total = checked_add(self.total, amount)?;
        Ok(())
    }

    /// Atomically zero the account's entry and return the withdrawn amount.
    /// Fails with `NothingToWithdraw` on an empty or absent entry.
    pub fn withdraw(&mut self, account: AccountId) -> Result<U256, EngineError> {
        let amount = self.balances.remove(&account).unwrap_or_default();
        if amount.is_zero() {
            return Err(EngineError::NothingToWithdraw);
        }
        self.total = self
            .total
            .checked_sub(amount)
            .ok_or(EngineError::ArithmeticUnderflow)?;
        Ok(amount)
    }
}

impl Default for PullLedger {
    fn default() -> Self {
        Self::new()
    }
}
