//! One account's stake in one market.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::types::Side;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub yes_shares: U256,
    pub no_shares: U256,
    pub claimed: bool,
    pub emergency_refunded: bool,
    pub has_voted: bool,
    pub voted_outcome: bool,
    pub jury_fees_claimed: bool,
}

impl Position {
    pub fn new() -> Self {
        Position {
            yes_shares: U256::zero(),
            no_shares: U256::zero(),
            claimed: false,
            emergency_refunded: false,
            has_voted: false,
            voted_outcome: false,
            jury_fees_claimed: false,
        }
    }

    pub fn shares(&self, side: Side) -> U256 {
        match side {
            Side::Yes => self.yes_shares,
            Side::No => self.no_shares,
        }
    }

    pub fn shares_mut(&mut self, side: Side) -> &mut U256 {
        match side {
            Side::Yes => &mut self.yes_shares,
            Side::No => &mut self.no_shares,
        }
    }

    pub fn total_shares(&self) -> U256 {
        self.yes_shares + self.no_shares
    }

    pub fn has_shares(&self) -> bool {
        !self.yes_shares.is_zero() || !self.no_shares.is_zero()
    }

    pub fn winning_shares(&self, outcome: bool) -> U256 {
        if outcome {
            self.yes_shares
        } else {
            self.no_shares
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
