use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque external account identity.
///
/// Transaction framing and authentication (who signed, how value moved into
/// the engine) are host concerns consumed through a thin interface — the
/// engine only ever needs to compare, hash, and store identities, as a
/// fixed-width byte array rather than a chain-specific key type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub const ZERO: AccountId = AccountId([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(")?;
        for byte in &self.0[..4] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "…)")
    }
}

/// Identity assigned to a market at creation, monotonically increasing.
pub type MarketId = u64;

/// Identity assigned to a pending administrative action, monotonically
/// increasing.
pub type ActionId = u64;

/// Which side of a binary market an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Yes => Side::No,
            Side::No => Side::Yes,
        }
    }
}

/// Unix-second timestamp, supplied explicitly by the host on every
/// time-sensitive operation. The engine never reads a global clock.
pub type Timestamp = u64;
