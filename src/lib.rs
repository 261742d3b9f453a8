//! Street Consensus: a decentralized prediction-market settlement engine.
//!
//! Binary YES/NO markets trade against a constant-sum bonding curve with
//! virtual liquidity; outcomes resolve through propose → dispute →
//! shareholder vote → finalize. The engine is a single in-memory state
//! object with no ambient statics — a host embeds [`Engine`], serializes
//! access to it, and supplies the wall clock and caller identity on every
//! call.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod fees;
pub mod math;
pub mod operations;
pub mod state;
pub mod types;

pub use config::{EngineConfig, FeeKind, HeatLevel};
pub use engine::Engine;
pub use error::EngineError;
pub use events::Event;
pub use types::{AccountId, ActionId, MarketId, Side, Timestamp};
