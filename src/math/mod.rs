//! Fixed-point arithmetic and the constant-sum pricing kernel.

pub mod fixed_point;
pub mod pricing;

pub use fixed_point::{bps_of, checked_add, checked_div, checked_mul, checked_sub, mul3_div2_floor, mul_div_floor, pow10};
pub use pricing::{buy_shares, max_sellable, price_no, price_yes, sell_proceeds, share_scale, unit_price};

/// Basis-point denominator used by every fee/split calculation.
pub const BPS_DENOMINATOR: u32 = 10_000;
