//! Constant-sum bonding curve with virtual liquidity.
//!
//! ```text
//! VY = yes_supply + virtual_liquidity
//! VN = no_supply  + virtual_liquidity
//! T  = VY + VN
//!
//! price_yes = U * VY / T
//! price_no  = U * VN / T      (price_yes + price_no == U, up to one
//!                               rounding unit from flooring division)
//! ```
//!
//! `U` is the fixed unit price `10^16`; all share quantities are scaled by
//! `10^18`. Buys are priced at the *pre-trade* state, sells at the
//! *post-sell* state — pricing a sell against the state it leaves behind
//! is what keeps an instantaneous buy→sell round trip from ever extracting
//! value net of fees (see `sell_proceeds`).

use primitive_types::U256;

use crate::error::EngineError;
use crate::math::fixed_point::{checked_add, checked_sub, mul3_div2_floor, mul_div_floor, pow10};
use crate::types::Side;

/// `U`, the fixed unit price: `price_yes + price_no` in every market.
pub fn unit_price() -> U256 {
    pow10(16)
}

/// Share scaling factor: all share quantities are `1e18`-scaled integers.
pub fn share_scale() -> U256 {
    pow10(18)
}

/// `(VY, VN, T)` for a market's current supplies and virtual liquidity.
fn virtual_state(
    yes_supply: U256,
    no_supply: U256,
    virtual_liquidity: U256,
) -> Result<(U256, U256, U256), EngineError> {
    let vy = checked_add(yes_supply, virtual_liquidity)?;
    let vn = checked_add(no_supply, virtual_liquidity)?;
    let t = checked_add(vy, vn)?;
    Ok((vy, vn, t))
}

fn side_virtual(side: Side, vy: U256, vn: U256) -> U256 {
    match side {
        Side::Yes => vy,
        Side::No => vn,
    }
}

/// `price_yes(y, n, v) = U * VY / T`
pub fn price_yes(yes_supply: U256, no_supply: U256, virtual_liquidity: U256) -> Result<U256, EngineError> {
    let (vy, _vn, t) = virtual_state(yes_supply, no_supply, virtual_liquidity)?;
    mul_div_floor(unit_price(), vy, t)
}

/// `price_no(y, n, v) = U * VN / T`
pub fn price_no(yes_supply: U256, no_supply: U256, virtual_liquidity: U256) -> Result<U256, EngineError> {
    let (_vy, vn, t) = virtual_state(yes_supply, no_supply, virtual_liquidity)?;
    mul_div_floor(unit_price(), vn, t)
}

/// Shares minted for `amount` of post-fee collateral at the *pre-trade*
/// price: `amount * T * 1e18 / (U * side_virtual)`.
pub fn buy_shares(
    amount: U256,
    side: Side,
    yes_supply: U256,
    no_supply: U256,
    virtual_liquidity: U256,
) -> Result<U256, EngineError> {
    let (vy, vn, t) = virtual_state(yes_supply, no_supply, virtual_liquidity)?;
    let sv = side_virtual(side, vy, vn);
    mul3_div2_floor(amount, t, share_scale(), unit_price(), sv)
}

/// Gross collateral proceeds for selling `shares` of `side`, priced at the
/// *post-sell* state: `shares * U * side_virtual' / (T' * 1e18)`.
///
/// Rejects if the sale would empty the side's virtual pool or leave a
/// nonpositive total — selling all outstanding shares on the thin side of a
/// heavily imbalanced market is only sound while `T' > 0`.
pub fn sell_proceeds(
    shares: U256,
    side: Side,
    yes_supply: U256,
    no_supply: U256,
    virtual_liquidity: U256,
) -> Result<U256, EngineError> {
    let (vy, vn, t) = virtual_state(yes_supply, no_supply, virtual_liquidity)?;
    let sv = side_virtual(side, vy, vn);
    let sv_prime = checked_sub(sv, shares)?;
    let t_prime = checked_sub(t, shares)?;
    mul3_div2_floor(shares, unit_price(), sv_prime, t_prime, share_scale())
}

/// Largest `s <= user_shares` such that `sell_proceeds(s, ...) <= pool`.
///
/// Binary search over `[0, user_shares]`, always rounding the midpoint up
/// (`(low + high + 1) / 2`) so the search narrows even when
/// `high == low + 1`.
pub fn max_sellable(
    user_shares: U256,
    side: Side,
    yes_supply: U256,
    no_supply: U256,
    virtual_liquidity: U256,
    pool: U256,
) -> Result<U256, EngineError> {
    if user_shares.is_zero() {
        return Ok(U256::zero());
    }

    // Selling everything might not even be mathematically defined (it could
    // underflow the side's virtual pool or total). Treat that as "not
    // sellable at that size" rather than an error, and search below it.
    let sellable = |s: U256| -> Result<bool, EngineError> {
        match sell_proceeds(s, side, yes_supply, no_supply, virtual_liquidity) {
            Ok(proceeds) => Ok(proceeds <= pool),
            Err(EngineError::ArithmeticUnderflow) | Err(EngineError::DivisionByZero) => Ok(false),
            Err(other) => Err(other),
        }
    };

    let mut low = U256::zero();
    let mut high = user_shares;
    while low < high {
        let mid = (low + high + U256::one()) >> 1;
        if sellable(mid)? {
            low = mid;
        } else {
            high = mid - U256::one();
        }
    }
    Ok(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vl() -> U256 {
        U256::from(200u32) * share_scale()
    }

    #[test]
    fn test_balanced_market_prices_split_evenly() {
        let yes = price_yes(U256::zero(), U256::zero(), vl()).unwrap();
        let no = price_no(U256::zero(), U256::zero(), vl()).unwrap();
        assert_eq!(yes, no);
        // Allow one unit of rounding tolerance from flooring.
        let sum = yes + no;
        let diff = if sum > unit_price() { sum - unit_price() } else { unit_price() - sum };
        assert!(diff <= U256::one());
    }

    #[test]
    fn test_prices_sum_to_unit_price() {
        let yes_supply = U256::from(50u32) * share_scale();
        let no_supply = U256::from(30u32) * share_scale();
        let yes = price_yes(yes_supply, no_supply, vl()).unwrap();
        let no = price_no(yes_supply, no_supply, vl()).unwrap();
        let sum = yes + no;
        let diff = if sum > unit_price() { sum - unit_price() } else { unit_price() - sum };
        assert!(diff <= U256::one());
    }

    #[test]
    fn test_buying_yes_increases_yes_price() {
        let before = price_yes(U256::zero(), U256::zero(), vl()).unwrap();
        let bought = buy_shares(
            U256::from(10u32) * share_scale(),
            Side::Yes,
            U256::zero(),
            U256::zero(),
            vl(),
        )
        .unwrap();
        let after = price_yes(bought, U256::zero(), vl()).unwrap();
        assert!(after > before);
    }

    #[test]
    fn test_sell_proceeds_post_sell_pricing_prevents_free_lunch() {
        let yes_supply = U256::zero();
        let no_supply = U256::zero();
        let amount = U256::from(10u32) * share_scale();
        let shares = buy_shares(amount, Side::Yes, yes_supply, no_supply, vl()).unwrap();
        let proceeds =
            sell_proceeds(shares, Side::Yes, shares, no_supply, vl()).unwrap();
        // No fees applied here (pure pricing kernel) - proceeds must not
        // exceed the amount paid in, and strictly the formula guarantees
        // proceeds <= amount.
        assert!(proceeds <= amount);
    }

    #[test]
    fn test_sell_proceeds_rejects_emptying_total() {
        let yes_supply = U256::from(5u32) * share_scale();
        let no_supply = U256::zero();
        // selling more than the virtual pool supports underflows
        let huge = U256::from(10_000u32) * share_scale();
        let result = sell_proceeds(huge, Side::Yes, yes_supply, no_supply, vl());
        assert!(result.is_err());
    }

    #[test]
    fn test_max_sellable_pool_bounded() {
        let yes_supply = U256::from(100u32) * share_scale();
        let no_supply = U256::from(100u32) * share_scale();
        let pool = U256::from(10u32) * share_scale() / U256::from(1000u32); // small pool
        let user_shares = U256::from(50u32) * share_scale();

        let s = max_sellable(user_shares, Side::Yes, yes_supply, no_supply, vl(), pool).unwrap();
        let proceeds = sell_proceeds(s, Side::Yes, yes_supply, no_supply, vl()).unwrap();
        assert!(proceeds <= pool);

        if s < user_shares {
            let next = s + U256::one();
            let next_proceeds = sell_proceeds(next, Side::Yes, yes_supply, no_supply, vl()).unwrap();
            assert!(next_proceeds > pool);
        }
    }

    #[test]
    fn test_max_sellable_zero_shares() {
        let s = max_sellable(U256::zero(), Side::Yes, U256::zero(), U256::zero(), vl(), U256::zero())
            .unwrap();
        assert_eq!(s, U256::zero());
    }

    #[test]
    fn test_max_sellable_unconstrained_pool_allows_full_sell() {
        let yes_supply = U256::from(100u32) * share_scale();
        let no_supply = U256::from(100u32) * share_scale();
        let user_shares = U256::from(50u32) * share_scale();
        let huge_pool = U256::from(1_000_000u32) * share_scale();

        let s = max_sellable(user_shares, Side::Yes, yes_supply, no_supply, vl(), huge_pool).unwrap();
        assert_eq!(s, user_shares);
    }
}
