//! 256-bit checked arithmetic.
//!
//! All engine bookkeeping (pool balances, share supplies, bonds) is a `U256`.
//! Every addition, subtraction, and multiplication is checked explicitly;
//! every division rejects a zero divisor. Multiplication-then-division is
//! always performed with a wider intermediate (`U512`) so the final division
//! is the *only* place a fractional remainder is discarded.

use primitive_types::{U256, U512};

use crate::error::EngineError;

/// `10^exp` as a `U256`. Computed by repeated multiplication rather than
/// assuming a library-provided `exp10`, so the result's correctness doesn't
/// depend on an unverified API surface.
pub fn pow10(exp: u32) -> U256 {
    let mut result = U256::one();
    let ten = U256::from(10u8);
    for _ in 0..exp {
        result = result.saturating_mul(ten);
    }
    result
}

pub fn checked_add(a: U256, b: U256) -> Result<U256, EngineError> {
    a.checked_add(b).ok_or(EngineError::ArithmeticOverflow)
}

pub fn checked_sub(a: U256, b: U256) -> Result<U256, EngineError> {
    a.checked_sub(b).ok_or(EngineError::ArithmeticUnderflow)
}

pub fn checked_mul(a: U256, b: U256) -> Result<U256, EngineError> {
    a.checked_mul(b).ok_or(EngineError::ArithmeticOverflow)
}

pub fn checked_div(a: U256, b: U256) -> Result<U256, EngineError> {
    if b.is_zero() {
        return Err(EngineError::DivisionByZero);
    }
    Ok(a / b)
}

fn checked_mul_u512(a: U512, b: U512) -> Result<U512, EngineError> {
    a.checked_mul(b).ok_or(EngineError::ArithmeticOverflow)
}

/// Truncate a `U512` back down to `U256`, failing if the value doesn't fit.
fn truncate_to_u256(value: U512) -> Result<U256, EngineError> {
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    if bytes[32..].iter().any(|&b| b != 0) {
        return Err(EngineError::ArithmeticOverflow);
    }
    Ok(U256::from_little_endian(&bytes[..32]))
}

/// `floor(a * b / c)`, with the product computed in full 512-bit precision.
pub fn mul_div_floor(a: U256, b: U256, c: U256) -> Result<U256, EngineError> {
    if c.is_zero() {
        return Err(EngineError::DivisionByZero);
    }
    let product = checked_mul_u512(U512::from(a), U512::from(b))?;
    let result = product / U512::from(c);
    truncate_to_u256(result)
}

/// `floor(n1 * n2 * n3 / (d1 * d2))`, with both the three-term numerator and
/// the two-term denominator computed in full 512-bit precision before the
/// single floor division — the shape the pricing kernel's `buy_shares` and
/// `sell_proceeds` formulas need.
pub fn mul3_div2_floor(
    n1: U256,
    n2: U256,
    n3: U256,
    d1: U256,
    d2: U256,
) -> Result<U256, EngineError> {
    let numerator = checked_mul_u512(
        checked_mul_u512(U512::from(n1), U512::from(n2))?,
        U512::from(n3),
    )?;
    let denominator = checked_mul_u512(U512::from(d1), U512::from(d2))?;
    if denominator.is_zero() {
        return Err(EngineError::DivisionByZero);
    }
    let result = numerator / denominator;
    truncate_to_u256(result)
}

/// `amount * bps / BPS_DENOMINATOR`, floored. The common fee-slice shape
/// used throughout the trading and bond components.
pub fn bps_of(amount: U256, bps: u32, denominator: u32) -> Result<U256, EngineError> {
    mul_div_floor(amount, U256::from(bps), U256::from(denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), U256::one());
        assert_eq!(pow10(2), U256::from(100u32));
        assert_eq!(pow10(18), U256::from(1_000_000_000_000_000_000u128));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = U256::MAX;
        assert_eq!(checked_add(max, U256::one()), Err(EngineError::ArithmeticOverflow));
        assert_eq!(checked_add(U256::from(1u8), U256::from(2u8)), Ok(U256::from(3u8)));
    }

    #[test]
    fn test_checked_sub_underflow() {
        assert_eq!(
            checked_sub(U256::from(1u8), U256::from(2u8)),
            Err(EngineError::ArithmeticUnderflow)
        );
    }

    #[test]
    fn test_checked_div_zero() {
        assert_eq!(
            checked_div(U256::from(1u8), U256::zero()),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_mul_div_floor_basic() {
        // 10 * 3 / 4 = 7.5 -> floors to 7
        let result = mul_div_floor(U256::from(10u8), U256::from(3u8), U256::from(4u8)).unwrap();
        assert_eq!(result, U256::from(7u8));
    }

    #[test]
    fn test_mul_div_floor_exact() {
        let result = mul_div_floor(U256::from(100u8), U256::from(50u8), U256::from(10u8)).unwrap();
        assert_eq!(result, U256::from(500u16));
    }

    #[test]
    fn test_mul_div_floor_large_product_does_not_overflow_u256() {
        // a * b alone would overflow U256, but the final quotient fits.
        let a = U256::MAX;
        let b = U256::from(2u8);
        let c = U256::from(2u8);
        let result = mul_div_floor(a, b, c).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn test_mul_div_floor_division_by_zero() {
        assert_eq!(
            mul_div_floor(U256::from(1u8), U256::from(1u8), U256::zero()),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_mul3_div2_floor_basic() {
        // (2 * 3 * 4) / (2 * 3) = 24 / 6 = 4
        let result = mul3_div2_floor(
            U256::from(2u8),
            U256::from(3u8),
            U256::from(4u8),
            U256::from(2u8),
            U256::from(3u8),
        )
        .unwrap();
        assert_eq!(result, U256::from(4u8));
    }

    #[test]
    fn test_mul3_div2_floor_rounds_down() {
        // (7 * 1 * 1) / (1 * 2) = 3.5 -> 3
        let result = mul3_div2_floor(
            U256::from(7u8),
            U256::from(1u8),
            U256::from(1u8),
            U256::from(1u8),
            U256::from(2u8),
        )
        .unwrap();
        assert_eq!(result, U256::from(3u8));
    }

    #[test]
    fn test_bps_of() {
        let amount = U256::from(1_000_000_000u64);
        // 3% = 300 bps
        let fee = bps_of(amount, 300, 10_000).unwrap();
        assert_eq!(fee, U256::from(30_000_000u64));
    }

    #[test]
    fn test_bps_of_floors() {
        let fee = bps_of(U256::from(99u8), 300, 10_000).unwrap();
        // 99 * 300 / 10000 = 2.97 -> 2
        assert_eq!(fee, U256::from(2u8));
    }
}
