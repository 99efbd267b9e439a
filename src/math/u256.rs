//! 256-bit intermediate arithmetic and the `mul_div` primitive every curve
//! and fee formula is expressed in terms of.

use uint::construct_uint;

use crate::error::{CurveMathError, CurveMathResult};

construct_uint! {
  /// Minimal fixed-width 256-bit integer used only as a `mul_div`
  /// intermediate; nothing public crosses the crate boundary as a `U256`.
  pub struct U256(4);
}

/// Direction to round a division that does not land exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
  Up,
  Down,
}

pub fn add(a: u128, b: u128) -> CurveMathResult<u128> {
  a.checked_add(b).ok_or(CurveMathError::MathOverflow)
}

pub fn sub(a: u128, b: u128) -> CurveMathResult<u128> {
  a.checked_sub(b).ok_or(CurveMathError::MathUnderflow)
}

pub fn mul(a: u128, b: u128) -> CurveMathResult<u128> {
  a.checked_mul(b).ok_or(CurveMathError::MathOverflow)
}

pub fn div(a: u128, b: u128) -> CurveMathResult<u128> {
  if b == 0 {
    return Err(CurveMathError::DivByZero);
  }
  Ok(a / b)
}

pub fn rem(a: u128, b: u128) -> CurveMathResult<u128> {
  if b == 0 {
    return Err(CurveMathError::DivByZero);
  }
  Ok(a % b)
}

pub fn shl(a: u128, bits: u32) -> CurveMathResult<u128> {
  if bits > 127 {
    return Err(CurveMathError::MathOverflow);
  }
  a.checked_shl(bits).ok_or(CurveMathError::MathOverflow)
}

pub fn shr(a: u128, bits: u32) -> CurveMathResult<u128> {
  if bits > 127 {
    return Err(CurveMathError::MathOverflow);
  }
  Ok(a >> bits)
}

/// `floor(x*y/denom)` or `ceil(x*y/denom)`, computed through a 256-bit
/// intermediate so `x*y` never overflows even when both operands are near
/// `u128::MAX`.
pub fn mul_div(x: u128, y: u128, denom: u128, rounding: Rounding) -> CurveMathResult<u128> {
  if denom == 0 {
    return Err(CurveMathError::DivByZero);
  }
  div_round(U256::from(x) * U256::from(y), U256::from(denom), rounding)
}

/// As [`mul_div`], but for callers (the δ-base / δ-quote formulas) whose
/// denominator is itself a product of two `u128`s and so does not fit in a
/// `u128` — e.g. `√P_low · √P_high`. The numerator and denominator are
/// still each bounded by 256 bits, so the division itself is exact; only
/// the final quotient is checked to fit back in a `u128`.
pub fn mul_div_wide_denom(x: u128, y: u128, denom: U256, rounding: Rounding) -> CurveMathResult<u128> {
  if denom.is_zero() {
    return Err(CurveMathError::DivByZero);
  }
  div_round(U256::from(x) * U256::from(y), denom, rounding)
}

pub fn u256_to_u128(value: U256) -> CurveMathResult<u128> {
  if value > U256::from(u128::MAX) {
    return Err(CurveMathError::MathOverflow);
  }
  Ok(value.as_u128())
}

fn div_round(numerator: U256, denom: U256, rounding: Rounding) -> CurveMathResult<u128> {
  let (q, r) = numerator.div_mod(denom);
  let q = if rounding == Rounding::Up && !r.is_zero() {
    q + U256::one()
  } else {
    q
  };
  if q > U256::from(u128::MAX) {
    return Err(CurveMathError::MathOverflow);
  }
  Ok(q.as_u128())
}

/// As [`mul_div`], but additionally fails with [`CurveMathError::MathOverflow`]
/// if the (in-range-for-u128) result does not also fit in a `u64`.
pub fn safe_mul_div_u64(x: u128, y: u128, denom: u128, rounding: Rounding) -> CurveMathResult<u64> {
  let result = mul_div(x, y, denom, rounding)?;
  u64::try_from(result).map_err(|_| CurveMathError::MathOverflow)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mul_div_rounds_both_directions() {
    assert_eq!(mul_div(10, 3, 4, Rounding::Down).unwrap(), 7);
    assert_eq!(mul_div(10, 3, 4, Rounding::Up).unwrap(), 8);
    assert_eq!(mul_div(8, 4, 4, Rounding::Up).unwrap(), 8);
  }

  #[test]
  fn mul_div_handles_u128_overflowing_products() {
    let x = u128::MAX / 2;
    let y = 3u128;
    // x*y overflows u128 but the quotient fits.
    let result = mul_div(x, y, 3, Rounding::Down).unwrap();
    assert_eq!(result, x);
  }

  #[test]
  fn mul_div_rejects_zero_denominator() {
    assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(CurveMathError::DivByZero));
  }

  #[test]
  fn safe_mul_div_u64_rejects_results_above_u64_max() {
    let big = u128::from(u64::MAX) + 1;
    assert_eq!(
      safe_mul_div_u64(big, 1, 1, Rounding::Down),
      Err(CurveMathError::MathOverflow)
    );
  }

  #[test]
  fn sub_rejects_underflow() {
    assert_eq!(sub(1, 2), Err(CurveMathError::MathUnderflow));
  }

  #[test]
  fn shl_rejects_bit_counts_above_127() {
    assert_eq!(shl(1, 128), Err(CurveMathError::MathOverflow));
  }
}
