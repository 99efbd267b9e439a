//! Concentrated-liquidity δ-base / δ-quote formulas (spec.md §4.2).
//!
//! Output amounts round **down** — a user never receives more than the
//! math allows. Input amounts and the next-√price computations that
//! constrain a user round **up**. This rounding direction is part of the
//! public contract, not an implementation detail.

use crate::error::{CurveMathError, CurveMathResult};
use crate::math::u256::{mul_div_wide_denom, u256_to_u128, Rounding, U256};

/// `Δbase = L · (√P_high − √P_low) / (√P_low · √P_high)`.
pub fn delta_amount_base_unsigned(
  sqrt_price_low: u128,
  sqrt_price_high: u128,
  liquidity: u128,
  rounding: Rounding,
) -> CurveMathResult<u128> {
  let delta_sqrt_price = sqrt_price_high
    .checked_sub(sqrt_price_low)
    .ok_or(CurveMathError::MathUnderflow)?;
  let denom = U256::from(sqrt_price_low) * U256::from(sqrt_price_high);
  mul_div_wide_denom(liquidity, delta_sqrt_price, denom, rounding)
}

/// `Δquote = L · (√P_high − √P_low) / 2^128`.
pub fn delta_amount_quote_unsigned(
  sqrt_price_low: u128,
  sqrt_price_high: u128,
  liquidity: u128,
  rounding: Rounding,
) -> CurveMathResult<u128> {
  let delta_sqrt_price = sqrt_price_high
    .checked_sub(sqrt_price_low)
    .ok_or(CurveMathError::MathUnderflow)?;
  let product = U256::from(liquidity) * U256::from(delta_sqrt_price);
  let shift = U256::one() << 128;
  let (quotient, remainder) = product.div_mod(shift);
  let quotient = if rounding == Rounding::Up && !remainder.is_zero() {
    quotient + U256::one()
  } else {
    quotient
  };
  u256_to_u128(quotient)
}

/// Next √price after consuming `delta_in` of either token against
/// constant liquidity `L`.
///
/// `base_for_quote = true` means the input token is base (we are quoting
/// base -> quote and need the price the base leg lands on); the result is
/// rounded **up** because a higher next-√P removes less base, which is
/// the direction that protects the pool from over-draining.
pub fn next_sqrt_price_from_input(
  sqrt_price: u128,
  liquidity: u128,
  delta_in: u128,
  base_for_quote: bool,
) -> CurveMathResult<u128> {
  if liquidity == 0 {
    return Err(CurveMathError::DivByZero);
  }
  if base_for_quote {
    let product = U256::from(delta_in) * U256::from(sqrt_price);
    let denom = U256::from(liquidity) + product;
    mul_div_wide_denom(liquidity, sqrt_price, denom, Rounding::Up)
  } else {
    let numerator = U256::from(delta_in) << 128;
    let quote_step = numerator / U256::from(liquidity);
    let quote_step = u256_to_u128(quote_step)?;
    sqrt_price.checked_add(quote_step).ok_or(CurveMathError::MathOverflow)
  }
}

/// Terminal liquidity implied by absorbing `delta_base` between
/// `sqrt_price_low` and `sqrt_price_high`.
pub fn initial_liquidity_from_delta_base(
  delta_base: u128,
  sqrt_price_high: u128,
  sqrt_price_low: u128,
) -> CurveMathResult<u128> {
  let delta_sqrt_price = sqrt_price_high
    .checked_sub(sqrt_price_low)
    .ok_or(CurveMathError::MathUnderflow)?;
  if delta_sqrt_price == 0 {
    return Err(CurveMathError::DivByZero);
  }
  let numerator = U256::from(delta_base) * U256::from(sqrt_price_low) * U256::from(sqrt_price_high);
  u256_to_u128(numerator / U256::from(delta_sqrt_price))
}

/// Liquidity implied by absorbing `delta_quote` between `sqrt_price_min`
/// and `sqrt_price`.
pub fn initial_liquidity_from_delta_quote(
  delta_quote: u128,
  sqrt_price_min: u128,
  sqrt_price: u128,
) -> CurveMathResult<u128> {
  let delta_sqrt_price = sqrt_price
    .checked_sub(sqrt_price_min)
    .ok_or(CurveMathError::MathUnderflow)?;
  if delta_sqrt_price == 0 {
    return Err(CurveMathError::DivByZero);
  }
  let numerator = U256::from(delta_quote) << 128;
  u256_to_u128(numerator / U256::from(delta_sqrt_price))
}
