//! Conversions between a human price and its Q64.64 √price encoding.
//!
//! This is the one place in the crate that needs arbitrary-precision
//! decimal rather than exact integer math (spec.md §4.1, §9): taking a
//! square root of a ratio of decimals has no exact integer form in
//! general, so we go through [`rust_decimal::Decimal`] for the conversion
//! and drop back to integers immediately after.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::{CurveMathError, CurveMathResult};

fn two_pow_64() -> Decimal {
  // 2^64 = (2^32)^2; built from two `i64`-representable factors so we
  // never need a u128 -> Decimal conversion for this constant.
  Decimal::from(4_294_967_296_i64) * Decimal::from(4_294_967_296_i64)
}

pub(crate) fn pow10(exponent: i32) -> CurveMathResult<Decimal> {
  if exponent >= 0 {
    let value = 10_i64
      .checked_pow(exponent as u32)
      .ok_or(CurveMathError::MathOverflow)?;
    Ok(Decimal::from(value))
  } else {
    Ok(Decimal::new(1, (-exponent) as u32))
  }
}

/// floor(value), for a value known to be non-negative, as a `u128`.
pub(crate) fn decimal_floor_to_u128(value: Decimal) -> CurveMathResult<u128> {
  if value.is_sign_negative() {
    return Err(CurveMathError::InvalidSqrtPrice);
  }
  let mantissa = u128::try_from(value.mantissa()).map_err(|_| CurveMathError::MathOverflow)?;
  let divisor = 10_u128
    .checked_pow(value.scale())
    .ok_or(CurveMathError::MathOverflow)?;
  mantissa.checked_div(divisor).ok_or(CurveMathError::DivByZero)
}

/// `floor(sqrt(price * 10^(base_decimal - quote_decimal)) * 2^64)`.
pub fn sqrt_price_from_price(price: Decimal, base_decimal: u8, quote_decimal: u8) -> CurveMathResult<u128> {
  if price.is_sign_negative() {
    return Err(CurveMathError::InvalidSqrtPrice);
  }
  let exponent = base_decimal as i32 - quote_decimal as i32;
  let scale = pow10(exponent)?;
  let scaled = price.checked_mul(scale).ok_or(CurveMathError::MathOverflow)?;
  let sqrt = scaled.sqrt().ok_or(CurveMathError::InvalidSqrtPrice)?;
  let q64 = sqrt.checked_mul(two_pow_64()).ok_or(CurveMathError::MathOverflow)?;
  decimal_floor_to_u128(q64)
}

/// Inverse of [`sqrt_price_from_price`].
pub fn price_from_sqrt_price(sqrt_price: u128, base_decimal: u8, quote_decimal: u8) -> CurveMathResult<Decimal> {
  let sqrt_decimal = Decimal::try_from(sqrt_price).map_err(|_| CurveMathError::InvalidSqrtPrice)?;
  // Divide by 2^64 before squaring so the intermediate stays well inside
  // Decimal's ~2^96 range even near MAX_SQRT_PRICE.
  let ratio = sqrt_decimal.checked_div(two_pow_64()).ok_or(CurveMathError::DivByZero)?;
  let squared = ratio.checked_mul(ratio).ok_or(CurveMathError::MathOverflow)?;
  let exponent = base_decimal as i32 - quote_decimal as i32;
  let scale = pow10(exponent)?;
  squared.checked_div(scale).ok_or(CurveMathError::DivByZero)
}
