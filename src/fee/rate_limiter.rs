//! Rate-limiter fee: a triangular tariff that rises with input size above
//! a reference amount and asymptotes at `MAX_FEE_NUMERATOR` (spec.md §4.3).

use serde::{Deserialize, Serialize};

use crate::curve::constants::{FEE_DENOMINATOR, MAX_FEE_NUMERATOR};
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::bps_to_fee_numerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
  pub cliff_fee_numerator: u64,
  pub fee_increment_bps: u64,
  pub max_limiter_duration: u64,
  pub reference_amount: u128,
}

impl RateLimiterConfig {
  /// spec.md §7 `RateLimiterInvalid`: any of these makes the curve
  /// unusable regardless of what else is valid about the pool.
  pub fn validate(&self) -> CurveMathResult<()> {
    let max_fee = bps_to_fee_numerator(self.fee_increment_bps);
    if self.cliff_fee_numerator == 0
      || max_fee == 0
      || self.cliff_fee_numerator > MAX_FEE_NUMERATOR
      || self.reference_amount == 0
      || self.max_limiter_duration == 0
    {
      return Err(CurveMathError::RateLimiterInvalid);
    }
    Ok(())
  }

  /// Fee charged on `input_amount`, monotone non-decreasing and capped at
  /// `input_amount * MAX_FEE_NUMERATOR / FEE_DENOMINATOR` (spec.md §8
  /// properties 5 & 6).
  pub fn fee(&self, input_amount: u64) -> CurveMathResult<u64> {
    let x0 = self.reference_amount;
    let c = u128::from(self.cliff_fee_numerator);
    let i = u128::from(bps_to_fee_numerator(self.fee_increment_bps));
    let a_input = u128::from(input_amount);
    let denom = u128::from(FEE_DENOMINATOR);

    if a_input <= x0 {
      let fee = a_input.checked_mul(c).ok_or(CurveMathError::MathOverflow)? / denom;
      return u64::try_from(fee).map_err(|_| CurveMathError::MathOverflow);
    }

    let m = u128::from(MAX_FEE_NUMERATOR)
      .checked_sub(c)
      .ok_or(CurveMathError::MathUnderflow)?;
    if i == 0 {
      return Err(CurveMathError::RateLimiterInvalid);
    }
    let max_index = m / i;

    let over = a_input - x0;
    let a = over / x0;
    let b = over % x0;

    let numerator = if a < max_index {
      let triangular = i
        .checked_mul(a)
        .and_then(|v| v.checked_mul(a + 1))
        .ok_or(CurveMathError::MathOverflow)?
        / 2;
      let c_a = c.checked_mul(a).ok_or(CurveMathError::MathOverflow)?;
      let bracket = c
        .checked_add(c_a)
        .and_then(|v| v.checked_add(triangular))
        .ok_or(CurveMathError::MathOverflow)?;
      let left = x0.checked_mul(bracket).ok_or(CurveMathError::MathOverflow)?;
      let i_a1 = i.checked_mul(a + 1).ok_or(CurveMathError::MathOverflow)?;
      let right_bracket = c.checked_add(i_a1).ok_or(CurveMathError::MathOverflow)?;
      let right = b.checked_mul(right_bracket).ok_or(CurveMathError::MathOverflow)?;
      left.checked_add(right).ok_or(CurveMathError::MathOverflow)?
    } else {
      let d = a - max_index;
      let triangular = i
        .checked_mul(max_index)
        .and_then(|v| v.checked_mul(max_index + 1))
        .ok_or(CurveMathError::MathOverflow)?
        / 2;
      let c_max = c.checked_mul(max_index).ok_or(CurveMathError::MathOverflow)?;
      let bracket = c
        .checked_add(c_max)
        .and_then(|v| v.checked_add(triangular))
        .ok_or(CurveMathError::MathOverflow)?;
      let left = x0.checked_mul(bracket).ok_or(CurveMathError::MathOverflow)?;
      let tail = d
        .checked_mul(x0)
        .and_then(|v| v.checked_add(b))
        .ok_or(CurveMathError::MathOverflow)?;
      let right = tail
        .checked_mul(u128::from(MAX_FEE_NUMERATOR))
        .ok_or(CurveMathError::MathOverflow)?;
      left.checked_add(right).ok_or(CurveMathError::MathOverflow)?
    };

    let fee = numerator / denom;
    u64::try_from(fee).map_err(|_| CurveMathError::MathOverflow)
  }
}
