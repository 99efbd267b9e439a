//! Volatility-indexed dynamic fee (spec.md §3, §4.3). Optional per pool;
//! represented as `Option<DynamicFeeConfig>` rather than the "initialized
//! flag + zeroed struct" the on-chain, fixed-layout side uses, since this
//! crate has no byte-layout constraint of its own (see DESIGN.md).

use serde::{Deserialize, Serialize};

use crate::error::{CurveMathError, CurveMathResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolatilityTracker {
  pub last_update_timestamp: u64,
  pub sqrt_price_reference: u128,
  pub volatility_accumulator: u128,
  pub volatility_reference: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFeeConfig {
  pub bin_step: u16,
  pub bin_step_u128: u128,
  pub filter_period: u16,
  pub decay_period: u16,
  pub reduction_factor: u16,
  pub variable_fee_control: u32,
  pub max_volatility_accumulator: u32,
  pub tracker: VolatilityTracker,
}

impl DynamicFeeConfig {
  /// `ceil((volatility_accumulator * bin_step)^2 * variable_fee_control / 10^11)`.
  pub fn variable_fee(&self) -> CurveMathResult<u64> {
    let scaled = self
      .tracker
      .volatility_accumulator
      .checked_mul(self.bin_step_u128)
      .ok_or(CurveMathError::MathOverflow)?;
    let squared = scaled.checked_mul(scaled).ok_or(CurveMathError::MathOverflow)?;
    let numerator = squared
      .checked_mul(u128::from(self.variable_fee_control))
      .ok_or(CurveMathError::MathOverflow)?;
    const DENOM: u128 = 100_000_000_000; // 10^11
    let quotient = numerator / DENOM;
    let remainder = numerator % DENOM;
    let fee = if remainder > 0 { quotient + 1 } else { quotient };
    u64::try_from(fee).map_err(|_| CurveMathError::MathOverflow)
  }
}
