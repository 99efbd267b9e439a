pub use base_fee::*;
pub use dynamic_fee::*;
pub use rate_limiter::*;
pub use split::*;

pub mod base_fee;
pub mod dynamic_fee;
pub mod rate_limiter;
pub mod split;

use serde::{Deserialize, Serialize};

use crate::curve::constants::{FEE_DENOMINATOR, MAX_FEE_NUMERATOR};
use crate::error::{CurveMathError, CurveMathResult};
use crate::math::u256::{safe_mul_div_u64, Rounding};

/// `poolFees` from spec.md §3: a base-fee shape, an optional volatility fee,
/// and the protocol/referral split percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFees {
  pub base_fee: BaseFeeConfig,
  pub dynamic_fee: Option<DynamicFeeConfig>,
  pub protocol_fee_percent: u8,
  pub referral_fee_percent: u8,
}

/// Everything the swap-quote engine needs out of one fee computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeOnAmountResult {
  pub amount_after_fee: u64,
  pub trading_fee: u64,
  pub lp_fee: u64,
  pub protocol_fee: u64,
  pub referral_fee: u64,
}

impl PoolFees {
  pub fn get_fee_on_amount(
    &self,
    amount: u64,
    has_referral: bool,
    current_point: u64,
    activation_point: u64,
  ) -> CurveMathResult<FeeOnAmountResult> {
    let trading_fee = match &self.base_fee {
      BaseFeeConfig::RateLimiter(cfg) => cfg.fee(amount)?,
      BaseFeeConfig::FeeScheduler(cfg) => {
        let mut numerator = u128::from(cfg.current_fee_numerator(current_point, activation_point)?);
        if let Some(dynamic_fee) = &self.dynamic_fee {
          numerator = numerator
            .checked_add(u128::from(dynamic_fee.variable_fee()?))
            .ok_or(CurveMathError::MathOverflow)?;
        }
        let numerator = numerator.min(u128::from(MAX_FEE_NUMERATOR));
        safe_mul_div_u64(u128::from(amount), numerator, u128::from(FEE_DENOMINATOR), Rounding::Down)?
      }
    };

    let split = split_protocol_and_referral(trading_fee, self.protocol_fee_percent, self.referral_fee_percent, has_referral)?;
    let amount_after_fee = amount.checked_sub(trading_fee).ok_or(CurveMathError::MathUnderflow)?;

    Ok(FeeOnAmountResult {
      amount_after_fee,
      trading_fee,
      lp_fee: split.lp_fee,
      protocol_fee: split.protocol_fee,
      referral_fee: split.referral_fee,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scheduler_fees(cliff: u64) -> PoolFees {
    PoolFees {
      base_fee: BaseFeeConfig::FeeScheduler(FeeSchedulerConfig {
        cliff_fee_numerator: cliff,
        number_of_period: 0,
        period_frequency: 1,
        mode: FeeSchedulerMode::Linear { reduction_factor: 0 },
      }),
      dynamic_fee: None,
      protocol_fee_percent: 20,
      referral_fee_percent: 0,
    }
  }

  #[test]
  fn fee_on_amount_output_never_exceeds_input() {
    let fees = scheduler_fees(2_500_000);
    let result = fees.get_fee_on_amount(1_000_000_000, false, 0, 0).unwrap();
    assert!(result.amount_after_fee <= 1_000_000_000);
    assert_eq!(result.amount_after_fee + result.trading_fee, 1_000_000_000);
  }

  #[test]
  fn zero_cliff_fee_yields_no_trading_fee() {
    let fees = scheduler_fees(0);
    let result = fees.get_fee_on_amount(1_000_000_000, false, 0, 0).unwrap();
    assert_eq!(result.trading_fee, 0);
    assert_eq!(result.amount_after_fee, 1_000_000_000);
  }
}
