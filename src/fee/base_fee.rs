//! Base-fee scheduler: a fee numerator that decays (linearly or
//! exponentially) over a number of discrete periods since activation, or
//! a rate-limiter tariff keyed off input size (spec.md §4.3, §3).

use serde::{Deserialize, Serialize};

use crate::curve::constants::BASIS_POINT_MAX;
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::rate_limiter::RateLimiterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeSchedulerMode {
  /// `fee = cliff - period * reduction_factor`, clamped at 0.
  Linear { reduction_factor: u64 },
  /// `fee = cliff * ((BASIS_POINT_MAX - reduction_factor) / BASIS_POINT_MAX)^period`,
  /// unrolled as `period` successive multiply-then-divide steps so the
  /// production path never touches floating-point `pow`.
  Exponential { reduction_factor: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedulerConfig {
  pub cliff_fee_numerator: u64,
  pub number_of_period: u16,
  pub period_frequency: u64,
  pub mode: FeeSchedulerMode,
}

impl FeeSchedulerConfig {
  /// Periods elapsed since `activation_point`, capped at
  /// `number_of_period`. Pre-activation (`current_point < activation_point`)
  /// uses the final (minimum) fee, matching "not yet tradeable" semantics.
  fn period(&self, current_point: u64, activation_point: u64) -> u64 {
    if current_point < activation_point {
      return self.number_of_period as u64;
    }
    if self.period_frequency == 0 {
      return 0;
    }
    let elapsed = (current_point - activation_point) / self.period_frequency;
    elapsed.min(self.number_of_period as u64)
  }

  pub fn current_fee_numerator(&self, current_point: u64, activation_point: u64) -> CurveMathResult<u64> {
    let period = self.period(current_point, activation_point);
    match self.mode {
      FeeSchedulerMode::Linear { reduction_factor } => {
        let reduction = period.checked_mul(reduction_factor).ok_or(CurveMathError::MathOverflow)?;
        Ok(self.cliff_fee_numerator.saturating_sub(reduction))
      }
      FeeSchedulerMode::Exponential { reduction_factor } => {
        if reduction_factor > BASIS_POINT_MAX {
          return Err(CurveMathError::InvalidFeeScheduler);
        }
        let mut fee = self.cliff_fee_numerator;
        let factor = BASIS_POINT_MAX - reduction_factor;
        for _ in 0..period {
          fee = fee
            .checked_mul(factor)
            .ok_or(CurveMathError::MathOverflow)?
            .checked_div(BASIS_POINT_MAX)
            .ok_or(CurveMathError::DivByZero)?;
        }
        Ok(fee)
      }
    }
  }
}

/// The two disjoint base-fee shapes a pool can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseFeeConfig {
  FeeScheduler(FeeSchedulerConfig),
  RateLimiter(RateLimiterConfig),
}

impl BaseFeeConfig {
  pub fn cliff_fee_numerator(&self) -> u64 {
    match self {
      BaseFeeConfig::FeeScheduler(cfg) => cfg.cliff_fee_numerator,
      BaseFeeConfig::RateLimiter(cfg) => cfg.cliff_fee_numerator,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn linear(cliff: u64, reduction: u64, periods: u16, freq: u64) -> FeeSchedulerConfig {
    FeeSchedulerConfig {
      cliff_fee_numerator: cliff,
      number_of_period: periods,
      period_frequency: freq,
      mode: FeeSchedulerMode::Linear { reduction_factor: reduction },
    }
  }

  #[test]
  fn linear_decays_and_clamps_at_zero() {
    let cfg = linear(1_000, 100, 20, 60);
    assert_eq!(cfg.current_fee_numerator(0, 0).unwrap(), 1_000);
    assert_eq!(cfg.current_fee_numerator(60, 0).unwrap(), 900);
    assert_eq!(cfg.current_fee_numerator(60 * 30, 0).unwrap(), 0);
  }

  #[test]
  fn pre_activation_uses_final_fee() {
    let cfg = linear(1_000, 100, 5, 60);
    assert_eq!(cfg.current_fee_numerator(0, 1_000).unwrap(), 500);
  }

  #[test]
  fn exponential_decays_monotonically() {
    let cfg = FeeSchedulerConfig {
      cliff_fee_numerator: 1_000_000,
      number_of_period: 10,
      period_frequency: 60,
      mode: FeeSchedulerMode::Exponential { reduction_factor: 500 },
    };
    let f0 = cfg.current_fee_numerator(0, 0).unwrap();
    let f1 = cfg.current_fee_numerator(60, 0).unwrap();
    let f2 = cfg.current_fee_numerator(120, 0).unwrap();
    assert!(f0 > f1 && f1 > f2);
  }
}
