//! Config validation (spec.md §4.7, C7). Checks run in the order spec.md
//! lists them and the validator returns the *first* violation, so
//! diagnostics stay deterministic across callers.

use crate::builders::common::get_total_supply_from_curve;
use crate::config::{MigrationOption, PoolConfig, TokenType};
use crate::curve::constants::{MAX_CURVE_POINT, MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::BaseFeeConfig;

pub fn validate_config(config: &PoolConfig) -> CurveMathResult<()> {
  // 1. base fee present and sane.
  if config.pool_fees.base_fee.cliff_fee_numerator() == 0 {
    return Err(CurveMathError::InvalidFeeScheduler);
  }
  if let BaseFeeConfig::RateLimiter(cfg) = &config.pool_fees.base_fee {
    cfg.validate()?;
  }

  // 2. enumerated-value bounds that aren't already enforced by the type system.
  if !(6..=9).contains(&config.token_decimal) {
    return Err(CurveMathError::InvalidTokenDecimal);
  }

  // 3. migration/token-type compatibility.
  if config.migration_option == MigrationOption::DammV1 && config.token_type != TokenType::Spl {
    return Err(CurveMathError::InvalidMigrationAndTokenType);
  }

  // 4. LP percentages sum to 100.
  if config.lp_percentages.sum() != 100 {
    return Err(CurveMathError::InvalidLpPercentageSum);
  }

  // 5. migration threshold and start price bounds.
  if config.migration_quote_threshold == 0 {
    return Err(CurveMathError::InvalidTokenSupply);
  }
  if config.sqrt_start_price < MIN_SQRT_PRICE || config.sqrt_start_price >= MAX_SQRT_PRICE {
    return Err(CurveMathError::InvalidSqrtPrice);
  }

  // 6. curve shape.
  validate_curve(config)?;

  // 7. vesting.
  if !config.locked_vesting.is_default() {
    let total = config.locked_vesting.total_vesting_amount()?;
    if config.locked_vesting.frequency == 0 || total == 0 {
      return Err(CurveMathError::InvalidVesting);
    }
  }

  // 8. token-supply bounds.
  validate_token_supply(config)?;

  Ok(())
}

fn validate_curve(config: &PoolConfig) -> CurveMathResult<()> {
  if config.curve.is_empty() || config.curve.len() > MAX_CURVE_POINT {
    return Err(CurveMathError::InvalidCurve);
  }
  if config.curve[0].sqrt_price <= config.sqrt_start_price {
    return Err(CurveMathError::InvalidCurve);
  }
  let mut previous = config.sqrt_start_price;
  for point in &config.curve {
    if point.liquidity == 0 || point.sqrt_price <= previous {
      return Err(CurveMathError::InvalidCurve);
    }
    previous = point.sqrt_price;
  }
  if config.curve.last().unwrap().sqrt_price > MAX_SQRT_PRICE {
    return Err(CurveMathError::InvalidCurve);
  }
  Ok(())
}

fn validate_token_supply(config: &PoolConfig) -> CurveMathResult<()> {
  let minimum = get_total_supply_from_curve(
    config.migration_quote_threshold,
    config.sqrt_start_price,
    &config.curve,
    &config.locked_vesting,
    config.migration_option,
  )?;
  if config.token_supply.post_migration < minimum {
    return Err(CurveMathError::InvalidTokenSupply);
  }
  if config.token_supply.pre_migration < config.token_supply.post_migration {
    return Err(CurveMathError::InvalidTokenSupply);
  }
  if config.token_supply.pre_migration < minimum {
    return Err(CurveMathError::InvalidTokenSupply);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builders::build_curve_by_market_cap;
  use crate::builders::BuildCurveByMarketCapParams;
  use crate::config::{ActivationType, LpPercentages, MigrationFeeOption};
  use crate::fee::{BaseFeeConfig, FeeSchedulerConfig, FeeSchedulerMode, PoolFees};
  use crate::vesting::LockedVesting;
  use rust_decimal_macros::dec;

  fn base_params() -> BuildCurveByMarketCapParams {
    BuildCurveByMarketCapParams {
      total_token_supply: 1_000_000_000,
      initial_market_cap: dec!(23.5),
      migration_market_cap: dec!(405.882352941),
      locked_vesting: LockedVesting::default(),
      base_decimal: 6,
      quote_decimal: 9,
      pool_fees: PoolFees {
        base_fee: BaseFeeConfig::FeeScheduler(FeeSchedulerConfig {
          cliff_fee_numerator: 2_500_000,
          number_of_period: 0,
          period_frequency: 1,
          mode: FeeSchedulerMode::Linear { reduction_factor: 0 },
        }),
        dynamic_fee: None,
        protocol_fee_percent: 20,
        referral_fee_percent: 0,
      },
      collect_fee_mode: crate::fee::CollectFeeMode::Both,
      migration_option: MigrationOption::DammV1,
      token_type: TokenType::Spl,
      activation_type: ActivationType::Slot,
      migration_fee_option: MigrationFeeOption::Bps25,
      lp_percentages: LpPercentages {
        creator_lp: 100,
        ..Default::default()
      },
    }
  }

  #[test]
  fn builder_output_passes_validation() {
    let config = build_curve_by_market_cap(base_params()).unwrap();
    assert!(validate_config(&config).is_ok());
  }

  #[test]
  fn lp_percentage_sum_must_equal_100() {
    let mut config = build_curve_by_market_cap(base_params()).unwrap();
    config.lp_percentages.creator_lp = 50;
    assert_eq!(validate_config(&config), Err(CurveMathError::InvalidLpPercentageSum));
  }

  #[test]
  fn token_decimal_must_be_in_range() {
    let mut config = build_curve_by_market_cap(base_params()).unwrap();
    config.token_decimal = 18;
    assert_eq!(validate_config(&config), Err(CurveMathError::InvalidTokenDecimal));
  }

  #[test]
  fn damm_v1_requires_spl_token_type() {
    let mut config = build_curve_by_market_cap(base_params()).unwrap();
    config.token_type = TokenType::Token2022;
    assert_eq!(validate_config(&config), Err(CurveMathError::InvalidMigrationAndTokenType));
  }

  #[test]
  fn empty_curve_is_rejected() {
    let mut config = build_curve_by_market_cap(base_params()).unwrap();
    config.curve.clear();
    assert_eq!(validate_config(&config), Err(CurveMathError::InvalidCurve));
  }
}
