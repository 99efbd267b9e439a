//! `build_curve_with_liquidity_weights` (spec.md §4.5): subdivides the
//! single swap segment [`build_curve`](super::build_curve) would produce
//! into several constant-liquidity sub-segments of equal √price width but
//! unequal liquidity, so the marginal price accelerates or decelerates
//! across the curve instead of staying perfectly hyperbolic.

use rust_decimal::Decimal;

use crate::builders::common::{finalise, get_first_curve, get_migration_base_token, FinaliseParams};
use crate::config::{
  ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenSupply, TokenType,
};
use crate::curve::delta::delta_amount_base_unsigned;
use crate::curve::point::CurvePoint;
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::{CollectFeeMode, PoolFees};
use crate::math::q64x64::{decimal_floor_to_u128, pow10, sqrt_price_from_price};
use crate::math::u256::Rounding;
use crate::vesting::LockedVesting;

pub struct BuildCurveWithLiquidityWeightsParams {
  pub total_token_supply: u64,
  pub percentage_supply_on_migration: Decimal,
  pub migration_quote_threshold: Decimal,
  /// Relative liquidity weight of each of the `N` equal-√price-width
  /// sub-segments the swap leg is split into; must have at least one
  /// entry and every entry must be positive. Weights need not sum to 1 —
  /// they are normalized so the average sub-segment liquidity matches the
  /// single-segment curve, preserving the total quote collected exactly.
  pub liquidity_weights: Vec<Decimal>,
  pub locked_vesting: LockedVesting,
  pub base_decimal: u8,
  pub quote_decimal: u8,
  pub pool_fees: PoolFees,
  pub collect_fee_mode: CollectFeeMode,
  pub migration_option: MigrationOption,
  pub token_type: TokenType,
  pub activation_type: ActivationType,
  pub migration_fee_option: MigrationFeeOption,
  pub lp_percentages: LpPercentages,
}

pub fn build_curve_with_liquidity_weights(params: BuildCurveWithLiquidityWeightsParams) -> CurveMathResult<PoolConfig> {
  if params.liquidity_weights.is_empty() || params.liquidity_weights.iter().any(|w| *w <= Decimal::ZERO) {
    return Err(CurveMathError::InvalidCurve);
  }
  if params.percentage_supply_on_migration <= Decimal::ZERO || params.percentage_supply_on_migration >= Decimal::from(100) {
    return Err(CurveMathError::InvalidCurve);
  }

  let quote_scale = pow10(params.quote_decimal as i32)?;
  let quote_threshold = {
    let atoms = params.migration_quote_threshold.checked_mul(quote_scale).ok_or(CurveMathError::MathOverflow)?;
    u64::try_from(decimal_floor_to_u128(atoms)?).map_err(|_| CurveMathError::MathOverflow)?
  };

  let swap_amount_tokens = Decimal::from(params.total_token_supply) * params.percentage_supply_on_migration / Decimal::from(100);
  let base_scale = pow10(params.base_decimal as i32)?;
  let swap_amount = {
    let atoms = swap_amount_tokens.checked_mul(base_scale).ok_or(CurveMathError::MathOverflow)?;
    u64::try_from(decimal_floor_to_u128(atoms)?).map_err(|_| CurveMathError::MathOverflow)?
  };

  let price_migrate = params.migration_quote_threshold / swap_amount_tokens;
  let sqrt_price_migrate = sqrt_price_from_price(price_migrate, params.base_decimal, params.quote_decimal)?;

  let (sqrt_start_price, single_segment) = get_first_curve(sqrt_price_migrate, swap_amount, quote_threshold)?;

  let n = params.liquidity_weights.len() as u128;
  let weight_sum: Decimal = params.liquidity_weights.iter().sum();
  let width = (sqrt_price_migrate - sqrt_start_price) / n;
  if width == 0 {
    return Err(CurveMathError::InvalidCurve);
  }

  let mut curve = Vec::with_capacity(params.liquidity_weights.len());
  let mut boundary = sqrt_start_price;
  let mut swap_base_total: u128 = 0;
  for (i, weight) in params.liquidity_weights.iter().enumerate() {
    let high = if i + 1 == params.liquidity_weights.len() {
      sqrt_price_migrate
    } else {
      boundary + width
    };
    let scaled = Decimal::try_from(single_segment.liquidity).map_err(|_| CurveMathError::MathOverflow)?
      * *weight
      * Decimal::from(n as u64)
      / weight_sum;
    let liquidity = decimal_floor_to_u128(scaled)?;
    swap_base_total = swap_base_total
      .checked_add(delta_amount_base_unsigned(boundary, high, liquidity, Rounding::Up)?)
      .ok_or(CurveMathError::MathOverflow)?;
    curve.push(CurvePoint::new(high, liquidity));
    boundary = high;
  }

  let migration_base = get_migration_base_token(quote_threshold, sqrt_price_migrate, params.migration_option)?;
  let vesting_total = params.locked_vesting.total_vesting_amount()?;
  let used = swap_base_total
    .checked_add(u128::from(migration_base))
    .and_then(|v| v.checked_add(u128::from(vesting_total)))
    .ok_or(CurveMathError::MathOverflow)?;

  let total_supply_atoms = u128::from(params.total_token_supply)
    .checked_mul(10u128.checked_pow(params.base_decimal as u32).ok_or(CurveMathError::MathOverflow)?)
    .ok_or(CurveMathError::MathOverflow)?;
  if used > total_supply_atoms {
    return Err(CurveMathError::InvalidTokenSupply);
  }

  let post_migration = u64::try_from(used).map_err(|_| CurveMathError::MathOverflow)?;
  let pre_migration = u64::try_from(total_supply_atoms).map_err(|_| CurveMathError::MathOverflow)?;

  Ok(finalise(FinaliseParams {
    sqrt_start_price,
    curve,
    pool_fees: params.pool_fees,
    collect_fee_mode: params.collect_fee_mode,
    migration_option: params.migration_option,
    token_type: params.token_type,
    activation_type: params.activation_type,
    token_decimal: params.base_decimal,
    migration_fee_option: params.migration_fee_option,
    migration_quote_threshold: quote_threshold,
    lp_percentages: params.lp_percentages,
    locked_vesting: params.locked_vesting,
    token_supply: TokenSupply {
      pre_migration,
      post_migration,
    },
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fee::{BaseFeeConfig, FeeSchedulerConfig, FeeSchedulerMode};
  use rust_decimal_macros::dec;

  fn params(weights: Vec<Decimal>) -> BuildCurveWithLiquidityWeightsParams {
    BuildCurveWithLiquidityWeightsParams {
      total_token_supply: 1_000_000_000,
      percentage_supply_on_migration: dec!(2.983257229832572),
      migration_quote_threshold: dec!(95.07640791476408),
      liquidity_weights: weights,
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
      collect_fee_mode: CollectFeeMode::Both,
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
  fn produces_one_curve_point_per_weight_and_stays_increasing() {
    let config = build_curve_with_liquidity_weights(params(vec![dec!(1), dec!(2), dec!(3)])).unwrap();
    assert_eq!(config.curve.len(), 3);
    let mut previous = config.sqrt_start_price;
    for point in &config.curve {
      assert!(point.sqrt_price > previous);
      assert!(point.liquidity > 0);
      previous = point.sqrt_price;
    }
  }

  #[test]
  fn rejects_empty_weights() {
    assert_eq!(build_curve_with_liquidity_weights(params(vec![])), Err(CurveMathError::InvalidCurve));
  }

  #[test]
  fn rejects_non_positive_weight() {
    assert_eq!(
      build_curve_with_liquidity_weights(params(vec![dec!(1), dec!(0)])),
      Err(CurveMathError::InvalidCurve)
    );
  }
}
