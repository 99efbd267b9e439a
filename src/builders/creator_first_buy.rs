//! `build_curve_with_creator_first_buy` (spec.md §4.5): reserves the
//! lowest segment of the curve for the creator's own first buy, sized to
//! exact base/quote amounts rather than a percentage split, with the
//! remaining supply sold through a standard single-segment curve above it.

use rust_decimal::Decimal;

use crate::builders::common::{finalise, get_first_curve, get_migration_base_token, FinaliseParams};
use crate::config::{
  ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenSupply, TokenType,
};
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::{CollectFeeMode, PoolFees};
use crate::math::q64x64::{decimal_floor_to_u128, pow10, sqrt_price_from_price};
use crate::vesting::LockedVesting;

pub struct BuildCurveWithCreatorFirstBuyParams {
  pub total_token_supply: u64,
  pub percentage_supply_on_migration: Decimal,
  pub migration_quote_threshold: Decimal,
  /// Base-token atoms the creator buys immediately at activation, priced
  /// below the rest of the curve.
  pub creator_buy_base_amount: u64,
  /// Quote-token atoms the creator pays for that first buy.
  pub creator_buy_quote_amount: u64,
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

fn to_atoms(value: Decimal, decimal: u8) -> CurveMathResult<u64> {
  let scale = pow10(decimal as i32)?;
  let atoms = value.checked_mul(scale).ok_or(CurveMathError::MathOverflow)?;
  u64::try_from(decimal_floor_to_u128(atoms)?).map_err(|_| CurveMathError::MathOverflow)
}

pub fn build_curve_with_creator_first_buy(params: BuildCurveWithCreatorFirstBuyParams) -> CurveMathResult<PoolConfig> {
  if params.creator_buy_base_amount == 0 || params.creator_buy_quote_amount == 0 {
    return Err(CurveMathError::InvalidCurve);
  }
  if params.percentage_supply_on_migration <= Decimal::ZERO || params.percentage_supply_on_migration >= Decimal::from(100) {
    return Err(CurveMathError::InvalidCurve);
  }

  let quote_threshold = to_atoms(params.migration_quote_threshold, params.quote_decimal)?;
  let swap_amount_tokens = Decimal::from(params.total_token_supply) * params.percentage_supply_on_migration / Decimal::from(100);
  let swap_amount = to_atoms(swap_amount_tokens, params.base_decimal)?;

  let remaining_base = swap_amount
    .checked_sub(params.creator_buy_base_amount)
    .ok_or(CurveMathError::InvalidCurve)?;
  let remaining_quote = quote_threshold
    .checked_sub(params.creator_buy_quote_amount)
    .ok_or(CurveMathError::InvalidCurve)?;
  if remaining_base == 0 || remaining_quote == 0 {
    return Err(CurveMathError::InvalidCurve);
  }

  let price_migrate = params.migration_quote_threshold / swap_amount_tokens;
  let sqrt_price_migrate = sqrt_price_from_price(price_migrate, params.base_decimal, params.quote_decimal)?;

  let (sqrt_mid, main_point) = get_first_curve(sqrt_price_migrate, remaining_base, remaining_quote)?;
  let (sqrt_start_price, creator_point) =
    get_first_curve(sqrt_mid, params.creator_buy_base_amount, params.creator_buy_quote_amount)?;

  let migration_base = get_migration_base_token(quote_threshold, sqrt_price_migrate, params.migration_option)?;
  let vesting_total = params.locked_vesting.total_vesting_amount()?;
  let used = u128::from(swap_amount)
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
    curve: vec![creator_point, main_point],
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

  fn params() -> BuildCurveWithCreatorFirstBuyParams {
    BuildCurveWithCreatorFirstBuyParams {
      total_token_supply: 1_000_000_000,
      percentage_supply_on_migration: dec!(2.983257229832572),
      migration_quote_threshold: dec!(95.07640791476408),
      creator_buy_base_amount: 1_000_000_000,
      creator_buy_quote_amount: 1_000_000_000,
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
  fn creator_segment_is_priced_below_the_main_segment() {
    let config = build_curve_with_creator_first_buy(params()).unwrap();
    assert_eq!(config.curve.len(), 2);
    assert!(config.curve[0].sqrt_price < config.curve[1].sqrt_price);
  }

  #[test]
  fn rejects_a_first_buy_that_consumes_the_whole_segment() {
    let mut bad = params();
    bad.creator_buy_base_amount = u64::MAX;
    assert_eq!(build_curve_with_creator_first_buy(bad), Err(CurveMathError::InvalidCurve));
  }
}
