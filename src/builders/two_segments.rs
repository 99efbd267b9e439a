//! `build_curve_with_two_segments` (spec.md §4.5): two constant-liquidity
//! segments instead of one, so the curve can sell a disproportionate share
//! of either the base or the quote leg in its first half.
//!
//! Each segment is solved the same way [`get_first_curve`] solves the
//! single-segment case — given a segment's base and quote amounts and its
//! upper √price bound, the lower bound and liquidity fall out of the same
//! closed form. Composing it twice (top segment first, against
//! `sqrt_price_migrate`; bottom segment second, against the top segment's
//! derived lower bound) builds the two-segment curve without introducing
//! any new math.

use rust_decimal::Decimal;

use crate::builders::common::{finalise, get_first_curve, get_migration_base_token, FinaliseParams};
use crate::config::{
  ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenSupply, TokenType,
};
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::{CollectFeeMode, PoolFees};
use crate::math::q64x64::{decimal_floor_to_u128, pow10, sqrt_price_from_price};
use crate::vesting::LockedVesting;

pub struct BuildCurveWithTwoSegmentsParams {
  pub total_token_supply: u64,
  pub percentage_supply_on_migration: Decimal,
  pub migration_quote_threshold: Decimal,
  /// Share (0-100) of `percentage_supply_on_migration`'s base tokens sold
  /// in the first (lower-price) segment.
  pub percentage_of_base_in_first_segment: Decimal,
  /// Share (0-100) of `migration_quote_threshold` collected in the first
  /// segment.
  pub percentage_of_quote_in_first_segment: Decimal,
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

pub fn build_curve_with_two_segments(params: BuildCurveWithTwoSegmentsParams) -> CurveMathResult<PoolConfig> {
  let zero = Decimal::ZERO;
  let hundred = Decimal::from(100);
  if params.percentage_supply_on_migration <= zero
    || params.percentage_supply_on_migration >= hundred
    || params.percentage_of_base_in_first_segment <= zero
    || params.percentage_of_base_in_first_segment >= hundred
    || params.percentage_of_quote_in_first_segment <= zero
    || params.percentage_of_quote_in_first_segment >= hundred
  {
    return Err(CurveMathError::InvalidCurve);
  }

  let quote_threshold = to_atoms(params.migration_quote_threshold, params.quote_decimal)?;
  let swap_amount_tokens = Decimal::from(params.total_token_supply) * params.percentage_supply_on_migration / hundred;
  let swap_amount = to_atoms(swap_amount_tokens, params.base_decimal)?;

  let price_migrate = params.migration_quote_threshold / swap_amount_tokens;
  let sqrt_price_migrate = sqrt_price_from_price(price_migrate, params.base_decimal, params.quote_decimal)?;

  let base_first = (u128::from(swap_amount) * decimal_floor_to_u128(params.percentage_of_base_in_first_segment)?) / 100;
  let base_first = u64::try_from(base_first).map_err(|_| CurveMathError::MathOverflow)?;
  let base_second = swap_amount.checked_sub(base_first).ok_or(CurveMathError::MathUnderflow)?;

  let quote_first = (u128::from(quote_threshold) * decimal_floor_to_u128(params.percentage_of_quote_in_first_segment)?) / 100;
  let quote_first = u64::try_from(quote_first).map_err(|_| CurveMathError::MathOverflow)?;
  let quote_second = quote_threshold.checked_sub(quote_first).ok_or(CurveMathError::MathUnderflow)?;

  let (sqrt_mid, second_point) = get_first_curve(sqrt_price_migrate, base_second, quote_second)?;
  let (sqrt_start_price, first_point) = get_first_curve(sqrt_mid, base_first, quote_first)?;

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
    curve: vec![first_point, second_point],
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
