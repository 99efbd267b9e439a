//! Shared plumbing for every curve builder (spec.md §4.5, C5): the
//! migration-side base-token reservation, the first swap segment, the
//! minimum-supply accounting the validator (C7) re-derives, and the final
//! `PoolConfig` assembly every builder funnels through.

use crate::config::{
  ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenSupply, TokenType,
};
use crate::curve::constants::{MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use crate::curve::delta::{delta_amount_base_unsigned, initial_liquidity_from_delta_quote};
use crate::curve::point::CurvePoint;
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::{CollectFeeMode, PoolFees};
use crate::math::u256::{u256_to_u128, Rounding, U256};
use crate::vesting::LockedVesting;

/// Base tokens the migration-target pool needs above `sqrt_price_migrate`.
/// The migrated pool is seeded over the full `[MIN_SQRT_PRICE,
/// MAX_SQRT_PRICE]` grid at `sqrt_price_migrate`; its quote leg (below the
/// current price) is exactly `quote_threshold` by construction, which
/// pins the pool's liquidity and therefore the base leg it needs above it.
///
/// Both migration venues (spec.md §3 `MigrationOption`) share this shape;
/// the difference between DAMM v1 and v2 is the downstream fee tier
/// (`MigrationFeeOption`), not this reservation.
pub fn get_migration_base_token(
  quote_threshold: u64,
  sqrt_price_migrate: u128,
  _migration_option: MigrationOption,
) -> CurveMathResult<u64> {
  let liquidity = initial_liquidity_from_delta_quote(u128::from(quote_threshold), MIN_SQRT_PRICE, sqrt_price_migrate)?;
  let base = delta_amount_base_unsigned(sqrt_price_migrate, MAX_SQRT_PRICE, liquidity, Rounding::Up)?;
  u64::try_from(base).map_err(|_| CurveMathError::MathOverflow)
}

/// Solves the single constant-liquidity swap segment `(sqrt_start_price,
/// sqrt_price_migrate]` whose base leg sells exactly `swap_amount` and
/// whose quote leg collects exactly `quote_threshold`.
///
/// With `L = quote_threshold << 128 / (sqrt_migrate - sqrt_start)` (from
/// the quote leg) substituted into the base-leg formula, the
/// `(sqrt_migrate - sqrt_start)` term cancels and
/// `sqrt_start = (quote_threshold << 128) / (swap_amount * sqrt_migrate)`
/// falls out directly — no iteration needed.
pub fn get_first_curve(
  sqrt_price_migrate: u128,
  swap_amount: u64,
  quote_threshold: u64,
) -> CurveMathResult<(u128, CurvePoint)> {
  if swap_amount == 0 || quote_threshold == 0 {
    return Err(CurveMathError::InvalidCurve);
  }
  let numerator = U256::from(quote_threshold) << 128;
  let denom = U256::from(swap_amount) * U256::from(sqrt_price_migrate);
  let sqrt_start_price = u256_to_u128(numerator / denom)?;
  if sqrt_start_price < MIN_SQRT_PRICE || sqrt_start_price >= sqrt_price_migrate {
    return Err(CurveMathError::InvalidSqrtPrice);
  }
  let liquidity = initial_liquidity_from_delta_quote(u128::from(quote_threshold), sqrt_start_price, sqrt_price_migrate)?;
  Ok((sqrt_start_price, CurvePoint::new(sqrt_price_migrate, liquidity)))
}

/// Minimum base-token supply a pool with this curve needs: every swap
/// segment's base leg, rounded up so the mint never comes up short, plus
/// the migration-side reservation and any locked vesting.
pub fn get_total_supply_from_curve(
  quote_threshold: u64,
  sqrt_start_price: u128,
  curve: &[CurvePoint],
  locked_vesting: &LockedVesting,
  migration_option: MigrationOption,
) -> CurveMathResult<u64> {
  let mut previous = sqrt_start_price;
  let mut swap_base: u128 = 0;
  for point in curve {
    swap_base = swap_base
      .checked_add(delta_amount_base_unsigned(previous, point.sqrt_price, point.liquidity, Rounding::Up)?)
      .ok_or(CurveMathError::MathOverflow)?;
    previous = point.sqrt_price;
  }

  let sqrt_price_migrate = curve.last().ok_or(CurveMathError::InvalidCurve)?.sqrt_price;
  let migration_base = get_migration_base_token(quote_threshold, sqrt_price_migrate, migration_option)?;
  let vesting_total = locked_vesting.total_vesting_amount()?;

  let total = swap_base
    .checked_add(u128::from(migration_base))
    .and_then(|v| v.checked_add(u128::from(vesting_total)))
    .ok_or(CurveMathError::MathOverflow)?;
  u64::try_from(total).map_err(|_| CurveMathError::MathOverflow)
}

/// Parameters every builder ends up with once it has picked a curve shape;
/// [`finalise`] is the one place that turns them into a [`PoolConfig`].
pub struct FinaliseParams {
  pub sqrt_start_price: u128,
  pub curve: Vec<CurvePoint>,
  pub pool_fees: PoolFees,
  pub collect_fee_mode: CollectFeeMode,
  pub migration_option: MigrationOption,
  pub token_type: TokenType,
  pub activation_type: ActivationType,
  pub token_decimal: u8,
  pub migration_fee_option: MigrationFeeOption,
  pub migration_quote_threshold: u64,
  pub lp_percentages: LpPercentages,
  pub locked_vesting: LockedVesting,
  pub token_supply: TokenSupply,
}

/// Shared normalize-and-emit step (spec.md §9): every builder produces its
/// curve and reservation amounts its own way, then hands them here to
/// assemble the `PoolConfig` the validator and swap-quote engine consume.
pub fn finalise(params: FinaliseParams) -> PoolConfig {
  PoolConfig {
    pool_fees: params.pool_fees,
    collect_fee_mode: params.collect_fee_mode,
    migration_option: params.migration_option,
    token_type: params.token_type,
    activation_type: params.activation_type,
    token_decimal: params.token_decimal,
    migration_fee_option: params.migration_fee_option,
    migration_quote_threshold: params.migration_quote_threshold,
    lp_percentages: params.lp_percentages,
    sqrt_start_price: params.sqrt_start_price,
    locked_vesting: params.locked_vesting,
    token_supply: params.token_supply,
    curve: params.curve,
  }
}
