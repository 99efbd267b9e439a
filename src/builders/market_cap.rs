//! `build_curve` and `build_curve_by_market_cap` (spec.md §4.5): the two
//! single-segment curve builders every other builder in this module
//! extends.

use rust_decimal::Decimal;

use crate::builders::common::{finalise, get_first_curve, get_migration_base_token, FinaliseParams};
use crate::config::{
  ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenSupply, TokenType,
};
use crate::curve::constants::MAX_SQRT_PRICE;
use crate::curve::delta::initial_liquidity_from_delta_base;
use crate::curve::point::CurvePoint;
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::{CollectFeeMode, PoolFees};
use crate::math::q64x64::{decimal_floor_to_u128, pow10, sqrt_price_from_price};
use crate::vesting::LockedVesting;

pub struct BuildCurveParams {
  pub total_token_supply: u64,
  /// Percentage (0-100, e.g. `2.983257229832572`) of `total_token_supply`
  /// sold through the curve by the time `migration_quote_threshold` is
  /// collected.
  pub percentage_supply_on_migration: Decimal,
  /// Quote collected at migration, in whole quote-token units (not atoms).
  pub migration_quote_threshold: Decimal,
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

fn decimal_to_atoms(value: Decimal, decimal: u8) -> CurveMathResult<u64> {
  let scale = pow10(decimal as i32)?;
  let atoms = value.checked_mul(scale).ok_or(CurveMathError::MathOverflow)?;
  let atoms = decimal_floor_to_u128(atoms)?;
  u64::try_from(atoms).map_err(|_| CurveMathError::MathOverflow)
}

/// Builds a single-segment curve: one constant-liquidity span from a
/// derived `sqrt_start_price` up to the migration price, optionally
/// followed by a terminal segment (up to `MAX_SQRT_PRICE`) absorbing
/// whatever supply is left over after the swap leg, the migration
/// reservation, and locked vesting.
pub fn build_curve(params: BuildCurveParams) -> CurveMathResult<PoolConfig> {
  if params.percentage_supply_on_migration <= Decimal::ZERO || params.percentage_supply_on_migration >= Decimal::from(100) {
    return Err(CurveMathError::InvalidCurve);
  }

  let quote_threshold = decimal_to_atoms(params.migration_quote_threshold, params.quote_decimal)?;

  let swap_amount_tokens = Decimal::from(params.total_token_supply) * params.percentage_supply_on_migration / Decimal::from(100);
  let swap_amount = decimal_to_atoms(swap_amount_tokens, params.base_decimal)?;

  let price_migrate = params.migration_quote_threshold / swap_amount_tokens;
  let sqrt_price_migrate = sqrt_price_from_price(price_migrate, params.base_decimal, params.quote_decimal)?;

  let (sqrt_start_price, first_point) = get_first_curve(sqrt_price_migrate, swap_amount, quote_threshold)?;
  let migration_base = get_migration_base_token(quote_threshold, sqrt_price_migrate, params.migration_option)?;
  let vesting_total = params.locked_vesting.total_vesting_amount()?;

  let total_supply_atoms = u128::from(params.total_token_supply)
    .checked_mul(10u128.checked_pow(params.base_decimal as u32).ok_or(CurveMathError::MathOverflow)?)
    .ok_or(CurveMathError::MathOverflow)?;
  let used = u128::from(swap_amount)
    .checked_add(u128::from(migration_base))
    .and_then(|v| v.checked_add(u128::from(vesting_total)))
    .ok_or(CurveMathError::MathOverflow)?;
  if used > total_supply_atoms {
    return Err(CurveMathError::InvalidTokenSupply);
  }
  let leftover = total_supply_atoms - used;

  let mut curve = vec![first_point];
  if leftover > 0 {
    let terminal_liquidity = initial_liquidity_from_delta_base(leftover, MAX_SQRT_PRICE, sqrt_price_migrate)?;
    curve.push(CurvePoint::new(MAX_SQRT_PRICE, terminal_liquidity));
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

pub struct BuildCurveByMarketCapParams {
  pub total_token_supply: u64,
  /// Fully-diluted market cap (price × `total_token_supply`) at the curve's
  /// starting price, in whole quote-token units.
  pub initial_market_cap: Decimal,
  /// Fully-diluted market cap at the migration price.
  pub migration_market_cap: Decimal,
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

/// Derives `(percentage_supply_on_migration, migration_quote_threshold)`
/// from the two market caps and delegates to [`build_curve`].
///
/// `percentage_supply_on_migration` falls out of how much of the price
/// range between the two market caps' implied prices has been climbed:
/// `100 * (1 - sqrt_start/sqrt_migrate)`, which is 0 when the two caps
/// coincide (no curve) and approaches 100 as the starting price goes to
/// zero relative to the migration price. `migration_quote_threshold` then
/// follows spec.md §4.5's closed form,
/// `migrationMarketCap * (percentageOnMigration / 100)`.
pub fn build_curve_by_market_cap(params: BuildCurveByMarketCapParams) -> CurveMathResult<PoolConfig> {
  if params.initial_market_cap <= Decimal::ZERO || params.migration_market_cap <= params.initial_market_cap {
    return Err(CurveMathError::InvalidCurve);
  }

  let price_start = params.initial_market_cap / Decimal::from(params.total_token_supply);
  let price_migrate = params.migration_market_cap / Decimal::from(params.total_token_supply);
  let sqrt_start = sqrt_price_from_price(price_start, params.base_decimal, params.quote_decimal)?;
  let sqrt_migrate = sqrt_price_from_price(price_migrate, params.base_decimal, params.quote_decimal)?;

  let ratio = Decimal::try_from(sqrt_start).map_err(|_| CurveMathError::MathOverflow)?
    / Decimal::try_from(sqrt_migrate).map_err(|_| CurveMathError::MathOverflow)?;
  let percentage_supply_on_migration = (Decimal::ONE - ratio) * Decimal::from(100);
  let migration_quote_threshold = params.migration_market_cap * percentage_supply_on_migration / Decimal::from(100);

  build_curve(BuildCurveParams {
    total_token_supply: params.total_token_supply,
    percentage_supply_on_migration,
    migration_quote_threshold,
    locked_vesting: params.locked_vesting,
    base_decimal: params.base_decimal,
    quote_decimal: params.quote_decimal,
    pool_fees: params.pool_fees,
    collect_fee_mode: params.collect_fee_mode,
    migration_option: params.migration_option,
    token_type: params.token_type,
    activation_type: params.activation_type,
    migration_fee_option: params.migration_fee_option,
    lp_percentages: params.lp_percentages,
  })
}
