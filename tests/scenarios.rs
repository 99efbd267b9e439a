//! End-to-end scenarios (spec.md §8) exercised through the public API
//! only: build a curve, validate it, then quote swaps against it.

use curve_math::builders::{build_curve_by_market_cap, BuildCurveByMarketCapParams};
use curve_math::config::{ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenSupply, TokenType};
use curve_math::curve::CurvePoint;
use curve_math::fee::{BaseFeeConfig, CollectFeeMode, FeeSchedulerConfig, FeeSchedulerMode, PoolFees};
use curve_math::quote::{swap_quote, swap_quote_exact, VirtualPool};
use curve_math::validate::validate_config;
use curve_math::vesting::{get_locked_vesting_params, LockedVesting};
use rust_decimal_macros::dec;

fn pool_fees(cliff_fee_numerator: u64) -> PoolFees {
  PoolFees {
    base_fee: BaseFeeConfig::FeeScheduler(FeeSchedulerConfig {
      cliff_fee_numerator,
      number_of_period: 0,
      period_frequency: 1,
      mode: FeeSchedulerMode::Linear { reduction_factor: 0 },
    }),
    dynamic_fee: None,
    protocol_fee_percent: 20,
    referral_fee_percent: 0,
  }
}

fn market_cap_params(locked_vesting: LockedVesting) -> BuildCurveByMarketCapParams {
  BuildCurveByMarketCapParams {
    total_token_supply: 1_000_000_000,
    initial_market_cap: dec!(23.5),
    migration_market_cap: dec!(405.882352941),
    locked_vesting,
    base_decimal: 6,
    quote_decimal: 9,
    pool_fees: pool_fees(2_500_000),
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
fn a_market_cap_built_curve_validates_and_quotes_swaps_both_ways() {
  let config = build_curve_by_market_cap(market_cap_params(LockedVesting::default())).unwrap();
  validate_config(&config).expect("builder output must satisfy the validator");

  let pool = VirtualPool {
    sqrt_price: config.sqrt_start_price,
    activation_point: 0,
  };

  let bought = swap_quote(pool, &config, false, 10_000_000, false, 0).unwrap();
  assert!(bought.output_amount > 0);
  assert!(bought.next_sqrt_price > pool.sqrt_price);

  let pool_after = VirtualPool {
    sqrt_price: bought.next_sqrt_price,
    activation_point: 0,
  };
  let sold = swap_quote_exact(pool_after, &config, true, bought.output_amount / 2, false, 0).unwrap();
  assert!(sold.output_amount > 0);
  assert!(sold.next_sqrt_price < pool_after.sqrt_price);
}

#[test]
fn locked_vesting_survives_the_full_builder_to_validator_path() {
  let vesting = get_locked_vesting_params(10_000_000, 1_000, 0, 365 * 24 * 3_600, 0, 6).unwrap();
  let config = build_curve_by_market_cap(market_cap_params(vesting)).unwrap();
  assert_eq!(config.locked_vesting, vesting);
  validate_config(&config).expect("vesting-bearing builder output must still validate");
}

#[test]
fn swap_quote_exact_rejects_what_the_curve_cannot_fill() {
  // A curve with a known, finite quote capacity (no leftover terminal
  // segment stretching to MAX_SQRT_PRICE) so exhausting it is guaranteed
  // rather than incidental.
  let sqrt_start_price = 1u128 << 64;
  let config = PoolConfig {
    pool_fees: pool_fees(0),
    collect_fee_mode: CollectFeeMode::Both,
    migration_option: MigrationOption::DammV1,
    token_type: TokenType::Spl,
    activation_type: ActivationType::Slot,
    token_decimal: 6,
    migration_fee_option: MigrationFeeOption::Bps25,
    migration_quote_threshold: 1,
    lp_percentages: LpPercentages {
      creator_lp: 100,
      ..Default::default()
    },
    sqrt_start_price,
    locked_vesting: LockedVesting::default(),
    token_supply: TokenSupply::default(),
    curve: vec![CurvePoint::new(2u128 << 64, 1_000_000_000_000u128 << 64)],
  };

  let pool = VirtualPool {
    sqrt_price: sqrt_start_price,
    activation_point: 0,
  };
  // Asking to buy far more quote-denominated input than the curve's single
  // finite segment can absorb must fail outright rather than silently
  // partial-filling.
  let result = swap_quote(pool, &config, false, u64::MAX, false, 0);
  assert_eq!(result, Err(curve_math::error::CurveMathError::NotEnoughLiquidity));
}
