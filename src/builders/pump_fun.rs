//! `design_pump_fun_curve` / `design_pump_fun_curve_without_lock_vesting`
//! (spec.md §4.5): presets matching the widely-published pump.fun bonding
//! curve shape — a 1B-token supply, ~79.31% of it sold through the curve
//! by migration, and an ~85 SOL migration threshold — expressed as a thin
//! wrapper over [`build_curve`].
//!
//! These constants are reconstructed from pump.fun's public curve
//! parameters, not from the crate's own original source (see DESIGN.md);
//! callers who need a different shape should call [`build_curve`] directly.

use rust_decimal::Decimal;

use crate::builders::market_cap::{build_curve, BuildCurveParams};
use crate::config::{ActivationType, LpPercentages, MigrationFeeOption, MigrationOption, PoolConfig, TokenType};
use crate::error::CurveMathResult;
use crate::fee::{CollectFeeMode, PoolFees};
use crate::vesting::LockedVesting;

const PUMP_FUN_TOTAL_SUPPLY: u64 = 1_000_000_000;
const PUMP_FUN_PERCENTAGE_SUPPLY_ON_MIGRATION_BPS: u64 = 7_931; // 79.31%
const PUMP_FUN_MIGRATION_QUOTE_THRESHOLD_LAMPORTS_OF_SOL: u64 = 85; // whole SOL units

pub struct PumpFunCurveParams {
  pub pool_fees: PoolFees,
  pub collect_fee_mode: CollectFeeMode,
  pub migration_option: MigrationOption,
  pub token_type: TokenType,
  pub activation_type: ActivationType,
  pub migration_fee_option: MigrationFeeOption,
  pub lp_percentages: LpPercentages,
}

fn pump_fun_params(locked_vesting: LockedVesting, rest: PumpFunCurveParams) -> BuildCurveParams {
  BuildCurveParams {
    total_token_supply: PUMP_FUN_TOTAL_SUPPLY,
    percentage_supply_on_migration: Decimal::from(PUMP_FUN_PERCENTAGE_SUPPLY_ON_MIGRATION_BPS) / Decimal::from(100),
    migration_quote_threshold: Decimal::from(PUMP_FUN_MIGRATION_QUOTE_THRESHOLD_LAMPORTS_OF_SOL),
    locked_vesting,
    base_decimal: 6,
    quote_decimal: 9,
    pool_fees: rest.pool_fees,
    collect_fee_mode: rest.collect_fee_mode,
    migration_option: rest.migration_option,
    token_type: rest.token_type,
    activation_type: rest.activation_type,
    migration_fee_option: rest.migration_fee_option,
    lp_percentages: rest.lp_percentages,
  }
}

pub fn design_pump_fun_curve(locked_vesting: LockedVesting, rest: PumpFunCurveParams) -> CurveMathResult<PoolConfig> {
  build_curve(pump_fun_params(locked_vesting, rest))
}

pub fn design_pump_fun_curve_without_lock_vesting(rest: PumpFunCurveParams) -> CurveMathResult<PoolConfig> {
  build_curve(pump_fun_params(LockedVesting::default(), rest))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fee::{BaseFeeConfig, FeeSchedulerConfig, FeeSchedulerMode};

  fn rest() -> PumpFunCurveParams {
    PumpFunCurveParams {
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
  fn without_lock_vesting_produces_the_default_vesting_sentinel() {
    let config = design_pump_fun_curve_without_lock_vesting(rest()).unwrap();
    assert!(config.locked_vesting.is_default());
    assert!(!config.curve.is_empty());
  }

  #[test]
  fn with_lock_vesting_carries_it_through() {
    let vesting = crate::vesting::get_locked_vesting_params(10_000_000, 1_000, 0, 365 * 24 * 3_600, 0, 6).unwrap();
    let config = design_pump_fun_curve(vesting, rest()).unwrap();
    assert_eq!(config.locked_vesting, vesting);
  }
}
