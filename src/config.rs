//! The `PoolConfig` data model (spec.md §3) — the fully-validated,
//! bit-exact configuration a builder (C5) produces and the validator (C7)
//! checks.

use serde::{Deserialize, Serialize};

use crate::curve::point::CurvePoint;
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::PoolFees;
use crate::vesting::LockedVesting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
  Spl,
  Token2022,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationType {
  Slot = 0,
  Timestamp = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationOption {
  DammV1,
  DammV2,
}

/// One of the four migration-fee tiers the on-chain program recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationFeeOption {
  Bps25,
  Bps30,
  Bps100,
  Bps200,
}

impl MigrationFeeOption {
  pub fn bps(self) -> u16 {
    match self {
      MigrationFeeOption::Bps25 => 25,
      MigrationFeeOption::Bps30 => 30,
      MigrationFeeOption::Bps100 => 100,
      MigrationFeeOption::Bps200 => 200,
    }
  }
}

/// Liquidity-provider split across partner/creator, each with a locked and
/// unlocked share. Must sum to 100 (spec.md §4.7 item 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LpPercentages {
  pub partner_lp: u8,
  pub partner_locked_lp: u8,
  pub creator_lp: u8,
  pub creator_locked_lp: u8,
}

impl LpPercentages {
  pub fn sum(&self) -> u16 {
    u16::from(self.partner_lp) + u16::from(self.partner_locked_lp) + u16::from(self.creator_lp) + u16::from(self.creator_locked_lp)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenSupply {
  pub pre_migration: u64,
  pub post_migration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
  pub pool_fees: PoolFees,
  pub collect_fee_mode: crate::fee::CollectFeeMode,
  pub migration_option: MigrationOption,
  pub token_type: TokenType,
  pub activation_type: ActivationType,
  pub token_decimal: u8,
  pub migration_fee_option: MigrationFeeOption,
  pub migration_quote_threshold: u64,
  pub lp_percentages: LpPercentages,
  pub sqrt_start_price: u128,
  pub locked_vesting: LockedVesting,
  pub token_supply: TokenSupply,
  pub curve: Vec<CurvePoint>,
}

impl PoolConfig {
  /// Serializes to pretty-printed JSON, the format a launchpad operator
  /// would hand-edit or check into version control alongside a deploy
  /// script.
  pub fn to_json(&self) -> CurveMathResult<String> {
    serde_json::to_string_pretty(self).map_err(|_| CurveMathError::Serialization)
  }

  pub fn from_json(json: &str) -> CurveMathResult<Self> {
    serde_json::from_str(json).map_err(|_| CurveMathError::Serialization)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::curve::point::CurvePoint;
  use crate::fee::{BaseFeeConfig, CollectFeeMode, FeeSchedulerConfig, FeeSchedulerMode, PoolFees};

  fn sample_config() -> PoolConfig {
    PoolConfig {
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
      token_decimal: 6,
      migration_fee_option: MigrationFeeOption::Bps25,
      migration_quote_threshold: 1,
      lp_percentages: LpPercentages {
        creator_lp: 100,
        ..Default::default()
      },
      sqrt_start_price: 1u128 << 64,
      locked_vesting: LockedVesting::default(),
      token_supply: TokenSupply::default(),
      curve: vec![CurvePoint::new(2u128 << 64, 1_000_000_000_000u128 << 64)],
    }
  }

  #[test]
  fn json_round_trip_preserves_the_config() {
    let config = sample_config();
    let json = config.to_json().unwrap();
    let parsed = PoolConfig::from_json(&json).unwrap();
    assert_eq!(config, parsed);
  }

  #[test]
  fn from_json_rejects_garbage() {
    assert_eq!(PoolConfig::from_json("not json"), Err(CurveMathError::Serialization));
  }
}
