//! Locked-vesting parameter derivation and total accounting (spec.md §4.6).

use serde::{Deserialize, Serialize};

use crate::error::{CurveMathError, CurveMathResult};

/// A cliff-then-linear unlock schedule starting `cliff_duration_from_migration_time`
/// after migration. The all-zero value is the recognised sentinel for "no
/// vesting" (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockedVesting {
  pub amount_per_period: u64,
  pub cliff_duration_from_migration_time: u64,
  pub frequency: u64,
  pub number_of_period: u64,
  pub cliff_unlock_amount: u64,
}

impl LockedVesting {
  pub fn is_default(&self) -> bool {
    *self == LockedVesting::default()
  }

  pub fn total_vesting_amount(&self) -> CurveMathResult<u64> {
    let per_period = u128::from(self.amount_per_period)
      .checked_mul(u128::from(self.number_of_period))
      .ok_or(CurveMathError::MathOverflow)?;
    let total = per_period
      .checked_add(u128::from(self.cliff_unlock_amount))
      .ok_or(CurveMathError::MathOverflow)?;
    u64::try_from(total).map_err(|_| CurveMathError::MathOverflow)
  }
}

/// Derives a [`LockedVesting`] from intent-level parameters. `total` and
/// `cliff_unlock_amount` are whole-token counts; the result is denominated
/// in base-token atoms (`* 10^base_decimal`).
///
/// The rounding remainder from dividing `(total - cliff_unlock) * 10^decimal`
/// by `number_of_period` is folded back into `cliff_unlock_amount`, so
/// `total_vesting_amount(params) == total * 10^base_decimal` exactly
/// (spec.md §8 property 2).
pub fn get_locked_vesting_params(
  total: u64,
  number_of_period: u64,
  cliff_unlock_amount: u64,
  total_duration: u64,
  cliff_duration_from_migration_time: u64,
  base_decimal: u8,
) -> CurveMathResult<LockedVesting> {
  if total == 0 {
    return Ok(LockedVesting::default());
  }
  if number_of_period == 0 {
    return Err(CurveMathError::InvalidVesting);
  }

  let scale = 10u128.checked_pow(base_decimal as u32).ok_or(CurveMathError::MathOverflow)?;
  let total_atoms = u128::from(total).checked_mul(scale).ok_or(CurveMathError::MathOverflow)?;
  let cliff_atoms = u128::from(cliff_unlock_amount)
    .checked_mul(scale)
    .ok_or(CurveMathError::MathOverflow)?;
  let remaining = total_atoms.checked_sub(cliff_atoms).ok_or(CurveMathError::MathUnderflow)?;

  let amount_per_period = remaining / u128::from(number_of_period);
  let distributed = amount_per_period
    .checked_mul(u128::from(number_of_period))
    .ok_or(CurveMathError::MathOverflow)?;
  let leftover = remaining.checked_sub(distributed).ok_or(CurveMathError::MathUnderflow)?;
  let cliff_unlock_amount = cliff_atoms.checked_add(leftover).ok_or(CurveMathError::MathOverflow)?;

  Ok(LockedVesting {
    amount_per_period: u64::try_from(amount_per_period).map_err(|_| CurveMathError::MathOverflow)?,
    cliff_duration_from_migration_time,
    frequency: total_duration / number_of_period,
    number_of_period,
    cliff_unlock_amount: u64::try_from(cliff_unlock_amount).map_err(|_| CurveMathError::MathOverflow)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn zero_total_is_the_default_sentinel() {
    let vesting = get_locked_vesting_params(0, 1000, 0, 1, 0, 6).unwrap();
    assert!(vesting.is_default());
  }

  #[test]
  fn idempotence_holds_for_the_spec_scenario() {
    // spec.md §8 S3.
    let vesting = get_locked_vesting_params(10_000_000, 1_000, 0, 365 * 24 * 3_600, 0, 6).unwrap();
    assert_eq!(vesting.total_vesting_amount().unwrap(), 10_000_000 * 1_000_000);
  }

  #[test]
  fn idempotence_holds_when_period_count_does_not_divide_evenly() {
    let vesting = get_locked_vesting_params(7, 3, 1, 90, 0, 6).unwrap();
    assert_eq!(vesting.total_vesting_amount().unwrap(), 7 * 1_000_000);
  }

  #[test]
  fn rejects_zero_number_of_period_for_nonzero_total() {
    assert_eq!(
      get_locked_vesting_params(100, 0, 0, 100, 0, 6),
      Err(CurveMathError::InvalidVesting)
    );
  }
}
