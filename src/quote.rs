//! Swap-quote engine (spec.md §4.4, C4): walks the piecewise-constant
//! liquidity curve in the swap direction, composing with the fee mode from
//! `fee::split`.
//!
//! Resolves spec.md §9's open question about quote→base vs base→quote
//! partial-fill behavior in favor of §4.4's algorithmic description (the
//! more detailed of the two, and internally consistent): quote→base fails
//! outright with [`CurveMathError::NotEnoughLiquidity`] if the curve is
//! exhausted before the input is, because there is no price above
//! `MAX_SQRT_PRICE` to fall back to. base→quote instead falls back to
//! segment 0's liquidity to absorb any residual once it reaches the
//! curve's floor, logging a warning — legacy behavior some callers rely
//! on (spec.md §9). [`swap_quote_exact`] additionally rejects that
//! fallback path, for callers that would rather fail than silently
//! extend segment 0.

use serde::{Deserialize, Serialize};

use crate::curve::delta::{delta_amount_base_unsigned, delta_amount_quote_unsigned, next_sqrt_price_from_input};
use crate::curve::point::CurvePoint;
use crate::error::{CurveMathError, CurveMathResult};
use crate::fee::{fee_mode, TradeDirection};
use crate::math::u256::Rounding;
use crate::config::PoolConfig;

/// Pool state at quote time. Only the fields the quote engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualPool {
  pub sqrt_price: u128,
  pub activation_point: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwapQuote {
  pub actual_input_amount: u64,
  pub output_amount: u64,
  pub next_sqrt_price: u128,
  pub trading_fee: u64,
  pub protocol_fee: u64,
  pub referral_fee: u64,
}

struct WalkResult {
  amount_out: u128,
  next_sqrt_price: u128,
  used_floor_fallback: bool,
}

fn walk_quote_to_base(start_sqrt_price: u128, curve: &[CurvePoint], amount_in: u128) -> CurveMathResult<WalkResult> {
  let mut current_sqrt_price = start_sqrt_price;
  let mut amount_left = amount_in;
  let mut amount_out: u128 = 0;

  for point in curve {
    if point.sqrt_price <= current_sqrt_price {
      continue;
    }
    if amount_left == 0 {
      break;
    }
    let liquidity = point.liquidity;
    let max_quote_in = delta_amount_quote_unsigned(current_sqrt_price, point.sqrt_price, liquidity, Rounding::Up)?;
    if amount_left < max_quote_in {
      let next_sqrt_price = next_sqrt_price_from_input(current_sqrt_price, liquidity, amount_left, false)?;
      amount_out += delta_amount_base_unsigned(current_sqrt_price, next_sqrt_price, liquidity, Rounding::Down)?;
      current_sqrt_price = next_sqrt_price;
      amount_left = 0;
      break;
    }
    amount_out += delta_amount_base_unsigned(current_sqrt_price, point.sqrt_price, liquidity, Rounding::Down)?;
    amount_left -= max_quote_in;
    current_sqrt_price = point.sqrt_price;
  }

  if amount_left > 0 {
    return Err(CurveMathError::NotEnoughLiquidity);
  }

  Ok(WalkResult {
    amount_out,
    next_sqrt_price: current_sqrt_price,
    used_floor_fallback: false,
  })
}

fn walk_base_to_quote(
  start_sqrt_price: u128,
  sqrt_start_price: u128,
  curve: &[CurvePoint],
  amount_in: u128,
) -> CurveMathResult<WalkResult> {
  let mut current_sqrt_price = start_sqrt_price;
  let mut amount_left = amount_in;
  let mut amount_out: u128 = 0;

  for i in (0..curve.len()).rev() {
    if amount_left == 0 {
      break;
    }
    let lower = if i == 0 { sqrt_start_price } else { curve[i - 1].sqrt_price };
    if lower >= current_sqrt_price {
      continue;
    }
    let liquidity = curve[i].liquidity;
    let max_base_in = delta_amount_base_unsigned(lower, current_sqrt_price, liquidity, Rounding::Up)?;
    if amount_left < max_base_in {
      let next_sqrt_price = next_sqrt_price_from_input(current_sqrt_price, liquidity, amount_left, true)?;
      amount_out += delta_amount_quote_unsigned(next_sqrt_price, current_sqrt_price, liquidity, Rounding::Down)?;
      current_sqrt_price = next_sqrt_price;
      amount_left = 0;
      break;
    }
    amount_out += delta_amount_quote_unsigned(lower, current_sqrt_price, liquidity, Rounding::Down)?;
    amount_left -= max_base_in;
    current_sqrt_price = lower;
  }

  let used_floor_fallback = amount_left > 0;
  if used_floor_fallback {
    log::warn!(
      "base->quote swap exhausted the curve with {amount_left} residual base input; \
       falling back to segment 0 liquidity to absorb it"
    );
    let liquidity = curve.first().ok_or(CurveMathError::InvalidCurve)?.liquidity;
    let next_sqrt_price = next_sqrt_price_from_input(current_sqrt_price, liquidity, amount_left, true)?;
    amount_out += delta_amount_quote_unsigned(next_sqrt_price, current_sqrt_price, liquidity, Rounding::Down)?;
    current_sqrt_price = next_sqrt_price;
  }

  Ok(WalkResult {
    amount_out,
    next_sqrt_price: current_sqrt_price,
    used_floor_fallback,
  })
}

fn direction_of(is_base_to_quote: bool) -> TradeDirection {
  if is_base_to_quote {
    TradeDirection::BaseToQuote
  } else {
    TradeDirection::QuoteToBase
  }
}

fn quote_inner(
  pool: VirtualPool,
  config: &PoolConfig,
  is_base_to_quote: bool,
  amount_in: u64,
  has_referral: bool,
  current_point: u64,
  reject_floor_fallback: bool,
) -> CurveMathResult<SwapQuote> {
  if config.curve.is_empty() {
    return Err(CurveMathError::InvalidCurve);
  }

  let mode = fee_mode(config.collect_fee_mode, direction_of(is_base_to_quote));

  let mut amount_for_curve = amount_in;
  let mut trading_fee = 0u64;
  let mut protocol_fee = 0u64;
  let mut referral_fee = 0u64;

  if mode.fees_on_input {
    let fee_result = config
      .pool_fees
      .get_fee_on_amount(amount_in, has_referral, current_point, pool.activation_point)?;
    amount_for_curve = fee_result.amount_after_fee;
    trading_fee = fee_result.trading_fee;
    protocol_fee = fee_result.protocol_fee;
    referral_fee = fee_result.referral_fee;
  }

  let walk = if is_base_to_quote {
    walk_base_to_quote(pool.sqrt_price, config.sqrt_start_price, &config.curve, u128::from(amount_for_curve))?
  } else {
    walk_quote_to_base(pool.sqrt_price, &config.curve, u128::from(amount_for_curve))?
  };

  if reject_floor_fallback && walk.used_floor_fallback {
    return Err(CurveMathError::NotEnoughLiquidity);
  }

  let mut output_amount = u64::try_from(walk.amount_out).map_err(|_| CurveMathError::MathOverflow)?;

  if !mode.fees_on_input {
    let fee_result = config
      .pool_fees
      .get_fee_on_amount(output_amount, has_referral, current_point, pool.activation_point)?;
    output_amount = fee_result.amount_after_fee;
    trading_fee = fee_result.trading_fee;
    protocol_fee = fee_result.protocol_fee;
    referral_fee = fee_result.referral_fee;
  }

  Ok(SwapQuote {
    actual_input_amount: amount_for_curve,
    output_amount,
    next_sqrt_price: walk.next_sqrt_price,
    trading_fee,
    protocol_fee,
    referral_fee,
  })
}

/// Partial-fill-tolerant default: a base→quote swap that hits the curve's
/// floor still returns a result (see module docs); a quote→base swap that
/// hits `MAX_SQRT_PRICE` fails with [`CurveMathError::NotEnoughLiquidity`].
pub fn swap_quote(
  pool: VirtualPool,
  config: &PoolConfig,
  is_base_to_quote: bool,
  amount_in: u64,
  has_referral: bool,
  current_point: u64,
) -> CurveMathResult<SwapQuote> {
  quote_inner(pool, config, is_base_to_quote, amount_in, has_referral, current_point, false)
}

/// As [`swap_quote`], but also rejects the base→quote floor fallback
/// instead of silently extending segment 0.
pub fn swap_quote_exact(
  pool: VirtualPool,
  config: &PoolConfig,
  is_base_to_quote: bool,
  amount_in: u64,
  has_referral: bool,
  current_point: u64,
) -> CurveMathResult<SwapQuote> {
  quote_inner(pool, config, is_base_to_quote, amount_in, has_referral, current_point, true)
}
