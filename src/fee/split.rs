//! Fee-collection mode matrix and the protocol/referral split (spec.md §4.3).

use serde::{Deserialize, Serialize};

use crate::error::{CurveMathError, CurveMathResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectFeeMode {
  OnlyQuote = 0,
  Both = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
  BaseToQuote,
  QuoteToBase,
}

/// Which leg of the swap fees are collected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeMode {
  pub fees_on_input: bool,
  pub fees_on_base_token: bool,
}

/// spec.md §4.3's fee-mode matrix. Any `collect_fee_mode` outside the two
/// enumerated variants is a type-system impossibility here (unlike the
/// wire-encoded on-chain side, which has to validate a raw `u8`); the
/// validator still enforces that bound when decoding external input
/// (spec.md §4.7 item 2).
pub fn fee_mode(collect_fee_mode: CollectFeeMode, direction: TradeDirection) -> FeeMode {
  match (collect_fee_mode, direction) {
    (CollectFeeMode::OnlyQuote, TradeDirection::BaseToQuote) => FeeMode {
      fees_on_input: false,
      fees_on_base_token: false,
    },
    (CollectFeeMode::OnlyQuote, TradeDirection::QuoteToBase) => FeeMode {
      fees_on_input: true,
      fees_on_base_token: false,
    },
    (CollectFeeMode::Both, TradeDirection::BaseToQuote) => FeeMode {
      fees_on_input: false,
      fees_on_base_token: false,
    },
    (CollectFeeMode::Both, TradeDirection::QuoteToBase) => FeeMode {
      fees_on_input: false,
      fees_on_base_token: true,
    },
  }
}

pub fn bps_to_fee_numerator(bps: u64) -> u64 {
  bps * crate::curve::constants::FEE_DENOMINATOR / crate::curve::constants::BASIS_POINT_MAX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSplit {
  pub lp_fee: u64,
  pub protocol_fee: u64,
  pub referral_fee: u64,
}

/// `protocol = floor(T * protocol_fee_percent / 100)`, `lp = T - protocol`;
/// if a referrer is present, `referral = floor(protocol * referral_fee_percent
/// / 100)` is carved back out of `protocol`.
pub fn split_protocol_and_referral(
  total_trading_fee: u64,
  protocol_fee_percent: u8,
  referral_fee_percent: u8,
  has_referral: bool,
) -> CurveMathResult<FeeSplit> {
  let total = u128::from(total_trading_fee);
  let protocol = total
    .checked_mul(u128::from(protocol_fee_percent))
    .ok_or(CurveMathError::MathOverflow)?
    / 100;
  let lp_fee = total.checked_sub(protocol).ok_or(CurveMathError::MathUnderflow)?;

  let (protocol, referral) = if has_referral {
    let referral = protocol
      .checked_mul(u128::from(referral_fee_percent))
      .ok_or(CurveMathError::MathOverflow)?
      / 100;
    let protocol = protocol.checked_sub(referral).ok_or(CurveMathError::MathUnderflow)?;
    (protocol, referral)
  } else {
    (protocol, 0)
  };

  Ok(FeeSplit {
    lp_fee: u64::try_from(lp_fee).map_err(|_| CurveMathError::MathOverflow)?,
    protocol_fee: u64::try_from(protocol).map_err(|_| CurveMathError::MathOverflow)?,
    referral_fee: u64::try_from(referral).map_err(|_| CurveMathError::MathOverflow)?,
  })
}
