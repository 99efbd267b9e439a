//! Wire-level curve encoding (spec.md §6): the curve is carried on-chain as
//! a fixed-size `[CurvePoint; MAX_CURVE_POINT]` array, padded past its
//! logical length with the sentinel point `{sqrt_price: MAX_SQRT_PRICE,
//! liquidity: 0}` so every `PoolConfig` account has the same byte layout
//! regardless of how many segments its curve actually uses.

use crate::curve::constants::{MAX_CURVE_POINT, MAX_SQRT_PRICE};
use crate::curve::point::CurvePoint;
use crate::error::{CurveMathError, CurveMathResult};

fn sentinel() -> CurvePoint {
  CurvePoint::new(MAX_SQRT_PRICE, 0)
}

/// Pads `curve` out to exactly [`MAX_CURVE_POINT`] entries with
/// [`sentinel`] points. Fails if `curve` is already longer than that — the
/// validator (C7) should have rejected such a curve long before it gets
/// here.
pub fn pad_curve(curve: &[CurvePoint]) -> CurveMathResult<Vec<CurvePoint>> {
  if curve.len() > MAX_CURVE_POINT {
    return Err(CurveMathError::InvalidCurve);
  }
  let mut padded = curve.to_vec();
  padded.resize(MAX_CURVE_POINT, sentinel());
  Ok(padded)
}

/// Inverse of [`pad_curve`]: drops the trailing sentinel run. A sentinel
/// point appearing before the logical end of the curve (liquidity zero
/// with a non-final index) is itself a malformed curve and passed through
/// unchanged for the validator to reject.
pub fn unpad_curve(padded: &[CurvePoint]) -> Vec<CurvePoint> {
  let logical_len = padded.iter().rposition(|p| *p != sentinel()).map_or(0, |i| i + 1);
  padded[..logical_len].to_vec()
}

/// One curve point as 32 little-endian bytes: `sqrt_price` then `liquidity`.
pub fn encode_curve_point(point: CurvePoint) -> [u8; 32] {
  let mut bytes = [0u8; 32];
  bytes[0..16].copy_from_slice(&point.sqrt_price.to_le_bytes());
  bytes[16..32].copy_from_slice(&point.liquidity.to_le_bytes());
  bytes
}

pub fn decode_curve_point(bytes: &[u8; 32]) -> CurvePoint {
  let sqrt_price = u128::from_le_bytes(bytes[0..16].try_into().unwrap());
  let liquidity = u128::from_le_bytes(bytes[16..32].try_into().unwrap());
  CurvePoint::new(sqrt_price, liquidity)
}

/// Encodes a (possibly short) curve as the fixed `MAX_CURVE_POINT * 32`
/// byte blob a `PoolConfig` account stores it as.
pub fn encode_curve(curve: &[CurvePoint]) -> CurveMathResult<Vec<u8>> {
  let padded = pad_curve(curve)?;
  Ok(padded.into_iter().flat_map(encode_curve_point).collect())
}

pub fn decode_curve(bytes: &[u8]) -> CurveMathResult<Vec<CurvePoint>> {
  if bytes.len() != MAX_CURVE_POINT * 32 {
    return Err(CurveMathError::InvalidCurve);
  }
  let padded: Vec<CurvePoint> = bytes
    .chunks_exact(32)
    .map(|chunk| decode_curve_point(chunk.try_into().unwrap()))
    .collect();
  Ok(unpad_curve(&padded))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pad_then_unpad_round_trips() {
    let curve = vec![CurvePoint::new(1u128 << 64, 5), CurvePoint::new(2u128 << 64, 7)];
    let padded = pad_curve(&curve).unwrap();
    assert_eq!(padded.len(), MAX_CURVE_POINT);
    assert_eq!(unpad_curve(&padded), curve);
  }

  #[test]
  fn encode_then_decode_round_trips() {
    let curve = vec![CurvePoint::new(1u128 << 64, 5)];
    let bytes = encode_curve(&curve).unwrap();
    assert_eq!(bytes.len(), MAX_CURVE_POINT * 32);
    assert_eq!(decode_curve(&bytes).unwrap(), curve);
  }

  #[test]
  fn pad_rejects_oversized_curves() {
    let curve = vec![CurvePoint::new(1u128 << 64, 1); MAX_CURVE_POINT + 1];
    assert_eq!(pad_curve(&curve), Err(CurveMathError::InvalidCurve));
  }

  #[test]
  fn decode_rejects_wrong_length() {
    assert_eq!(decode_curve(&[0u8; 10]), Err(CurveMathError::InvalidCurve));
  }
}
