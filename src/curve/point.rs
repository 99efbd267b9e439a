use serde::{Deserialize, Serialize};

/// One segment of the piecewise-constant-liquidity curve: segment `i`
/// (i ≥ 1) spans `(curve[i-1].sqrt_price, curve[i].sqrt_price]` at
/// `curve[i].liquidity`; segment 0 spans `(sqrt_start_price,
/// curve[0].sqrt_price]` at `curve[0].liquidity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
  pub sqrt_price: u128,
  pub liquidity: u128,
}

impl CurvePoint {
  pub fn new(sqrt_price: u128, liquidity: u128) -> Self {
    Self { sqrt_price, liquidity }
  }
}
