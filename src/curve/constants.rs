/// Lower bound (inclusive) of the Q64.64 √price grid.
pub const MIN_SQRT_PRICE: u128 = 4_295_048_016;
/// Upper bound (inclusive for the final curve point) of the Q64.64 √price
/// grid, ≈ 2^96.
pub const MAX_SQRT_PRICE: u128 = 79_226_673_521_066_979_257_578_248_091;
/// Curve points beyond this size are rejected by the validator and never
/// produced by a builder; the wire serializer pads up to this many entries.
pub const MAX_CURVE_POINT: usize = 20;

pub const FEE_DENOMINATOR: u64 = 1_000_000_000;
/// Hard cap on any trading-fee numerator: 50% of `FEE_DENOMINATOR`.
pub const MAX_FEE_NUMERATOR: u64 = 500_000_000;
pub const BASIS_POINT_MAX: u64 = 10_000;
