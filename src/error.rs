//! Error kinds shared by every fallible function in this crate.

/// Every way a curve-math call can fail.
///
/// Arithmetic errors (`MathOverflow`/`MathUnderflow`/`DivByZero`) are always
/// fatal for the call they occur in; there is nothing useful to retry.
/// Builders surface the underlying arithmetic error unchanged rather than
/// wrapping it, so a caller debugging a bad curve sees exactly which
/// primitive tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CurveMathError {
  #[error("math overflow")]
  MathOverflow,
  #[error("math underflow")]
  MathUnderflow,
  #[error("division by zero")]
  DivByZero,
  #[error("sqrt price out of [MIN_SQRT_PRICE, MAX_SQRT_PRICE]")]
  InvalidSqrtPrice,
  #[error("invalid curve: ordering, emptiness, size, or zero-liquidity violation")]
  InvalidCurve,
  #[error("invalid fee collection mode")]
  InvalidFeeMode,
  #[error("invalid fee scheduler configuration")]
  InvalidFeeScheduler,
  #[error("invalid activation type")]
  InvalidActivationType,
  #[error("invalid migration fee option")]
  InvalidMigrationFeeOption,
  #[error("invalid token decimal, must be in [6, 9]")]
  InvalidTokenDecimal,
  #[error("migration option is incompatible with token type")]
  InvalidMigrationAndTokenType,
  #[error("LP percentage split does not sum to 100")]
  InvalidLpPercentageSum,
  #[error("locked vesting is invalid: non-default vesting needs frequency > 0 and total > 0")]
  InvalidVesting,
  #[error("token supply bounds violated")]
  InvalidTokenSupply,
  #[error("not enough liquidity to satisfy the swap")]
  NotEnoughLiquidity,
  #[error("rate limiter configuration is invalid")]
  RateLimiterInvalid,
  #[error("config (de)serialization failed")]
  Serialization,
}

pub type CurveMathResult<T> = Result<T, CurveMathError>;
