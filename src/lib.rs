//! Off-chain bonding-curve math for a dynamic-bonding-curve Solana
//! launchpad: Q64.64 √price fixed-point math, concentrated-liquidity
//! δ-base/δ-quote formulas, fee schedulers, curve builders, vesting and
//! supply accounting, config validation, and the swap-quote engine.
//!
//! Every fallible function in this crate returns [`error::CurveMathResult`].
//! Arithmetic never panics on overflow/underflow in non-test code; it
//! returns [`error::CurveMathError`] instead.

pub mod builders;
pub mod config;
pub mod curve;
pub mod error;
pub mod fee;
pub mod math;
pub mod quote;
pub mod validate;
pub mod vesting;
pub mod wire;

#[cfg(test)]
pub mod logging;
