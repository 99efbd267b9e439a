//! Curve builders (spec.md §4.5, C5): turn intent-level launch parameters
//! into a fully-populated [`crate::config::PoolConfig`]. `common` holds the
//! math every builder shares; the rest are the distinct curve shapes.

pub use common::{get_first_curve, get_migration_base_token, get_total_supply_from_curve};
pub use creator_first_buy::*;
pub use liquidity_weights::*;
pub use market_cap::*;
pub use pump_fun::*;
pub use two_segments::*;

pub mod common;
pub mod creator_first_buy;
pub mod liquidity_weights;
pub mod market_cap;
pub mod pump_fun;
pub mod two_segments;
