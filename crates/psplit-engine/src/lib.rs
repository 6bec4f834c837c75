//! psplit-engine
//!
//! Allocation engine for splitting shared party income.
//! - Income is summed after percentage fees (truncated, never rounded)
//! - Incentives are paid off the top, the rest is split evenly
//! - Penalties are charged to one member and redistributed per item policy
//! - Every split is integer-exact: remainders go to the first members in roster order
//! - Pure deterministic logic (no IO, no time, no persisted state)

mod numeric;
mod types;

pub mod allocator;
pub mod invariants;

pub use allocator::{compute, Allocation, AllocationMeta, ComputeError, MemberRow, Totals};
pub use invariants::{check_invariants, InvariantViolation};
pub use numeric::{
    clamp_amount, clamp_int, fee_amount, net_amount, split_evenly, sum_saturating,
    MAX_SAFE_INTEGER,
};
pub use types::{IncentiveItem, IncomeItem, Member, PenaltyItem, PenaltyMode, SplitState};
