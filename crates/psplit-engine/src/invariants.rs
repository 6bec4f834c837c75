//! psplit-engine: invariants
//!
//! Post-hoc verification of an [`Allocation`]. `compute` guarantees these by
//! construction; consumers run the check anyway and surface any violation as
//! a bug signal instead of showing silently wrong numbers.
//!
//! Checked equalities:
//!   - Σ base           == meta.distributable_base
//!   - Σ penalty_dist   == −Σ penalty
//!   - totals.incentive == meta.incentive_total
//!   - Σ row.incentive  == incentive_total − unassigned_incentive (≤ incentive_total)
//!   - totals.final     == net_income + incentive_shortfall − unassigned_incentive
//!   - each row: final == base + penalty + penalty_dist + incentive
//!   - each column total equals the sum of its rows

use crate::allocator::Allocation;
use crate::numeric::sum_saturating;

// ─── InvariantViolation ───────────────────────────────────────────────────────

/// A single broken equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Σ base differs from the distributable pool.
    BaseMismatch { total: i64, expected: i64 },
    /// Distributed penalties differ from charged penalties.
    PenaltyNotConserved { charged: i64, distributed: i64 },
    /// `totals.incentive` differs from `meta.incentive_total`.
    IncentiveTotalMismatch { total: i64, expected: i64 },
    /// Credited incentives exceed (or fail to match) the assignable total.
    IncentiveCreditMismatch { credited: i64, expected: i64 },
    /// Σ final differs from net income adjusted for shortfall/unassigned incentives.
    FinalMismatch { total: i64, expected: i64 },
    /// A row's final amount is not the sum of its components.
    RowArithmetic { row: usize, name: String },
    /// A column total differs from the sum of its rows.
    ColumnTotal { column: &'static str, total: i64, rows: i64 },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BaseMismatch { total, expected } => {
                write!(f, "base total {total} != distributable base {expected}")
            }
            Self::PenaltyNotConserved {
                charged,
                distributed,
            } => {
                write!(
                    f,
                    "penalty charged {charged} != penalty distributed {distributed}"
                )
            }
            Self::IncentiveTotalMismatch { total, expected } => {
                write!(f, "incentive total {total} != incentive sum {expected}")
            }
            Self::IncentiveCreditMismatch { credited, expected } => {
                write!(
                    f,
                    "credited incentives {credited} != assigned incentives {expected}"
                )
            }
            Self::FinalMismatch { total, expected } => {
                write!(f, "final total {total} != expected {expected}")
            }
            Self::RowArithmetic { row, name } => {
                write!(f, "row {row} ('{name}') final != base + penalty + dist + incentive")
            }
            Self::ColumnTotal { column, total, rows } => {
                write!(f, "column '{column}' total {total} != row sum {rows}")
            }
        }
    }
}

/// Run every check and return all violations (empty = clean).
pub fn check_invariants(a: &Allocation) -> Vec<InvariantViolation> {
    let mut out = Vec::new();
    let meta = &a.meta;
    let totals = &a.totals;

    for (row, r) in a.rows.iter().enumerate() {
        let sum = r
            .base
            .saturating_add(r.penalty)
            .saturating_add(r.penalty_dist)
            .saturating_add(r.incentive);
        if r.final_amount != sum {
            out.push(InvariantViolation::RowArithmetic {
                row,
                name: r.name.clone(),
            });
        }
    }

    let columns: [(&'static str, i64, i64); 4] = [
        ("base", totals.base, sum_saturating(a.rows.iter().map(|r| r.base))),
        (
            "penalty",
            totals.penalty,
            sum_saturating(a.rows.iter().map(|r| r.penalty)),
        ),
        (
            "penaltyDist",
            totals.penalty_dist,
            sum_saturating(a.rows.iter().map(|r| r.penalty_dist)),
        ),
        (
            "final",
            totals.final_amount,
            sum_saturating(a.rows.iter().map(|r| r.final_amount)),
        ),
    ];
    for (column, total, rows) in columns {
        if total != rows {
            out.push(InvariantViolation::ColumnTotal {
                column,
                total,
                rows,
            });
        }
    }

    if totals.base != meta.distributable_base {
        out.push(InvariantViolation::BaseMismatch {
            total: totals.base,
            expected: meta.distributable_base,
        });
    }

    let charged = totals.penalty.saturating_neg();
    if totals.penalty_dist != charged {
        out.push(InvariantViolation::PenaltyNotConserved {
            charged,
            distributed: totals.penalty_dist,
        });
    }

    if totals.incentive != meta.incentive_total {
        out.push(InvariantViolation::IncentiveTotalMismatch {
            total: totals.incentive,
            expected: meta.incentive_total,
        });
    }

    let assigned = meta.incentive_total.saturating_sub(meta.unassigned_incentive);
    let credited = a.credited_incentive();
    if credited != assigned || credited > meta.incentive_total {
        out.push(InvariantViolation::IncentiveCreditMismatch {
            credited,
            expected: assigned,
        });
    }

    let expected_final = meta
        .net_income
        .saturating_add(meta.incentive_shortfall)
        .saturating_sub(meta.unassigned_incentive);
    if totals.final_amount != expected_final {
        out.push(InvariantViolation::FinalMismatch {
            total: totals.final_amount,
            expected: expected_final,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::compute;
    use crate::types::{IncentiveItem, IncomeItem, Member, PenaltyItem, PenaltyMode, SplitState};

    fn sample() -> Allocation {
        let s = SplitState {
            members: vec![
                Member::new("a", "A"),
                Member::new("b", "B"),
                Member::new("c", "C").excluded(),
            ],
            income_items: vec![IncomeItem::new("loot", 100_001.0, 3.0)],
            incentives: vec![
                IncentiveItem::new("lead", 500.0, Some("a")),
                IncentiveItem::new("gone", 70.0, Some("deleted")),
            ],
            penalty_items: vec![PenaltyItem::new(
                "late",
                333.0,
                Some("c"),
                PenaltyMode::IncludeSelf,
            )],
            ..SplitState::default()
        };
        compute(&s).unwrap()
    }

    #[test]
    fn computed_allocation_is_clean() {
        let a = sample();
        assert_eq!(check_invariants(&a), vec![]);
    }

    #[test]
    fn tampered_row_is_reported() {
        let mut a = sample();
        a.rows[1].final_amount += 1;
        let v = check_invariants(&a);
        assert!(v.contains(&InvariantViolation::RowArithmetic {
            row: 1,
            name: "B".into()
        }));
        assert!(v
            .iter()
            .any(|x| matches!(x, InvariantViolation::ColumnTotal { column: "final", .. })));
    }

    #[test]
    fn tampered_base_is_reported() {
        let mut a = sample();
        a.meta.distributable_base += 1;
        assert!(check_invariants(&a)
            .iter()
            .any(|x| matches!(x, InvariantViolation::BaseMismatch { .. })));
    }

    #[test]
    fn tampered_penalty_is_reported() {
        let mut a = sample();
        a.rows[0].penalty_dist += 1;
        a.rows[0].final_amount += 1;
        a.totals.penalty_dist += 1;
        a.totals.final_amount += 1;
        let v = check_invariants(&a);
        assert!(v
            .iter()
            .any(|x| matches!(x, InvariantViolation::PenaltyNotConserved { .. })));
    }

    #[test]
    fn violation_display_is_not_empty() {
        let v = InvariantViolation::FinalMismatch {
            total: 1,
            expected: 2,
        };
        assert_eq!(v.to_string(), "final total 1 != expected 2");
    }
}
