//! psplit-engine: allocator
//!
//! Responsibilities (pure, no IO):
//! - Aggregate income net of fees and deduct incentives off the top.
//! - Split the remaining pool evenly among non-excluded members.
//! - Charge penalties and redistribute them per item policy.
//! - Credit incentives and produce per-member rows plus column totals.
//!
//! Design notes:
//! - All arithmetic is integer; every split is exact (floor + first-N-get-one-more).
//! - Remainders always go to the earliest members in roster order.
//! - Failures are values (`ComputeError`), never panics.
//! - Calling `compute` twice on the same snapshot yields identical output.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::numeric::{clamp_amount, net_amount, split_evenly, sum_saturating};
use crate::types::{Member, PenaltyMode, SplitState};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Errors produced by [`compute`]. The list is exhaustive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComputeError {
    /// The roster has no members.
    EmptyRoster,
    /// Every member is excluded from distribution.
    NoEligibleRecipients,
    /// A penalty item's policy leaves nobody to receive its amount.
    NoPenaltyRecipients { label: String, mode: PenaltyMode },
}

impl std::fmt::Display for ComputeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRoster => {
                write!(f, "the roster is empty; add at least one member")
            }
            Self::NoEligibleRecipients => write!(
                f,
                "no member is eligible for distribution; clear the exclude flag on at least one member"
            ),
            Self::NoPenaltyRecipients { label, mode } => write!(
                f,
                "penalty item \"{label}\" ({mode}) has no recipients; check exclusions and the penalty mode"
            ),
        }
    }
}

impl std::error::Error for ComputeError {}

// ─── Output ──────────────────────────────────────────────────────────────────

/// Summary figures of one computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationMeta {
    /// Sum of gross income before fees.
    pub gross: i64,
    /// Sum of income after fees.
    pub net_income: i64,
    /// Sum of all incentive amounts, assigned or not.
    pub incentive_total: i64,
    /// Pool split evenly: `max(0, net_income - incentive_total)`.
    pub distributable_base: i64,
    pub member_count: usize,
    pub included_count: usize,
    pub base_per_floor: i64,
    pub base_remainder: i64,
    /// Incentive amount whose recipient is absent or unresolved.
    pub unassigned_incentive: i64,
    /// How far incentives exceed net income: `max(0, incentive_total - net_income)`.
    pub incentive_shortfall: i64,
}

/// One member's breakdown. `penalty` is the charge as a non-positive number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    pub name: String,
    pub note: String,
    pub base: i64,
    pub penalty: i64,
    pub incentive: i64,
    pub penalty_dist: i64,
    #[serde(rename = "final")]
    pub final_amount: i64,
    pub exclude: bool,
}

/// Column sums across all rows.
///
/// `incentive` reports the full incentive total (unassigned amounts included),
/// so it always equals `meta.incentive_total`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub base: i64,
    pub penalty: i64,
    pub incentive: i64,
    pub penalty_dist: i64,
    #[serde(rename = "final")]
    pub final_amount: i64,
}

/// Successful result of [`compute`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// Normalized roster (names trimmed), in input order.
    pub members: Vec<Member>,
    pub meta: AllocationMeta,
    /// One row per roster member, in roster order.
    pub rows: Vec<MemberRow>,
    pub totals: Totals,
}

impl Allocation {
    /// Per-row incentive credits summed (excludes unassigned incentives).
    pub fn credited_incentive(&self) -> i64 {
        sum_saturating(self.rows.iter().map(|r| r.incentive))
    }
}

// ─── compute ─────────────────────────────────────────────────────────────────

/// Compute the split for one snapshot.
///
/// # Algorithm
///
/// 1. Normalize the roster; fail with `EmptyRoster` if it is empty.
/// 2. Sum income: `net_i = gross_i - floor(gross_i * fee_rate_i / 100)`.
/// 3. Sum incentives; `distributable_base = max(0, net_income - incentive_total)`.
/// 4. Select included members; fail with `NoEligibleRecipients` if none.
/// 5. Split the base evenly; remainder to the first included members.
/// 6. For each penalty item (listed order) with a positive amount and a
///    resolvable payer: charge the payer, pick recipients by mode, split.
/// 7. Credit incentives to resolvable recipients.
/// 8. `final = base - charge + penalty_dist + incentive` (may be negative).
/// 9. Column totals.
pub fn compute(state: &SplitState) -> Result<Allocation, ComputeError> {
    // ── 1. Roster ────────────────────────────────────────────────────────────
    let members: Vec<Member> = state.members.iter().map(Member::normalized).collect();
    let member_count = members.len();
    if member_count == 0 {
        return Err(ComputeError::EmptyRoster);
    }

    // ── 2. Income ────────────────────────────────────────────────────────────
    let mut gross = 0i64;
    let mut net_income = 0i64;
    for item in &state.income_items {
        let g = clamp_amount(item.gross);
        gross = gross.saturating_add(g);
        net_income = net_income.saturating_add(net_amount(g, item.fee_rate));
    }

    // ── 3. Incentives off the top ────────────────────────────────────────────
    let incentive_amounts: Vec<i64> = state
        .incentives
        .iter()
        .map(|i| clamp_amount(i.amount))
        .collect();
    let incentive_total = sum_saturating(incentive_amounts.iter().copied());
    let distributable_base = (net_income - incentive_total).max(0);
    let incentive_shortfall = (incentive_total - net_income).max(0);

    // ── 4. Distribution pool ─────────────────────────────────────────────────
    let included_idx: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.exclude)
        .map(|(i, _)| i)
        .collect();
    let included_count = included_idx.len();
    if included_count == 0 {
        return Err(ComputeError::NoEligibleRecipients);
    }

    debug!(
        member_count,
        included_count, gross, net_income, incentive_total, distributable_base, "split pool"
    );

    // ── 5. Base split ────────────────────────────────────────────────────────
    let divisor = included_count as i64;
    let base_per_floor = distributable_base / divisor;
    let base_remainder = distributable_base - base_per_floor * divisor;

    let mut base_each = vec![0i64; member_count];
    for (&idx, share) in included_idx
        .iter()
        .zip(split_evenly(distributable_base, included_count))
    {
        base_each[idx] = share;
    }

    // ── 6. Penalties ─────────────────────────────────────────────────────────
    let id_to_index: HashMap<&str, usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.id.is_empty())
        .map(|(i, m)| (m.id.as_str(), i))
        .collect();
    let resolve = |id: Option<&String>| -> Option<usize> {
        id.map(String::as_str)
            .filter(|s| !s.is_empty())
            .and_then(|s| id_to_index.get(s).copied())
    };

    // Items in exclude-penalized mode interact: the excluded set is shared by all of them.
    let penalized: BTreeSet<usize> = state
        .penalty_items
        .iter()
        .filter(|p| p.mode == PenaltyMode::ExcludePenalized)
        .filter_map(|p| resolve(p.payer_id.as_ref()))
        .collect();

    let mut charge_each = vec![0i64; member_count];
    let mut dist_each = vec![0i64; member_count];

    for item in &state.penalty_items {
        let amount = clamp_amount(item.amount);
        if amount <= 0 {
            continue;
        }
        let Some(payer) = resolve(item.payer_id.as_ref()) else {
            debug!(label = %item.label, "penalty payer unresolved; item skipped");
            continue;
        };

        charge_each[payer] = charge_each[payer].saturating_add(amount);

        let recipients: Vec<usize> = match item.mode {
            PenaltyMode::IncludeSelf => included_idx.clone(),
            PenaltyMode::ExcludeSelf => included_idx
                .iter()
                .copied()
                .filter(|&i| i != payer)
                .collect(),
            PenaltyMode::ExcludePenalized => included_idx
                .iter()
                .copied()
                .filter(|i| !penalized.contains(i))
                .collect(),
        };

        if recipients.is_empty() {
            let label = item.label.trim();
            return Err(ComputeError::NoPenaltyRecipients {
                label: if label.is_empty() {
                    "unnamed".to_string()
                } else {
                    label.to_string()
                },
                mode: item.mode,
            });
        }

        for (&idx, share) in recipients
            .iter()
            .zip(split_evenly(amount, recipients.len()))
        {
            dist_each[idx] = dist_each[idx].saturating_add(share);
        }
    }

    // ── 7. Incentive credits ─────────────────────────────────────────────────
    let mut incentive_each = vec![0i64; member_count];
    let mut unassigned_incentive = 0i64;
    for (item, &amount) in state.incentives.iter().zip(&incentive_amounts) {
        match resolve(item.recipient_id.as_ref()) {
            Some(idx) => incentive_each[idx] = incentive_each[idx].saturating_add(amount),
            None => unassigned_incentive = unassigned_incentive.saturating_add(amount),
        }
    }

    // ── 8. Rows ──────────────────────────────────────────────────────────────
    let rows: Vec<MemberRow> = members
        .iter()
        .enumerate()
        .map(|(i, m)| MemberRow {
            name: if m.name.is_empty() {
                format!("Member{}", i + 1)
            } else {
                m.name.clone()
            },
            note: m.note.clone(),
            base: base_each[i],
            penalty: charge_each[i].saturating_neg(),
            incentive: incentive_each[i],
            penalty_dist: dist_each[i],
            final_amount: base_each[i]
                .saturating_sub(charge_each[i])
                .saturating_add(dist_each[i])
                .saturating_add(incentive_each[i]),
            exclude: m.exclude,
        })
        .collect();

    // ── 9. Totals ────────────────────────────────────────────────────────────
    let totals = Totals {
        base: sum_saturating(rows.iter().map(|r| r.base)),
        penalty: sum_saturating(rows.iter().map(|r| r.penalty)),
        incentive: incentive_total,
        penalty_dist: sum_saturating(rows.iter().map(|r| r.penalty_dist)),
        final_amount: sum_saturating(rows.iter().map(|r| r.final_amount)),
    };

    Ok(Allocation {
        members,
        meta: AllocationMeta {
            gross,
            net_income,
            incentive_total,
            distributable_base,
            member_count,
            included_count,
            base_per_floor,
            base_remainder,
            unassigned_incentive,
            incentive_shortfall,
        },
        rows,
        totals,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
