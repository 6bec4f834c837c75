//! Scenario: end-to-end split of a single income item
//!
//! # Invariants under test
//!
//! 1. One income of 1,000,000 at 0 % fee among three members yields
//!    333,334 / 333,333 / 333,333 (first member absorbs the remainder).
//! 2. Fee is truncated: 1000 at 2.5 % → fee 25 → net 975.
//! 3. Multiple income items are summed item by item (fees truncated per item).
//! 4. With no penalties or incentives, final == base for every member.

use psplit_engine::{compute, IncomeItem, Member, SplitState};

fn three_members() -> Vec<Member> {
    vec![
        Member::new("m1", "Alpha"),
        Member::new("m2", "Bravo"),
        Member::new("m3", "Charlie"),
    ]
}

#[test]
fn one_million_among_three() {
    let s = SplitState {
        members: three_members(),
        income_items: vec![IncomeItem::new("boss", 1_000_000.0, 0.0)],
        ..SplitState::default()
    };

    let a = compute(&s).unwrap();
    assert_eq!(a.meta.gross, 1_000_000);
    assert_eq!(a.meta.net_income, 1_000_000);
    assert_eq!(a.meta.distributable_base, 1_000_000);
    assert_eq!(a.meta.member_count, 3);
    assert_eq!(a.meta.included_count, 3);
    assert_eq!(a.meta.base_per_floor, 333_333);
    assert_eq!(a.meta.base_remainder, 1);

    let finals: Vec<i64> = a.rows.iter().map(|r| r.final_amount).collect();
    assert_eq!(finals, vec![333_334, 333_333, 333_333]);
    for r in &a.rows {
        assert_eq!(r.final_amount, r.base, "no adjustments expected for {}", r.name);
    }
    assert_eq!(a.totals.final_amount, 1_000_000);
}

#[test]
fn fractional_fee_rate_is_truncated() {
    let s = SplitState {
        members: vec![Member::new("m1", "Solo")],
        income_items: vec![IncomeItem::new("market", 1000.0, 2.5)],
        ..SplitState::default()
    };
    let a = compute(&s).unwrap();
    assert_eq!(a.meta.gross, 1000);
    assert_eq!(a.meta.net_income, 975);
    assert_eq!(a.rows[0].final_amount, 975);
}

#[test]
fn fees_apply_per_item() {
    // 999 @ 5 % → fee 49 (49.95 truncated); 1 @ 5 % → fee 0.
    // Pooled 1000 @ 5 % would be fee 50; per-item gives 951.
    let s = SplitState {
        members: three_members(),
        income_items: vec![
            IncomeItem::new("a", 999.0, 5.0),
            IncomeItem::new("b", 1.0, 5.0),
        ],
        ..SplitState::default()
    };
    let a = compute(&s).unwrap();
    assert_eq!(a.meta.gross, 1000);
    assert_eq!(a.meta.net_income, 951);
    let bases: Vec<i64> = a.rows.iter().map(|r| r.base).collect();
    assert_eq!(bases, vec![317, 317, 317]);
}

#[test]
fn malformed_numbers_are_coerced() {
    let s = SplitState {
        members: three_members(),
        income_items: vec![
            IncomeItem::new("nan", f64::NAN, 0.0),
            IncomeItem::new("neg", -500.0, 0.0),
            IncomeItem::new("frac", 300.9, f64::INFINITY),
        ],
        ..SplitState::default()
    };
    let a = compute(&s).unwrap();
    assert_eq!(a.meta.gross, 300);
    assert_eq!(a.meta.net_income, 300);
    assert_eq!(a.totals.base, 300);
}

#[test]
fn identical_input_gives_identical_output() {
    let s = SplitState {
        members: three_members(),
        income_items: vec![IncomeItem::new("boss", 777_777.0, 1.5)],
        ..SplitState::default()
    };
    let first = serde_json::to_string(&compute(&s).unwrap()).unwrap();
    let second = serde_json::to_string(&compute(&s).unwrap()).unwrap();
    assert_eq!(first, second);
}
