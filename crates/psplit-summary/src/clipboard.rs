use psplit_engine::{Allocation, ComputeError};

use crate::format::{format_amount, format_clipboard_date};
use crate::types::{PayoutCluster, PriceSplit, SummaryOptions};

// ============================================================================
// Clustering
// ============================================================================

struct Payout<'a> {
    name: &'a str,
    note: &'a str,
    amount: i64,
    order: usize,
}

impl Payout<'_> {
    fn display_name(&self) -> String {
        let note = self.note.trim();
        if note.is_empty() {
            self.name.to_string()
        } else {
            format!("{}({})", self.name, note)
        }
    }
}

/// Group positive payouts into clusters of near-equal amounts.
///
/// 1. Keep rows with `final > 0`, sorted ascending by amount (roster order on ties).
/// 2. Walk the sorted list; each cluster starts at the smallest remaining amount
///    and takes every following amount within `tolerance` of it.
/// 3. The cluster amount is its median element (index `len / 2`).
/// 4. Clusters are returned in descending amount order.
pub fn cluster_payouts(allocation: &Allocation, tolerance: i64) -> Vec<PayoutCluster> {
    let mut payouts: Vec<Payout<'_>> = allocation
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.final_amount > 0)
        .map(|(order, r)| Payout {
            name: &r.name,
            note: &r.note,
            amount: r.final_amount,
            order,
        })
        .collect();
    payouts.sort_by_key(|p| p.amount);

    let mut clusters: Vec<PayoutCluster> = Vec::new();
    let mut i = 0;
    while i < payouts.len() {
        let anchor = payouts[i].amount;
        let mut j = i + 1;
        while j < payouts.len() && (payouts[j].amount - anchor).abs() <= tolerance {
            j += 1;
        }
        let slice = &payouts[i..j];
        let amount = slice[slice.len() / 2].amount;

        let mut members: Vec<&Payout<'_>> = slice.iter().collect();
        members.sort_by_key(|p| p.order);
        clusters.push(PayoutCluster {
            amount,
            names: members.iter().map(|p| p.display_name()).collect(),
        });
        i = j;
    }

    clusters.sort_by(|a, b| b.amount.cmp(&a.amount));
    clusters
}

// ============================================================================
// Price presentation
// ============================================================================

/// Express `amount` as `price × count` with `price < ceiling`.
///
/// Amounts below the ceiling are shown as `amount × 1`. Larger amounts use the
/// smallest `count ≥ 2` that brings `amount / count` to at most `ceiling − 1`;
/// the price is floored, so `product` may fall slightly short of `amount`.
pub fn choose_price(amount: i64, ceiling: i64) -> PriceSplit {
    let max_allowed = (ceiling - 1).max(1);
    if amount <= max_allowed {
        let price = amount.max(1);
        return PriceSplit {
            price,
            count: 1,
            product: price,
        };
    }
    let count = ((amount + max_allowed - 1) / max_allowed).max(2);
    let price = (amount / count).max(1);
    PriceSplit {
        price,
        count,
        product: price * count,
    }
}

// ============================================================================
// Clipboard text
// ============================================================================

/// Render the grouped payout summary for pasting into chat.
///
/// ```text
/// **24. 3. 9 (Sat)**
/// 333,333 * 1 = 333,333
/// Alpha Bravo Charlie(healer)
/// ```
///
/// When the computation failed only the date header line is returned.
pub fn clipboard_text(
    date: &str,
    result: &Result<Allocation, ComputeError>,
    options: &SummaryOptions,
) -> String {
    let header = format!("**{}**", format_clipboard_date(date));
    let Ok(allocation) = result else {
        return header;
    };

    let per_line = options.names_per_line.max(1);
    let mut lines: Vec<String> = vec![header];
    for cluster in cluster_payouts(allocation, options.tolerance) {
        let split = choose_price(cluster.amount, options.price_ceiling);
        lines.push(format!(
            "{} * {} = {}",
            format_amount(split.price),
            split.count,
            format_amount(split.product)
        ));
        for chunk in cluster.names.chunks(per_line) {
            lines.push(chunk.join(" "));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}
