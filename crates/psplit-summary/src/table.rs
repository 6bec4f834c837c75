use psplit_engine::Allocation;

use crate::format::format_amount;

const HEADERS: [&str; 6] = ["member", "base", "penalty", "incentive", "penalty dist", "final"];

/// Plain-text per-member table with a totals line, for terminals and logs.
pub fn render_table(allocation: &Allocation) -> String {
    let body: Vec<[String; 6]> = allocation
        .rows
        .iter()
        .map(|r| {
            let mut name = r.name.clone();
            if !r.note.trim().is_empty() {
                name = format!("{}({})", name, r.note.trim());
            }
            if r.exclude {
                name.push_str(" [excluded]");
            }
            [
                name,
                format_amount(r.base),
                format_amount(r.penalty),
                format_amount(r.incentive),
                format_amount(r.penalty_dist),
                format_amount(r.final_amount),
            ]
        })
        .collect();

    let t = &allocation.totals;
    let totals_row = [
        "TOTAL".to_string(),
        format_amount(t.base),
        format_amount(t.penalty),
        format_amount(t.incentive),
        format_amount(t.penalty_dist),
        format_amount(t.final_amount),
    ];

    let mut widths: [usize; 6] = HEADERS.map(|h| h.chars().count());
    for row in body.iter().chain(std::iter::once(&totals_row)) {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: [&str; 6]| -> String {
        let mut line = String::new();
        for (i, (cell, w)) in cells.iter().zip(widths.iter()).enumerate() {
            let pad = w.saturating_sub(cell.chars().count());
            if i == 0 {
                line.push_str(cell);
                line.push_str(&" ".repeat(pad));
            } else {
                line.push_str("  ");
                line.push_str(&" ".repeat(pad));
                line.push_str(cell);
            }
        }
        line.trim_end().to_string()
    };

    let mut out: Vec<String> = Vec::with_capacity(body.len() + 2);
    out.push(render(HEADERS));
    let total_width: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let rule = "-".repeat(total_width);

    out.push(rule.clone());
    for row in &body {
        out.push(render(row.each_ref().map(String::as_str)));
    }
    out.push(rule);
    out.push(render(totals_row.each_ref().map(String::as_str)));
    out.join("\n")
}
