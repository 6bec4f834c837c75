use chrono::{Datelike, Duration, NaiveDate, Weekday};
use psplit_engine::SplitState;

/// Integer with `,` thousands separators: `1234567` → `"1,234,567"`.
pub fn format_amount(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn split_ymd(date: &str) -> Option<[&str; 3]> {
    let parts: Vec<&str> = date.trim().split('-').collect();
    match parts.as_slice() {
        [y, m, d] => Some([*y, *m, *d]),
        _ => None,
    }
}

/// `YYYY-MM-DD` → `YYYY. MM. DD`; empty string when malformed.
pub fn format_date(date: &str) -> String {
    let Some([y, m, d]) = split_ymd(date) else {
        return String::new();
    };
    match (
        y.trim().parse::<i64>(),
        m.trim().parse::<u32>(),
        d.trim().parse::<u32>(),
    ) {
        (Ok(y), Ok(m), Ok(d)) => format!("{y}. {m:02}. {d:02}"),
        _ => String::new(),
    }
}

fn weekday_abbrev(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Calendar date for `y-m-d` where month and day may overflow: day 31 of a
/// 30-day month is the 1st of the next, month 13 is January of the next year.
/// Zero month or day counts as 1.
fn rolled_date(y: i32, m: i64, d: i64) -> Option<NaiveDate> {
    let month0 = m.max(1) - 1;
    let year = i64::from(y).checked_add(month0.div_euclid(12))?;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month0.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    first.checked_add_signed(Duration::try_days(d.max(1) - 1)?)
}

/// Short clipboard header date: `2024-03-09` → `24. 3. 9 (Sat)`.
///
/// Unparsable parts count as 0. Out-of-range month/day values roll forward
/// for the weekday (`2024-02-30` is shown with Friday, March 1st's weekday).
/// No time zone is involved.
pub fn format_clipboard_date(date: &str) -> String {
    let Some([y, m, d]) = split_ymd(date) else {
        return String::new();
    };
    let y: i32 = y.trim().parse().unwrap_or(0);
    let m: i64 = m.trim().parse().unwrap_or(0);
    let d: i64 = d.trim().parse().unwrap_or(0);
    let yy: String = y.to_string().chars().skip(2).collect();

    let dow = rolled_date(y, m, d)
        .map(|nd| format!(" ({})", weekday_abbrev(nd.weekday())))
        .unwrap_or_default();
    format!("{yy}. {m}. {d}{dow}")
}

/// Formatted date and trimmed title joined by one space when both are present.
pub fn header_title(state: &SplitState) -> String {
    let ds = format_date(&state.date);
    let t = state.title.trim();
    match (ds.is_empty(), t.is_empty()) {
        (false, false) => format!("{ds} {t}"),
        (false, true) => ds,
        _ => t.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_get_thousands_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1000), "1,000");
        assert_eq!(format_amount(333_334), "333,334");
        assert_eq!(format_amount(4_999_999), "4,999,999");
        assert_eq!(format_amount(-1_234_567), "-1,234,567");
    }

    #[test]
    fn date_formats() {
        assert_eq!(format_date("2024-03-09"), "2024. 03. 09");
        assert_eq!(format_date("2024-3-9"), "2024. 03. 09");
        assert_eq!(format_date("2024/03/09"), "");
        assert_eq!(format_date("x-03-09"), "");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn clipboard_date_has_weekday() {
        assert_eq!(format_clipboard_date("2024-03-09"), "24. 3. 9 (Sat)");
        assert_eq!(format_clipboard_date("2025-01-01"), "25. 1. 1 (Wed)");
        assert_eq!(format_clipboard_date("nope"), "");
    }

    #[test]
    fn clipboard_date_rolls_invalid_days_forward() {
        // 2024-02-30 is 2024-03-01, a Friday.
        assert_eq!(format_clipboard_date("2024-02-30"), "24. 2. 30 (Fri)");
        // Month 13 is January of the next year: 2025-01-01 is a Wednesday.
        assert_eq!(format_clipboard_date("2024-13-01"), "24. 13. 1 (Wed)");
        // Zero day and month count as 1: 2024-01-01 is a Monday.
        assert_eq!(format_clipboard_date("2024-00-00"), "24. 0. 0 (Mon)");
    }

    #[test]
    fn header_title_joins_date_and_title() {
        let mut s = SplitState::blank("2024-03-09");
        assert_eq!(header_title(&s), "2024. 03. 09");
        s.title = "  Raid night ".into();
        assert_eq!(header_title(&s), "2024. 03. 09 Raid night");
        s.date.clear();
        assert_eq!(header_title(&s), "Raid night");
    }
}
