use chrono::Utc;
use psplit_engine::{
    clamp_amount, IncentiveItem, IncomeItem, Member, PenaltyItem, PenaltyMode, SplitState,
};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_ymd() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Empty snapshot dated today.
pub fn blank_state() -> SplitState {
    SplitState::blank(today_ymd())
}

/// Fresh id: `<prefix>_<12 hex chars>`.
pub fn gen_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &raw[..12])
}

/// Lenient number: JSON numbers as-is, numeric strings parsed (`,` separators
/// dropped), booleans as 1/0, everything else 0.
pub fn coerce_number(v: Option<&Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                0.0
            } else {
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .unwrap_or(0.0)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Lenient boolean: `true`, non-zero numbers, and `"true"`/`"1"`/`"yes"`.
pub fn coerce_bool(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}

fn str_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(Value::as_str)
}

fn non_empty_str(v: &Value, key: &str) -> Option<String> {
    str_field(v, key)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn id_or_new(v: &Value, prefix: &str) -> String {
    non_empty_str(v, "id").unwrap_or_else(|| gen_id(prefix))
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Resolve a reference field: the id form wins; otherwise a legacy integer
/// roster index is rewritten to that member's id. Out-of-range → unresolved.
fn member_ref(v: &Value, id_key: &str, legacy_key: &str, members: &[Member]) -> Option<String> {
    if let Some(id) = non_empty_str(v, id_key) {
        return Some(id);
    }
    let idx = v.get(legacy_key)?.as_u64()?;
    let resolved = usize::try_from(idx)
        .ok()
        .and_then(|i| members.get(i))
        .map(|m| m.id.clone());
    debug!(legacy_key, idx, resolved = ?resolved, "migrated index-based reference");
    resolved
}

/// Rebuild a complete [`SplitState`] from stored JSON.
///
/// Never fails: anything unusable falls back to a default (blank roster,
/// generated ids, positional labels, `exclude-penalized` mode, today's date).
pub fn normalize_state(raw: &Value) -> SplitState {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let members: Vec<Member> = array(obj, "members")
        .iter()
        .enumerate()
        .map(|(idx, m)| Member {
            id: id_or_new(m, "m"),
            name: str_field(m, "name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Member{}", idx + 1)),
            exclude: coerce_bool(m.get("exclude")),
            note: str_field(m, "note").unwrap_or_default().to_string(),
        })
        .collect();

    let income_items: Vec<IncomeItem> = array(obj, "incomeItems")
        .iter()
        .enumerate()
        .map(|(idx, it)| IncomeItem {
            id: id_or_new(it, "income"),
            label: str_field(it, "label")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Income {}", idx + 1)),
            gross: coerce_number(it.get("gross")),
            fee_rate: coerce_number(it.get("feeRate")),
        })
        .collect();

    let incentives: Vec<IncentiveItem> = array(obj, "incentives")
        .iter()
        .enumerate()
        .map(|(idx, it)| IncentiveItem {
            id: id_or_new(it, "inc"),
            label: str_field(it, "label")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Incentive {}", idx + 1)),
            amount: clamp_amount(coerce_number(it.get("amount"))) as f64,
            recipient_id: member_ref(it, "recipientId", "recipient", &members),
        })
        .collect();

    let penalty_items: Vec<PenaltyItem> = array(obj, "penaltyItems")
        .iter()
        .enumerate()
        .map(|(idx, it)| PenaltyItem {
            id: id_or_new(it, "pen"),
            label: str_field(it, "label")
                .map(str::to_string)
                .unwrap_or_else(|| format!("Penalty {}", idx + 1)),
            amount: clamp_amount(coerce_number(it.get("amount"))) as f64,
            payer_id: member_ref(it, "payerId", "payer", &members),
            mode: str_field(it, "mode")
                .and_then(PenaltyMode::parse)
                .unwrap_or_default(),
        })
        .collect();

    SplitState {
        date: obj
            .get("date")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(today_ymd),
        title: obj
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        memo: obj
            .get("memo")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        members,
        income_items,
        incentives,
        penalty_items,
    }
}
