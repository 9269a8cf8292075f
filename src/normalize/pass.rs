use serde_json::{Map, Value};

use crate::config::Theme;
use crate::foundation::core::HexColor;
use crate::foundation::error::{GardenError, GardenResult};
use crate::normalize::record::{DayRecord, Metrics, positional_key};

const IDENTITY_KEYS: &[&str] = &[
    "DateKey", "dateKey", "date_key", "date", "Date", "day", "Day", "id", "key",
];
const PRIMARY_KEYS: &[&str] = &[
    "PrimaryColor", "primaryColor", "primary_color", "primary", "color", "Color", "color1", "c1",
];
const SECONDARY_KEYS: &[&str] = &[
    "SecondaryColor", "secondaryColor", "secondary_color", "secondary", "color2", "c2",
];
const SCORE_KEYS: &[&str] = &["DailyScore", "dailyScore", "daily_score", "score", "Score"];
const ENTRIES_KEYS: &[&str] = &[
    "Entries", "entries", "EntryCount", "entryCount", "entry_count", "count",
];
const LEVEL_KEYS: &[&str] = &["Level", "level", "lvl", "Lvl"];
const LABEL_KEYS: &[&str] = &["Label", "label", "Title", "title"];
const WEEK_KEYS: &[&str] = &["WeekKey", "weekKey", "week_key", "week"];

const ROW_COLLECTIONS: &[&str] = &["rows", "days", "data"];

/// Normalized records plus how many rows fell back to defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizeReport {
    /// One record per input row, in input order.
    pub records: Vec<DayRecord>,
    /// Rows that fell back to defaults entirely.
    pub degraded: usize,
}

/// Locate the row collection: a bare array, else the first of `rows`, `days`, `data` that is an
/// array.
pub fn resolve_rows(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(rows) => Some(rows),
        Value::Object(obj) => ROW_COLLECTIONS
            .iter()
            .find_map(|k| obj.get(*k).and_then(Value::as_array)),
        _ => None,
    }
}

/// Reject payloads that declare failure or carry no recognizable row collection.
pub fn validate_payload(raw: &Value) -> GardenResult<()> {
    if let Some(obj) = raw.as_object()
        && obj.get("ok") == Some(&Value::Bool(false))
    {
        let reason = obj
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("payload reported ok:false");
        return Err(GardenError::validation(reason.to_owned()));
    }
    if resolve_rows(raw).is_none() {
        return Err(GardenError::validation(
            "payload has no rows, days, or data array",
        ));
    }
    Ok(())
}

/// Normalize with the default theme colors.
pub fn normalize(raw: &Value) -> Vec<DayRecord> {
    normalize_with(raw, &Theme::default()).records
}

/// Coerce any JSON value into canonical day records. Never fails: each row slot yields exactly
/// one record, with defaults standing in for anything missing or malformed.
#[tracing::instrument(skip_all)]
pub fn normalize_with(raw: &Value, theme: &Theme) -> NormalizeReport {
    let Some(rows) = resolve_rows(raw) else {
        return NormalizeReport::default();
    };

    let mut report = NormalizeReport {
        records: Vec::with_capacity(rows.len()),
        degraded: 0,
    };
    for (index, row) in rows.iter().enumerate() {
        let (record, degraded) = match row.as_object() {
            Some(obj) => normalize_row(index, obj, theme),
            None => (
                DayRecord::placeholder(index, theme.primary, theme.secondary),
                true,
            ),
        };
        if degraded {
            tracing::warn!(index, "row degraded to defaults");
            report.degraded += 1;
        }
        report.records.push(record);
    }
    report
}

fn normalize_row(index: usize, row: &Map<String, Value>, theme: &Theme) -> (DayRecord, bool) {
    let mut degraded = false;

    let identity_key = first_present(row, IDENTITY_KEYS)
        .and_then(scalar_text)
        .unwrap_or_else(|| positional_key(index));

    let mut color = |keys: &[&str], fallback: HexColor| match first_present(row, keys) {
        None => fallback,
        Some(v) => match v.as_str().and_then(HexColor::parse) {
            Some(c) => c,
            None => {
                degraded = true;
                fallback
            }
        },
    };
    let primary_color = color(PRIMARY_KEYS, theme.primary);
    let secondary_color = color(SECONDARY_KEYS, theme.secondary);

    let mut number = |keys: &[&str]| match first_present(row, keys) {
        None => 0.0,
        Some(v) => match coerce_number(v) {
            Some(n) => n,
            None => {
                degraded = true;
                0.0
            }
        },
    };
    let metrics = Metrics {
        score: number(SCORE_KEYS),
        entries: number(ENTRIES_KEYS),
        level: number(LEVEL_KEYS),
    };

    let label = first_present(row, LABEL_KEYS)
        .and_then(scalar_text)
        .unwrap_or_default();
    let week_key = first_present(row, WEEK_KEYS).and_then(scalar_text);

    (
        DayRecord {
            identity_key,
            primary_color,
            secondary_color,
            metrics,
            label,
            week_key,
        },
        degraded,
    )
}

/// First alias whose value is present and non-empty (not null, not a blank string).
fn first_present<'a>(row: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| match row.get(*k) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    })
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
