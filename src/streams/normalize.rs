//! Per-record field normalization for the QA stream

use crate::types::{lookup_path, JsonValue, Record};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Normalize a QA record in place
pub fn normalize_qa_record(record: &mut Record) {
    normalize_score(record);
    normalize_archived_at(record);
}

/// Turn a percentage string score (`"85%"`) into a fraction (`0.85`).
///
/// Missing, null and empty scores are left alone, as are scores that are
/// already numbers.
pub fn normalize_score(record: &mut Record) {
    let Some(score) = record.get_mut("score") else {
        return;
    };
    let fraction = match &*score {
        JsonValue::String(raw) if !raw.is_empty() => match parse_percentage(raw) {
            Some(fraction) => fraction,
            None => {
                warn!(score = %raw, "QA score is not a percentage, leaving it as is");
                return;
            }
        },
        _ => return,
    };
    *score = JsonValue::Number(fraction);
}

fn parse_percentage(raw: &str) -> Option<serde_json::Number> {
    let percent: f64 = raw.trim().trim_matches('%').trim().parse().ok()?;
    serde_json::Number::from_f64(percent / 100.0)
}

/// Collapse a rich `scorecard.archived_at` object into an RFC 3339 string.
///
/// The upstream system sometimes serializes its timestamp object instead of
/// a string. The epoch seconds live at `scorecard.archived_at.utc.^t`; when
/// they are missing the field becomes null.
pub fn normalize_archived_at(record: &mut Record) {
    if !matches!(
        lookup_path(record, "scorecard.archived_at"),
        Some(JsonValue::Object(_))
    ) {
        return;
    }

    let converted = lookup_path(record, "scorecard.archived_at.utc.^t")
        .and_then(epoch_to_rfc3339)
        .map_or(JsonValue::Null, JsonValue::String);
    debug!(archived_at = %converted, "Collapsed scorecard.archived_at object");

    if let Some(scorecard) = record.get_mut("scorecard").and_then(JsonValue::as_object_mut) {
        scorecard.insert("archived_at".to_string(), converted);
    }
}

fn epoch_to_rfc3339(value: &JsonValue) -> Option<String> {
    let timestamp = match value {
        JsonValue::Number(n) => match n.as_i64() {
            Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0),
            None => from_fractional_secs(n.as_f64()?),
        },
        JsonValue::String(s) => from_fractional_secs(s.trim().parse().ok()?),
        _ => None,
    }?;
    Some(timestamp.to_rfc3339())
}

fn from_fractional_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos)
}
