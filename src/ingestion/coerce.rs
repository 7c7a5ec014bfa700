//! Best-effort field coercion shared by both readers.
//!
//! Every function here turns a raw text token into an optional typed value and never fails:
//! absent or malformed input degrades to `None`. Structural problems are the readers' concern.

use chrono::NaiveDate;

use crate::types::Gender;

/// Trim `raw` and map nullity sentinels to `None`.
///
/// Empty text, `null` and `n/a` (any case, surrounding whitespace ignored) are treated as absent.
pub fn normalize_nullity(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("n/a")
    {
        None
    } else {
        Some(trimmed)
    }
}

/// [`normalize_nullity`] into an owned string.
pub fn parse_string(raw: &str) -> Option<String> {
    normalize_nullity(raw).map(str::to_owned)
}

/// Parse a strict ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = normalize_nullity(raw)?;
    if !is_iso_date_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// chrono accepts unpadded months/days; ISO-8601 local dates do not.
fn is_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// Parse a [`Gender`] tag, case-insensitively.
pub fn parse_gender(raw: &str) -> Option<Gender> {
    normalize_nullity(raw)?.to_ascii_uppercase().parse().ok()
}

/// Parse exactly `true` or `false` (any case). `1`, `0`, `yes`, ... yield `None`.
pub fn parse_boolean(raw: &str) -> Option<bool> {
    match normalize_nullity(raw)?.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse an integer from decimal text, truncating toward zero.
///
/// [`Employee`](crate::types::Employee) has no integer field; this is exposed for callers that
/// map additional numeric columns from the same rendered text.
///
/// Spreadsheet numeric cells render as `30.0`; this accepts that form and yields `30`.
/// Non-finite values yield `None`; out-of-range values saturate at the `i64` bounds.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = normalize_nullity(raw)?.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}
