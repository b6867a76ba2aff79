//! Lenient field parsing for snapshots coming from hand-written JSON/YAML.
//!
//! Numeric fields accept numbers, numeric strings and strings with a leading
//! integer ("12 frames"). Anything else becomes `None` and the owning model
//! substitutes its named default.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Types that can be parsed from a free-form category label.
pub trait Categorical: Sized {
    fn parse_label(s: &str) -> Option<Self>;
}

/// Lowercase a label and strip separators so "Not Present", "not-present"
/// and "NotPresent" compare equal.
pub fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' ', '_'], "")
}

/// Parse the leading integer of a string: optional sign followed by digits.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

pub fn float_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Dates arrive as `YYYY-MM-DD`, RFC 3339 timestamps, naive timestamps, or
/// epoch milliseconds.
pub fn date_from_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Treat empty or whitespace-only text as absent.
pub fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value))
}

pub fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(float_from_value(&value))
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(date_from_value(&value))
}

pub fn lenient_category<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Categorical,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => {
            let parsed = T::parse_label(&s);
            if parsed.is_none() {
                tracing::debug!(label = %s, "Unrecognized category label, ignoring");
            }
            parsed
        }
        _ => None,
    })
}

/// A list of labels; a bare string is accepted as a one-element list and
/// non-string entries are dropped.
pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Text field that tolerates null and scalars; anything else reads as empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(&value).unwrap_or_default())
}

pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(&value))
}

fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A list of records; null or a non-array reads as empty and entries that
/// fail to parse are dropped.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| tracing::debug!(error = %e, "Skipping unreadable list entry"))
                    .ok()
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_int_leading_digits() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  7 frames"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int("9.75"), Some(9));
    }

    #[test]
    fn parse_int_rejects_non_numeric() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("strong"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("x12"), None);
    }

    #[test]
    fn int_from_value_variants() {
        assert_eq!(int_from_value(&json!(12)), Some(12));
        assert_eq!(int_from_value(&json!(7.9)), Some(7));
        assert_eq!(int_from_value(&json!("15000")), Some(15000));
        assert_eq!(int_from_value(&json!(null)), None);
        assert_eq!(int_from_value(&json!(true)), None);
        assert_eq!(int_from_value(&json!([1])), None);
    }

    #[test]
    fn float_from_value_variants() {
        assert_eq!(float_from_value(&json!(17.5)), Some(17.5));
        assert_eq!(float_from_value(&json!(" 19 ")), Some(19.0));
        assert_eq!(float_from_value(&json!("wet")), None);
        assert_eq!(float_from_value(&json!(null)), None);
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date("2024-03-15"), expected);
        assert_eq!(parse_date("2024-03-15T10:30:00Z"), expected);
        assert_eq!(parse_date("2024-03-15T10:30:00.000"), expected);
        assert_eq!(parse_date("March 15"), None);
        assert_eq!(date_from_value(&json!(1710460800000_i64)), expected);
        assert_eq!(date_from_value(&json!(false)), None);
    }

    #[test]
    fn normalize_label_strips_separators() {
        assert_eq!(normalize_label("Not Present"), "notpresent");
        assert_eq!(normalize_label("not-present"), "notpresent");
        assert_eq!(normalize_label(" Royal_Jelly "), "royaljelly");
    }

    #[test]
    fn non_empty_filters_blank_text() {
        assert_eq!(non_empty(&Some("Sierra Valley".into())), Some("Sierra Valley"));
        assert_eq!(non_empty(&Some("   ".into())), None);
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn lenient_string_tolerates_null_and_scalars() {
        assert_eq!(string_from_value(&json!("Apiary 3")), Some("Apiary 3".into()));
        assert_eq!(string_from_value(&json!(42)), Some("42".into()));
        assert_eq!(string_from_value(&json!(null)), None);
        assert_eq!(string_from_value(&json!({"a": 1})), None);
    }
}
