//! Tolerant deserializers for records coming from the remote API.
//!
//! Upstream data can be partially malformed: amounts stored as strings or
//! missing, months written as full timestamps, foreign keys populated as
//! nested objects, text fields sent as `null` or numbers, documents carrying
//! both `_id` and `id`. None of that may abort a fetch. Unparsable amounts
//! read as zero and unparsable months/dates read as `None`, which excludes the
//! record from month-keyed aggregation.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::month::MonthKey;

fn parse_decimal_value(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Reads a JSON value as text, trimming surrounding whitespace.
fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Amount fields: numbers, numeric strings, `null` or garbage (as zero).
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::Number(n) => parse_decimal_value(&n.to_string()),
        Value::String(s) => parse_decimal_value(s),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        if !raw.is_null() {
            debug!("Treating unparsable amount {} as zero", raw);
        }
        Decimal::ZERO
    }))
}

/// Month fields: `YYYY-MM`, ISO dates or timestamps; anything else is `None`.
pub fn deserialize_month<'de, D>(deserializer: D) -> Result<Option<MonthKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => match s.parse::<MonthKey>() {
            Ok(month) => Some(month),
            Err(_) => {
                debug!("Skipping unparsable month '{}'", s);
                None
            }
        },
        _ => None,
    })
}

/// Date fields: `YYYY-MM-DD` optionally followed by a time part.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let head = trimmed.get(..10)?;
    match NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            debug!("Skipping unparsable date '{}'", value);
            None
        }
    }
}

/// Timestamp fields: RFC 3339, or a bare date taken as midnight UTC.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                parse_date(&s)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }),
        _ => None,
    })
}

/// Foreign keys: a string, a number, or a populated object carrying `_id`/`id`.
pub fn deserialize_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Object(mut map) => map
            .remove("_id")
            .or_else(|| map.remove("id"))
            .and_then(value_as_text),
        other => value_as_text(other),
    })
}

/// Optional free text: `null`, blanks and non-scalars are `None`, numbers
/// (phone numbers) become their digits.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?))
}

/// Required labels (names, categories): like [`deserialize_text`] but empty
/// instead of `None`.
pub fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Reads a whole record and settles its id before field mapping.
///
/// Documents may carry `_id`, `id` or both (virtual ids). `_id` wins when it
/// holds a usable value; numeric ids are read as text.
pub fn record_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let mut raw = Value::deserialize(deserializer)?;
    if let Value::Object(map) = &mut raw {
        let primary = map.remove("_id").and_then(value_as_text);
        let fallback = map.remove("id").and_then(value_as_text);
        if let Some(id) = primary.or(fallback) {
            map.insert("id".to_string(), Value::String(id));
        }
    }
    Ok(raw)
}

/// Implements `Serialize`/`Deserialize` for a record deriving them with
/// `#[serde(remote = "Self")]`, reading ids through [`record_value`].
macro_rules! lenient_record {
    ($record:ty) => {
        impl serde::Serialize for $record {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                <$record>::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $record {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = $crate::utils::input_format::record_value(deserializer)?;
                <$record>::deserialize(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use lenient_record;
