//! Response normalization for display.
//!
//! Three independent transforms applied in a fixed order:
//!
//! 1. [`unwrap_envelope`] reduces a `{ "headers": .., "data": .. }` wrapper
//!    to its payload.
//! 2. [`suppress_nulls`] drops every key whose value is `null`.
//! 3. [`render_epoch_dates`] turns integer values of keys containing `date`
//!    or `Date` into RFC 3339 timestamps.
//!
//! Every transform returns a new tree and is idempotent.

use chrono::{DateTime, SecondsFormat};
use serde_json::{Map, Value};

use crate::config::DisplayConfig;

/// Normalize a registry response according to display configuration.
///
/// In debugging mode the response is returned untouched.
pub fn normalize(response: &Value, config: &DisplayConfig) -> Value {
    if config.debugging {
        return response.clone();
    }

    let mut value = unwrap_envelope(response);
    if config.suppress_nulls {
        value = suppress_nulls(&value);
    }
    if config.render_dates_from_epoch {
        value = render_epoch_dates(&value);
    }
    value
}

/// Reduce a transport envelope to its `data` payload.
///
/// Only objects carrying both `headers` and `data` are unwrapped. Nested
/// envelopes are unwrapped until none is left.
pub fn unwrap_envelope(response: &Value) -> Value {
    let mut current = response;
    while let Value::Object(map) = current {
        match (map.contains_key("headers"), map.get("data")) {
            (true, Some(data)) => current = data,
            _ => break,
        }
    }
    current.clone()
}

/// Recursively omit keys whose value is `null`.
///
/// Arrays keep their length; `null` array elements are left in place.
pub fn suppress_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), suppress_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(suppress_nulls).collect()),
        other => other.clone(),
    }
}

/// Recursively render epoch-second integers under date-named keys.
///
/// Keys match when they contain `date` or `Date`. Non-integer values and
/// integers outside the representable range pass through unchanged.
pub fn render_epoch_dates(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut result = Map::new();
            for (key, child) in map {
                let rendered = if is_date_key(key) {
                    epoch_to_datetime(child).unwrap_or_else(|| render_epoch_dates(child))
                } else {
                    render_epoch_dates(child)
                };
                result.insert(key.clone(), rendered);
            }
            Value::Object(result)
        }
        Value::Array(items) => Value::Array(items.iter().map(render_epoch_dates).collect()),
        other => other.clone(),
    }
}

fn is_date_key(key: &str) -> bool {
    key.contains("date") || key.contains("Date")
}

fn epoch_to_datetime(value: &Value) -> Option<Value> {
    let seconds = value.as_i64()?;
    let datetime = DateTime::from_timestamp(seconds, 0)?;
    Some(Value::String(
        datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
    ))
}
