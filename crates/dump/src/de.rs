//! Lenient field deserializers.
//!
//! The dumps are produced by PHP: numbers regularly arrive as strings, absent
//! values as `""` or `null`, and empty objects as `[]`. Each helper accepts
//! those shapes and canonicalises them, but still rejects values that cannot
//! mean what the field says (a non-numeric id is an error, not a zero).

use crate::models::{Id, Platform, PlatformBody};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A required numeric identifier.
pub(crate) fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Id, D::Error> {
    let value = Value::deserialize(deserializer)?;
    as_u32(&value).ok_or_else(|| D::Error::custom(format!("invalid id: {value}")))
}

/// An optional numeric identifier; `0` is how the dumps spell "none".
pub(crate) fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Id>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(None);
    }
    match as_u32(&value) {
        Some(0) => Ok(None),
        Some(id) => Ok(Some(id)),
        None => Err(D::Error::custom(format!("invalid id: {value}"))),
    }
}

/// A counter, defaulting to zero when absent.
pub(crate) fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(opt_number(deserializer)?.unwrap_or(0))
}

pub(crate) fn opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(None);
    }
    as_u32(&value).map(Some).ok_or_else(|| D::Error::custom(format!("invalid number: {value}")))
}

pub(crate) fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match &value {
        v if is_absent(v) => Ok(0.0),
        Value::Number(n) => n.as_f64().ok_or_else(|| D::Error::custom(format!("invalid number: {value}"))),
        Value::String(s) => s.trim().parse().map_err(|_| D::Error::custom(format!("invalid number: {value}"))),
        _ => Err(D::Error::custom(format!("invalid number: {value}"))),
    }
}

pub(crate) fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        v if is_absent(&v) => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected text, found: {other}"))),
    }
}

/// An optional nested value; `null`, `""` and `false` all mean "no value".
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) || value == Value::Bool(false) {
        return Ok(None);
    }
    T::deserialize(value).map(Some).map_err(D::Error::custom)
}

/// A reference to another entity, either embedded as an object carrying an
/// `id` or given as the bare id.
pub(crate) fn reference<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Id>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    reference_of(&value).map_err(D::Error::custom)
}

/// A list of references, see [`reference`].
pub(crate) fn references<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Id>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        v if is_absent(&v) => Ok(Vec::new()),
        Value::Array(items) => {
            let ids = items.iter().map(reference_of).collect::<Result<Vec<_>, _>>().map_err(D::Error::custom)?;
            Ok(ids.into_iter().flatten().collect())
        },
        other => Err(D::Error::custom(format!("expected a list of references, found: {other}"))),
    }
}

fn reference_of(value: &Value) -> Result<Option<Id>, String> {
    let id = match value {
        v if is_absent(v) => return Ok(None),
        Value::Object(map) => match map.get("id") {
            Some(id) if !is_absent(id) => id,
            _ => return Ok(None),
        },
        scalar => scalar,
    };
    match as_u32(id) {
        Some(0) => Ok(None),
        Some(id) => Ok(Some(id)),
        None => Err(format!("invalid reference: {value}")),
    }
}

/// Platforms embedded as `{ "<id>": { name, icon, slug } }`, or `[]` when empty.
pub(crate) fn platforms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Platform>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        v if is_absent(&v) => Ok(Vec::new()),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, body)| -> Result<Platform, D::Error> {
                let id = key.trim().parse::<Id>().map_err(|_| D::Error::custom(format!("invalid platform id: {key}")))?;
                let body = PlatformBody::deserialize(body).map_err(D::Error::custom)?;
                Ok(body.with_id(id))
            })
            .collect(),
        Value::Array(items) => items.into_iter().map(|item| Platform::deserialize(item).map_err(D::Error::custom)).collect(),
        other => Err(D::Error::custom(format!("expected platforms, found: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_id")]
        opt_id: Option<Id>,
        #[serde(default, deserialize_with = "count")]
        count: u32,
        #[serde(default, deserialize_with = "float")]
        float: f64,
        #[serde(default, deserialize_with = "reference")]
        reference: Option<Id>,
    }

    #[rstest]
    #[case(json!({"opt_id": "12"}), Some(12))]
    #[case(json!({"opt_id": 12}), Some(12))]
    #[case(json!({"opt_id": "0"}), None)]
    #[case(json!({"opt_id": ""}), None)]
    #[case(json!({"opt_id": null}), None)]
    #[case(json!({}), None)]
    fn test_opt_id(#[case] input: Value, #[case] expected: Option<Id>) {
        let probe: Probe = serde_json::from_value(input).unwrap();
        assert_eq!(probe.opt_id, expected);
    }

    #[test]
    fn test_opt_id_rejects_garbage() {
        assert!(serde_json::from_value::<Probe>(json!({"opt_id": "twelve"})).is_err());
    }

    #[rstest]
    #[case(json!({"count": "81"}), 81)]
    #[case(json!({"count": 18}), 18)]
    #[case(json!({"count": null}), 0)]
    fn test_count(#[case] input: Value, #[case] expected: u32) {
        let probe: Probe = serde_json::from_value(input).unwrap();
        assert_eq!(probe.count, expected);
    }

    #[rstest]
    #[case(json!({"float": "0.73"}), 0.73)]
    #[case(json!({"float": 0.5}), 0.5)]
    #[case(json!({"float": ""}), 0.0)]
    fn test_float(#[case] input: Value, #[case] expected: f64) {
        let probe: Probe = serde_json::from_value(input).unwrap();
        assert_eq!(probe.float, expected);
    }

    #[rstest]
    #[case(json!({"reference": {"id": "7", "name": "Assembly"}}), Some(7))]
    #[case(json!({"reference": "7"}), Some(7))]
    #[case(json!({"reference": {"name": "no id"}}), None)]
    #[case(json!({"reference": null}), None)]
    fn test_reference(#[case] input: Value, #[case] expected: Option<Id>) {
        let probe: Probe = serde_json::from_value(input).unwrap();
        assert_eq!(probe.reference, expected);
    }
}
