//! Lenient field decoders for backend payloads.
//!
//! The WMS API is not consistent about scalar types: ids and quantities
//! arrive as JSON numbers on some endpoints and as strings on others.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string, number, bool or null and yields its text form.
pub fn string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Accepts a number or a numeric string. Null and empty strings become `0.0`.
pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => Ok(n.as_f64().unwrap_or_default()),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a number: {}", s))),
        Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "expected number, found {}",
            other
        ))),
    }
}

/// Accepts a non-negative integer or integer string.
pub fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| serde::de::Error::custom(format!("not an unsigned integer: {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("not an unsigned integer: {}", s))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "expected unsigned integer, found {}",
            other
        ))),
    }
}

/// Accepts `true/false`, `1/0`, `"Y"/"N"` and their string forms. Null is false.
pub fn bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "y" | "yes" | "active" => Ok(true),
            "false" | "0" | "n" | "no" | "inactive" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("not a boolean: {}", other))),
        },
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected boolean, found {}",
            other
        ))),
    }
}

pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_lenient")]
        id: String,
        #[serde(deserialize_with = "f64_lenient")]
        qty: f64,
        #[serde(deserialize_with = "u64_lenient")]
        serial: u64,
    }

    #[test]
    fn numbers_and_strings_are_both_accepted() {
        let a: Row = serde_json::from_str(r#"{"id": 7, "qty": "12.5", "serial": "100"}"#).unwrap();
        assert_eq!(a.id, "7");
        assert_eq!(a.qty, 12.5);
        assert_eq!(a.serial, 100);

        let b: Row = serde_json::from_str(r#"{"id": "C01", "qty": 3, "serial": 9}"#).unwrap();
        assert_eq!(b.id, "C01");
        assert_eq!(b.qty, 3.0);
        assert_eq!(b.serial, 9);
    }

    #[test]
    fn null_becomes_empty_or_zero() {
        let r: Row = serde_json::from_str(r#"{"id": null, "qty": null, "serial": null}"#).unwrap();
        assert_eq!(r.id, "");
        assert_eq!(r.qty, 0.0);
        assert_eq!(r.serial, 0);
    }

    #[test]
    fn flags_accept_backend_variants() {
        #[derive(Deserialize)]
        struct Flag {
            #[serde(deserialize_with = "bool_lenient")]
            active: bool,
        }
        for (raw, expected) in [("true", true), ("1", true), ("\"Y\"", true), ("0", false), ("\"N\"", false), ("null", false)] {
            let f: Flag = serde_json::from_str(&format!(r#"{{"active": {}}}"#, raw)).unwrap();
            assert_eq!(f.active, expected, "{}", raw);
        }
    }

    #[test]
    fn garbage_quantity_is_rejected() {
        let r = serde_json::from_str::<Row>(r#"{"id": 1, "qty": "abc", "serial": 1}"#);
        assert!(r.is_err());
    }
}
