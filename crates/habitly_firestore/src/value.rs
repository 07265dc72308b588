//! Firestore REST value mapping
//!
//! The Firestore REST API wraps every field in a typed envelope, e.g.
//! `{"stringValue": "09:00"}` or `{"integerValue": "3"}` (int64 travels as a
//! string per the proto3 JSON mapping). This module models that envelope and
//! provides the accessors the repositories use to read documents
//! defensively: a field of an unexpected type simply yields `None`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single Firestore field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "stringValue")]
    String(String),

    /// int64, transported as a decimal string.
    #[serde(rename = "integerValue")]
    Integer(String),

    #[serde(rename = "doubleValue")]
    Double(f64),

    #[serde(rename = "booleanValue")]
    Boolean(bool),

    /// RFC 3339 timestamp.
    #[serde(rename = "timestampValue")]
    Timestamp(String),

    #[serde(rename = "nullValue")]
    Null(Option<serde_json::Value>),

    #[serde(rename = "arrayValue")]
    Array(ArrayValue),

    #[serde(rename = "mapValue")]
    Map(MapValue),

    /// Any value kind this module does not model (`referenceValue`,
    /// `geoPointValue`, `bytesValue`, ...). Kept as raw JSON so one exotic
    /// field can never fail the decode of a whole query response; every
    /// typed accessor returns `None` for it.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Value>>,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn integer(i: i64) -> Self {
        Value::Integer(i.to_string())
    }

    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    pub fn timestamp(ts: impl Into<String>) -> Self {
        Value::Timestamp(ts.into())
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(ArrayValue {
            values: Some(values),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&str> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(s) => s.parse().ok(),
            Value::Double(d) => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => a.values.as_deref(),
            _ => None,
        }
    }
}

/// A Firestore document: its full resource name plus typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name, e.g.
    /// `projects/p/databases/(default)/documents/habits/abc123`.
    pub name: String,

    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// The trailing document id of the resource name.
    pub fn doc_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or("")
    }

    /// The `collection/id` suffix of the resource name, usable as a
    /// client-relative document path.
    pub fn relative_path(&self) -> String {
        let mut parts = self.name.rsplit('/');
        let id = parts.next().unwrap_or("");
        let collection = parts.next().unwrap_or("");
        format!("{}/{}", collection, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_value_round_trips() {
        let v = Value::string("09:00");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, json!({"stringValue": "09:00"}));
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back.as_str(), Some("09:00"));
    }

    #[test]
    fn integer_value_is_transported_as_string() {
        let v = Value::integer(3);
        assert_eq!(serde_json::to_value(&v).unwrap(), json!({"integerValue": "3"}));
        let back: Value = serde_json::from_value(json!({"integerValue": "42"})).unwrap();
        assert_eq!(back.as_i64(), Some(42));
    }

    #[test]
    fn array_value_nests_typed_elements() {
        let v = Value::array(vec![Value::integer(1), Value::integer(3)]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            json!({"arrayValue": {"values": [{"integerValue": "1"}, {"integerValue": "3"}]}})
        );
    }

    #[test]
    fn empty_array_value_deserializes() {
        let back: Value = serde_json::from_value(json!({"arrayValue": {}})).unwrap();
        assert_eq!(back.as_array(), None);
    }

    #[test]
    fn unmodeled_value_kinds_decode_as_unknown() {
        for raw in [
            json!({"geoPointValue": {"latitude": 37.5, "longitude": 127.0}}),
            json!({"referenceValue": "projects/p/databases/(default)/documents/habits/h1"}),
            json!({"bytesValue": "aGFiaXQ="}),
        ] {
            let v: Value = serde_json::from_value(raw.clone()).unwrap();
            assert!(matches!(v, Value::Unknown(_)), "{raw}");
            assert_eq!(v.as_str(), None);
            assert_eq!(v.as_i64(), None);
            assert_eq!(v.as_bool(), None);
            assert_eq!(v.as_array(), None);
        }
    }

    #[test]
    fn document_with_unmodeled_field_still_decodes() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/habits/h1",
            "fields": {
                "name": {"stringValue": "Stretch"},
                "location": {"geoPointValue": {"latitude": 37.5, "longitude": 127.0}}
            }
        }))
        .unwrap();

        assert_eq!(doc.fields.get("name").and_then(Value::as_str), Some("Stretch"));
        assert!(matches!(doc.fields.get("location"), Some(Value::Unknown(_))));
    }

    #[test]
    fn accessors_reject_mismatched_types() {
        let v = Value::boolean(true);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_bool(), Some(true));
    }

    #[test]
    fn document_paths() {
        let doc = Document {
            name: "projects/p/databases/(default)/documents/habits/abc123".to_string(),
            fields: HashMap::new(),
        };
        assert_eq!(doc.doc_id(), "abc123");
        assert_eq!(doc.relative_path(), "habits/abc123");
    }
}
