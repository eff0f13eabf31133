// Copyright 2025 Cowboy AI, LLC.

//! Typed column values and rows
//!
//! A row is an ordered mapping from column name to a typed value, as produced
//! and consumed by the executor collaborator. Values carry the small set of
//! wide-column kinds this core maps; executor collaborators translate them to
//! their own wire representation.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The declared kind of a column value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// UTF-8 text
    Text,
    /// Boolean
    Boolean,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    BigInt,
    /// 64-bit float
    Double,
    /// UUID
    Uuid,
    /// Timestamp with UTC offset
    Timestamp,
    /// Opaque bytes
    Blob,
}

/// A typed column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,
    /// UTF-8 text
    Text(String),
    /// Boolean
    Boolean(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    BigInt(i64),
    /// 64-bit float
    Double(f64),
    /// UUID
    Uuid(Uuid),
    /// Timestamp with UTC offset
    Timestamp(DateTime<Utc>),
    /// Opaque bytes
    Blob(Vec<u8>),
}

impl Value {
    /// The kind of this value, or `None` for null
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(ValueKind::Text),
            Value::Boolean(_) => Some(ValueKind::Boolean),
            Value::Int(_) => Some(ValueKind::Int),
            Value::BigInt(_) => Some(ValueKind::BigInt),
            Value::Double(_) => Some(ValueKind::Double),
            Value::Uuid(_) => Some(ValueKind::Uuid),
            Value::Timestamp(_) => Some(ValueKind::Timestamp),
            Value::Blob(_) => Some(ValueKind::Blob),
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of this value's kind, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Double(_) => "double",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
            Value::Blob(_) => "blob",
        }
    }

    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Check whether this value conforms to a declared kind
    ///
    /// Null conforms to every kind; nullability of key columns is enforced by
    /// the mapper, not here.
    pub fn conforms_to(&self, kind: ValueKind) -> bool {
        match self.kind() {
            None => true,
            Some(actual) => actual == kind,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// An ordered mapping from column name to value
///
/// Insertion order is preserved, so rows encoded by the mapper list key
/// columns first, in declared order.
pub type Row = IndexMap<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_type_name() {
        assert_eq!(Value::text("UK").kind(), Some(ValueKind::Text));
        assert_eq!(Value::Null.kind(), None);
        assert_eq!(Value::Int(50).type_name(), "int");
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn test_conforms_to() {
        assert!(Value::text("Bob").conforms_to(ValueKind::Text));
        assert!(!Value::text("Bob").conforms_to(ValueKind::Int));
        // Null conforms to every kind; the mapper decides where null is legal
        assert!(Value::Null.conforms_to(ValueKind::Uuid));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from("UK"), Value::Text("UK".to_string()));
        assert_eq!(Value::from(50i32), Value::Int(50));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(50i32)), Value::Int(50));

        let id = Uuid::new_v4();
        assert_eq!(Value::from(id), Value::Uuid(id));
    }

    #[test]
    fn test_row_preserves_insertion_order() {
        let mut row = Row::new();
        row.insert("country".to_string(), Value::text("UK"));
        row.insert("first_name".to_string(), Value::text("Bob"));
        row.insert("age".to_string(), Value::Int(50));

        let columns: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(columns, vec!["country", "first_name", "age"]);
    }

    #[test]
    fn test_value_serde_round_trip() {
        let values = vec![
            Value::Null,
            Value::text("Bob"),
            Value::Boolean(true),
            Value::Int(7),
            Value::BigInt(7_000_000_000),
            Value::Double(2.5),
            Value::Uuid(Uuid::new_v4()),
            Value::Timestamp(Utc::now()),
            Value::Blob(vec![1, 2, 3]),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }
}
