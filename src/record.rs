// Copyright 2025 Cowboy AI, LLC.

//! The record-type seam consumed by the mapper
//!
//! Records stay free of any mapping awareness: instead of runtime
//! reflection, each record type supplies its structural metadata, a
//! statically declared field-accessor table for encoding, and a builder for
//! decoding. The mapper drives all three through the key schema descriptor.

use crate::errors::{StoreError, StoreResult};
use crate::schema::RecordMetadata;
use crate::value::Value;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

/// A record type mappable onto a wide-column table
pub trait StoreRecord: Sized + Send + Sync + 'static {
    /// Structural metadata: field identifiers, roles, kinds, overrides
    fn metadata() -> RecordMetadata;

    /// Read one field by identifier; `None` for an unknown identifier
    ///
    /// Nullable attributes report `Some(Value::Null)` when absent; `None` is
    /// reserved for identifiers the record does not declare.
    fn field_value(&self, identifier: &str) -> Option<Value>;

    /// Build a new instance from decoded field values
    fn from_fields(fields: &FieldValues) -> StoreResult<Self>;
}

/// Decoded field values keyed by field identifier
///
/// Handed to [`StoreRecord::from_fields`] by the mapper. The typed getters
/// turn kind mismatches and absent fields into decoding errors, so record
/// builders stay declarative.
#[derive(Debug, Clone)]
pub struct FieldValues {
    values: IndexMap<String, Value>,
}

impl FieldValues {
    /// Create from an identifier-keyed value map
    pub fn new(values: IndexMap<String, Value>) -> Self {
        Self { values }
    }

    /// Raw access to a field value
    pub fn raw(&self, identifier: &str) -> Option<&Value> {
        self.values.get(identifier)
    }

    fn fetch(&self, identifier: &str) -> StoreResult<&Value> {
        self.values.get(identifier).ok_or_else(|| {
            StoreError::decoding(format!("no value decoded for field {identifier}"))
        })
    }

    fn mismatch(identifier: &str, expected: &str, value: &Value) -> StoreError {
        StoreError::decoding(format!(
            "field {identifier}: expected {expected}, found {}",
            value.type_name()
        ))
    }

    /// Text field value
    pub fn text(&self, identifier: &str) -> StoreResult<String> {
        match self.fetch(identifier)? {
            Value::Text(v) => Ok(v.clone()),
            other => Err(Self::mismatch(identifier, "text", other)),
        }
    }

    /// Optional text field value; null becomes `None`
    pub fn opt_text(&self, identifier: &str) -> StoreResult<Option<String>> {
        match self.fetch(identifier)? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v.clone())),
            other => Err(Self::mismatch(identifier, "text", other)),
        }
    }

    /// Boolean field value
    pub fn boolean(&self, identifier: &str) -> StoreResult<bool> {
        match self.fetch(identifier)? {
            Value::Boolean(v) => Ok(*v),
            other => Err(Self::mismatch(identifier, "boolean", other)),
        }
    }

    /// 32-bit integer field value
    pub fn int(&self, identifier: &str) -> StoreResult<i32> {
        match self.fetch(identifier)? {
            Value::Int(v) => Ok(*v),
            other => Err(Self::mismatch(identifier, "int", other)),
        }
    }

    /// Optional 32-bit integer field value; null becomes `None`
    pub fn opt_int(&self, identifier: &str) -> StoreResult<Option<i32>> {
        match self.fetch(identifier)? {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(*v)),
            other => Err(Self::mismatch(identifier, "int", other)),
        }
    }

    /// 64-bit integer field value
    pub fn big_int(&self, identifier: &str) -> StoreResult<i64> {
        match self.fetch(identifier)? {
            Value::BigInt(v) => Ok(*v),
            other => Err(Self::mismatch(identifier, "bigint", other)),
        }
    }

    /// 64-bit float field value
    pub fn double(&self, identifier: &str) -> StoreResult<f64> {
        match self.fetch(identifier)? {
            Value::Double(v) => Ok(*v),
            other => Err(Self::mismatch(identifier, "double", other)),
        }
    }

    /// UUID field value
    pub fn uuid(&self, identifier: &str) -> StoreResult<Uuid> {
        match self.fetch(identifier)? {
            Value::Uuid(v) => Ok(*v),
            other => Err(Self::mismatch(identifier, "uuid", other)),
        }
    }

    /// Timestamp field value
    pub fn timestamp(&self, identifier: &str) -> StoreResult<DateTime<Utc>> {
        match self.fetch(identifier)? {
            Value::Timestamp(v) => Ok(*v),
            other => Err(Self::mismatch(identifier, "timestamp", other)),
        }
    }

    /// Optional timestamp field value; null becomes `None`
    pub fn opt_timestamp(&self, identifier: &str) -> StoreResult<Option<DateTime<Utc>>> {
        match self.fetch(identifier)? {
            Value::Null => Ok(None),
            Value::Timestamp(v) => Ok(Some(*v)),
            other => Err(Self::mismatch(identifier, "timestamp", other)),
        }
    }

    /// Blob field value
    pub fn blob(&self, identifier: &str) -> StoreResult<Vec<u8>> {
        match self.fetch(identifier)? {
            Value::Blob(v) => Ok(v.clone()),
            other => Err(Self::mismatch(identifier, "blob", other)),
        }
    }
}
