// Copyright 2025 Cowboy AI, LLC.

//! Bidirectional conversion between records and rows
//!
//! The mapper walks fields in one fixed declared order everywhere: partition
//! fields, clustering fields, then regular fields. Positional key-tuple APIs
//! therefore have a single order contract, matching the physical primary-key
//! ordering of the underlying table.

use crate::errors::{StoreError, StoreResult};
use crate::record::{FieldValues, StoreRecord};
use crate::schema::KeySchema;
use crate::statement::Clause;
use crate::value::{Row, Value};
use indexmap::IndexMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Converts instances of one record type to and from rows
///
/// Pure per call: encoding allocates a fresh row, decoding a fresh record.
/// Holds no mutable state, so one mapper serves concurrent callers.
#[derive(Debug, Clone)]
pub struct EntityMapper<T: StoreRecord> {
    schema: Arc<KeySchema>,
    _record: PhantomData<fn() -> T>,
}

fn normalize(column: &str) -> String {
    column.to_ascii_lowercase()
}

impl<T: StoreRecord> EntityMapper<T> {
    /// Create a mapper over a key schema
    pub fn new(schema: Arc<KeySchema>) -> Self {
        Self {
            schema,
            _record: PhantomData,
        }
    }

    /// The descriptor this mapper is driven by
    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    /// Encode a record into a row, key columns first
    ///
    /// Never omits a key column: a null or missing partition- or
    /// clustering-key field fails with a validation error, since the
    /// composite key must be fully specified for both reads and writes.
    pub fn encode(&self, record: &T) -> StoreResult<Row> {
        let mut row = Row::with_capacity(self.schema.key_len() + self.schema.regular_fields().len());
        let key_len = self.schema.key_len();

        for (index, spec) in self.schema.all_fields().enumerate() {
            let value = record.field_value(&spec.identifier).ok_or_else(|| {
                StoreError::validation(format!(
                    "{}: record exposes no field {}",
                    self.schema.type_name(),
                    spec.identifier
                ))
            })?;

            let is_key = index < key_len;
            if is_key && value.is_null() {
                return Err(StoreError::validation(format!(
                    "{}: key field {} must not be null",
                    self.schema.type_name(),
                    spec.identifier
                )));
            }
            if !value.conforms_to(spec.kind) {
                return Err(StoreError::validation(format!(
                    "{}: field {} expects {:?}, got {}",
                    self.schema.type_name(),
                    spec.identifier,
                    spec.kind,
                    value.type_name()
                )));
            }

            row.insert(spec.column.clone(), value);
        }

        Ok(row)
    }

    /// Decode a row into a new record instance
    ///
    /// A column present in the descriptor but absent from the row fails with
    /// a decoding error, signaling schema/table drift. Columns in the row
    /// with no descriptor counterpart are ignored, keeping decoding
    /// forward-compatible with wider tables. Column lookup is
    /// case-normalized.
    pub fn decode(&self, row: &Row) -> StoreResult<T> {
        let lookup: IndexMap<String, &Value> = row
            .iter()
            .map(|(column, value)| (normalize(column), value))
            .collect();

        let mut values = IndexMap::new();
        for spec in self.schema.all_fields() {
            let value = lookup.get(&normalize(&spec.column)).ok_or_else(|| {
                StoreError::decoding(format!(
                    "{}: column {} missing from row",
                    self.schema.type_name(),
                    spec.column
                ))
            })?;
            if !value.conforms_to(spec.kind) {
                return Err(StoreError::decoding(format!(
                    "{}: column {} expects {:?}, got {}",
                    self.schema.type_name(),
                    spec.column,
                    spec.kind,
                    value.type_name()
                )));
            }
            values.insert(spec.identifier.clone(), (*value).clone());
        }

        T::from_fields(&FieldValues::new(values))
    }

    /// Encode a positional key tuple into ordered (column, value) clauses
    ///
    /// Point operations require the entire composite key, not a partial
    /// prefix: the number of supplied values must equal the partition arity
    /// plus the clustering arity.
    pub fn encode_key_tuple(&self, values: &[Value]) -> StoreResult<Vec<Clause>> {
        if values.len() != self.schema.key_len() {
            return Err(StoreError::validation(format!(
                "{}: expected {} key values, got {}",
                self.schema.type_name(),
                self.schema.key_len(),
                values.len()
            )));
        }

        let mut clauses = Vec::with_capacity(values.len());
        for (spec, value) in self.schema.key_fields().zip(values) {
            if value.is_null() {
                return Err(StoreError::validation(format!(
                    "{}: key field {} must not be null",
                    self.schema.type_name(),
                    spec.identifier
                )));
            }
            if !value.conforms_to(spec.kind) {
                return Err(StoreError::validation(format!(
                    "{}: key field {} expects {:?}, got {}",
                    self.schema.type_name(),
                    spec.identifier,
                    spec.kind,
                    value.type_name()
                )));
            }
            clauses.push(Clause::new(spec.column.clone(), value.clone()));
        }

        Ok(clauses)
    }
}
