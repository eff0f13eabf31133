// Copyright 2025 Cowboy AI, LLC.

//! Key schema descriptors derived from structural record metadata
//!
//! A record type declares, per field, an identifier, a role (partition key,
//! clustering key with position, or regular attribute) and a value kind. The
//! descriptor resolves column names through the naming configuration, orders
//! the composite key (partition fields in declared order, then clustering
//! fields by position), and validates the declaration once, at construction.
//! Mapping errors therefore surface when a repository is built, never on
//! first use.

use crate::errors::{StoreError, StoreResult};
use crate::naming::{Convention, NamingConfig};
use crate::value::ValueKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The declared role of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    /// Part of the partition key; ordered by declaration
    Partition,
    /// Part of the clustering key, at the given position
    Clustering {
        /// Zero-based position within the clustering key
        position: usize,
    },
    /// Plain attribute with no ordering constraint
    Regular,
}

/// Structural metadata for one record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field identifier as declared on the record type
    pub identifier: String,
    /// Declared role
    pub role: FieldRole,
    /// Declared value kind
    pub kind: ValueKind,
    /// Explicit column-name override, bypassing the naming translator
    pub column: Option<String>,
}

impl FieldDef {
    /// Declare a partition-key field
    pub fn partition(identifier: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            identifier: identifier.into(),
            role: FieldRole::Partition,
            kind,
            column: None,
        }
    }

    /// Declare a clustering-key field at a position
    pub fn clustering(identifier: impl Into<String>, position: usize, kind: ValueKind) -> Self {
        Self {
            identifier: identifier.into(),
            role: FieldRole::Clustering { position },
            kind,
            column: None,
        }
    }

    /// Declare a regular field
    pub fn regular(identifier: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            identifier: identifier.into(),
            role: FieldRole::Regular,
            kind,
            column: None,
        }
    }

    /// Set an explicit column-name override
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Structural metadata for a record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Record type name, used to derive the table name
    pub type_name: String,
    /// Explicit table-name override
    pub table: Option<String>,
    /// Field declarations, in declared order
    pub fields: Vec<FieldDef>,
}

impl RecordMetadata {
    /// Create metadata from a type name and field declarations
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            type_name: type_name.into(),
            table: None,
            fields,
        }
    }

    /// Set an explicit table-name override
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// A resolved field: identifier, column name and value kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field identifier as declared on the record type
    pub identifier: String,
    /// Resolved column name
    pub column: String,
    /// Declared value kind
    pub kind: ValueKind,
}

/// The key schema descriptor for one record type
///
/// Built once per record type and immutable afterwards. Field order is the
/// single order contract used everywhere: partition fields in declared order,
/// clustering fields by position, regular fields in declared order. This
/// matches the physical primary-key ordering the store enforces, so
/// positional key tuples have exactly one meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySchema {
    type_name: String,
    table: String,
    partition: Vec<FieldSpec>,
    clustering: Vec<FieldSpec>,
    regular: Vec<FieldSpec>,
}

impl KeySchema {
    /// Build and validate a descriptor from record metadata
    ///
    /// Fails with a schema error when no field is marked as partition key,
    /// when clustering positions collide or skip a value, or when two fields
    /// resolve to the same column name. Fails with a configuration error when
    /// the naming conventions cannot translate an identifier.
    pub fn describe(metadata: &RecordMetadata, naming: &NamingConfig) -> StoreResult<Self> {
        let table = match &metadata.table {
            Some(table) => table.clone(),
            // Type names are upper camel; translate into the column convention
            None => crate::naming::translate(
                &metadata.type_name,
                Convention::UPPER_CAMEL,
                naming.column_convention,
            )?,
        };

        let mut partition = Vec::new();
        let mut clustering: Vec<(usize, FieldSpec)> = Vec::new();
        let mut regular = Vec::new();
        let mut identifiers = HashSet::new();

        for def in &metadata.fields {
            if !identifiers.insert(def.identifier.clone()) {
                return Err(StoreError::schema(format!(
                    "{}: field {} declared twice",
                    metadata.type_name, def.identifier
                )));
            }

            let column = match &def.column {
                Some(column) => column.clone(),
                None => naming.column_name(&def.identifier)?,
            };
            let spec = FieldSpec {
                identifier: def.identifier.clone(),
                column,
                kind: def.kind,
            };

            match def.role {
                FieldRole::Partition => partition.push(spec),
                FieldRole::Clustering { position } => clustering.push((position, spec)),
                FieldRole::Regular => regular.push(spec),
            }
        }

        if partition.is_empty() {
            return Err(StoreError::schema(format!(
                "{}: no field is marked as partition key",
                metadata.type_name
            )));
        }

        clustering.sort_by_key(|(position, _)| *position);
        for (expected, (position, spec)) in clustering.iter().enumerate() {
            if *position != expected {
                return Err(StoreError::schema(format!(
                    "{}: clustering positions must be unique and contiguous from 0, \
                     found position {} at field {}",
                    metadata.type_name, position, spec.identifier
                )));
            }
        }
        let clustering: Vec<FieldSpec> = clustering.into_iter().map(|(_, spec)| spec).collect();

        let mut columns = HashSet::new();
        for spec in partition.iter().chain(&clustering).chain(&regular) {
            if !columns.insert(spec.column.clone()) {
                return Err(StoreError::schema(format!(
                    "{}: two fields resolve to column {}",
                    metadata.type_name, spec.column
                )));
            }
        }

        Ok(Self {
            type_name: metadata.type_name.clone(),
            table,
            partition,
            clustering,
            regular,
        })
    }

    /// Record type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Resolved table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Partition-key fields, in declared order
    pub fn partition_fields(&self) -> &[FieldSpec] {
        &self.partition
    }

    /// Clustering-key fields, in position order
    pub fn clustering_fields(&self) -> &[FieldSpec] {
        &self.clustering
    }

    /// Regular fields, in declared order
    pub fn regular_fields(&self) -> &[FieldSpec] {
        &self.regular
    }

    /// Composite-key fields: partition then clustering
    pub fn key_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.partition.iter().chain(&self.clustering)
    }

    /// Every field, in the fixed declared order
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.key_fields().chain(&self.regular)
    }

    /// Number of composite-key fields
    pub fn key_len(&self) -> usize {
        self.partition.len() + self.clustering.len()
    }

    /// Column names of the composite key, in order
    pub fn key_column_names(&self) -> Vec<String> {
        self.key_fields().map(|spec| spec.column.clone()).collect()
    }
}
