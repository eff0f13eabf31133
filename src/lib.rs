// Copyright 2025 Cowboy AI, LLC.

//! # widerow
//!
//! Typed key-model mapping and repositories for partitioned wide-column
//! stores (the Cassandra-like data model).
//!
//! This crate provides the mapping and repository layer between application
//! record types and tables addressed by a composite key:
//! - **Naming**: pure, invertible translation between field-identifier and
//!   column-name conventions
//! - **Key Schema**: a per-record-type descriptor of partition, clustering
//!   and regular fields, validated once at construction
//! - **Mapper**: bidirectional record↔row conversion driven by the
//!   descriptor, with one fixed declared field order everywhere
//! - **Statements**: logical statement descriptions (scan, equality select,
//!   upsert, point delete), rendered to transport form by the executor
//! - **Repository**: generic CRUD over an injected executor collaborator
//!
//! ## Design Principles
//!
//! 1. **Declared, not discovered**: schemas are explicit plain data, no
//!    runtime reflection or attribute scanning
//! 2. **One order contract**: partition fields, then clustering fields, then
//!    regular fields, matching the physical primary-key layout
//! 3. **Fail fast**: configuration and schema mistakes surface when a
//!    repository is built, never on first use
//! 4. **Upsert semantics**: saves rely on the store's replace-on-equal-key
//!    row identity; there is no separate update path
//! 5. **Absence is not an error**: point reads of missing keys return
//!    `None`, deletes of missing keys are no-ops
//! 6. **Transport stays outside**: connections, retries and wire encoding
//!    belong to the executor collaborator, which failures pass through
//!    unchanged

#![warn(missing_docs)]

mod errors;
mod executor;
mod instrumented;
mod mapper;
mod memory;
mod metrics;
mod naming;
mod record;
mod repository;
mod schema;
mod statement;
mod value;

// Re-export core types
pub use errors::{StoreError, StoreResult};
pub use executor::{script_statements, StatementExecutor};
pub use instrumented::InstrumentedRepository;
pub use mapper::EntityMapper;
pub use memory::MemoryExecutor;
pub use metrics::{DurationStats, MetricsSummary, MetricsTimer, RepositoryMetrics};
pub use naming::{translate, Convention, NamingConfig, SegmentCase};
pub use record::{FieldValues, StoreRecord};
pub use repository::{
    Repository, RepositoryConfig, TableRepository, TableRepositoryBuilder,
};
pub use schema::{FieldDef, FieldRole, FieldSpec, KeySchema, RecordMetadata};
pub use statement::{Clause, Statement, StatementBuilder};
pub use value::{Row, Value, ValueKind};
