//! # Dockhand
//!
//! Typed query client for pluggable wide-column storage connectors.
//!
//! Dockhand sits between application code and a storage backend: callers
//! express queries as field-level [`Predicate`]s, the client validates that
//! the operators are legal for the access pattern (point read vs. range
//! scan), compiles them into connector-level column keys and conditions,
//! executes against a [`Connector`], and maps result rows back from storage
//! column names to entity field names.
//!
//! See [README on GitHub](https://github.com/microscaler/dockhand) for full architecture.

pub mod client;
pub mod config;
pub mod connector;
pub mod context;
pub mod error;
pub mod predicate;
pub mod query;
pub mod schema;

pub use client::{FieldRow, QueryClient};
pub use config::ClientConfig;
pub use connector::{Connector, ConnectorError, DevNullConnector, Row};
pub use context::{CallContext, CancelHandle};
pub use error::QueryError;
pub use predicate::{Operator, Predicate};
pub use query::{build_range_op, build_read_args, rows_to_fields, Condition, RangeOp};
pub use schema::{registry::Registrar, ColumnType, EntityDef, FieldDef, KeyRole, SchemaError};
