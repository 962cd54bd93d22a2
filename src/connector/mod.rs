//! Storage connector abstraction.
//!
//! Provides the [`Connector`] trait that the query client executes against.
//!
//! This trait is the seam between the translation layer and any concrete
//! backend: a null backend for wiring tests, a recording fake in test
//! suites, or a real store. Implementations own the wire protocol; the
//! client owns nothing below predicate translation.

pub mod devnull;

#[doc(inline)]
pub use devnull::DevNullConnector;

use crate::context::CallContext;
use crate::query::RangeOp;
use crate::schema::EntityDef;
use sea_query::Value;
use std::collections::HashMap;
use std::fmt;

/// A single storage row, keyed by column name on the connector side.
pub type Row = HashMap<String, Value>;

/// Connector failure modes.
#[derive(Debug)]
pub enum ConnectorError {
    /// No row matched a point read.
    NotFound,
    /// The call's context was cancelled or its deadline passed.
    Cancelled,
    /// The backend could not verify or accept the entity schema.
    SchemaMismatch(String),
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorError::NotFound => write!(f, "not found"),
            ConnectorError::Cancelled => write!(f, "call cancelled"),
            ConnectorError::SchemaMismatch(msg) => {
                write!(f, "schema mismatch: {}", msg)
            }
            ConnectorError::Backend(msg) => {
                write!(f, "backend error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConnectorError {}

/// Capability interface every storage backend implements.
///
/// The client calls these synchronously; a connector may block inside a call
/// but is expected to honor the [`CallContext`] and return
/// [`ConnectorError::Cancelled`] once the context reports cancellation.
/// There are no partial-result semantics: each call either completes or
/// fails.
pub trait Connector: Send + Sync {
    /// Verify that the backend can serve the given entity descriptors under
    /// `scope`/`name_prefix`. Returns a non-negative schema version on
    /// success.
    fn check_schema(
        &self,
        ctx: &CallContext,
        scope: &str,
        name_prefix: &str,
        entities: &[&EntityDef],
    ) -> Result<i32, ConnectorError>;

    /// Point read: fetch the single row matching `key_columns`, returning
    /// only `columns_to_read` (a connector may return more; the client maps
    /// whatever comes back).
    fn read(
        &self,
        ctx: &CallContext,
        entity: &EntityDef,
        key_columns: HashMap<String, Value>,
        columns_to_read: &[String],
    ) -> Result<Row, ConnectorError>;

    /// Range scan: fetch up to `op.limit_rows()` rows matching the compiled
    /// conditions, starting from `op.token()` (empty token = fresh scan).
    /// Returns the rows and the next continuation token (empty when the
    /// scan is exhausted).
    fn range(
        &self,
        ctx: &CallContext,
        entity: &EntityDef,
        op: &RangeOp,
        minimum_columns: &[String],
    ) -> Result<(Vec<Row>, String), ConnectorError>;
}
