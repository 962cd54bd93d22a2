//! Query client orchestration.
//!
//! `QueryClient` ties the pieces together: on `initialize` it negotiates the
//! schema with the connector; on `read`/`range` it validates and compiles
//! the caller's predicates, invokes the connector, and maps result rows
//! back from column names to field names. Everything before the connector
//! call is pure computation, so a malformed query never costs I/O.

use crate::connector::Connector;
use crate::context::CallContext;
use crate::error::QueryError;
use crate::predicate::Predicate;
use crate::query::{build_range_op, build_read_args, rows_to_fields};
use crate::schema::{EntityDef, Registrar};
use sea_query::Value;
use std::collections::HashMap;

/// A row as returned to the caller, keyed by entity field names.
pub type FieldRow = HashMap<String, Value>;

/// Typed query client bound to one registrar and one connector.
///
/// The client starts uninitialized; a successful [`QueryClient::initialize`]
/// moves it to its ready state for the rest of its lifetime. `read` and
/// `range` take `&self` and allocate all per-call state fresh, so concurrent
/// queries on a shared client are safe.
///
/// # Example
///
/// ```
/// use dockhand::{CallContext, DevNullConnector, QueryClient};
/// use dockhand::schema::{ColumnType, EntityDef, FieldDef, Registrar};
///
/// let entity = EntityDef::new(
///     "User",
///     vec![
///         FieldDef::new("ID", "id", ColumnType::Int64).partition_key(),
///         FieldDef::new("Email", "email", ColumnType::Text),
///     ],
/// )?;
/// let registrar = Registrar::new("test", "team.service", entity)?;
/// let mut client = QueryClient::new(registrar, Box::new(DevNullConnector::new()));
/// client.initialize(&CallContext::background())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct QueryClient {
    registrar: Registrar,
    connector: Box<dyn Connector>,
    initialized: bool,
}

impl QueryClient {
    /// Create an uninitialized client.
    pub fn new(registrar: Registrar, connector: Box<dyn Connector>) -> Self {
        QueryClient {
            registrar,
            connector,
            initialized: false,
        }
    }

    /// Verify schema compatibility with the connector and mark the client
    /// ready. Idempotent once ready; on failure the client stays unusable
    /// and the connector's error is surfaced wrapped with context.
    pub fn initialize(&mut self, ctx: &CallContext) -> Result<(), QueryError> {
        if self.initialized {
            return Ok(());
        }
        let entity = self.registrar.entity();
        let version = self
            .connector
            .check_schema(
                ctx,
                self.registrar.scope(),
                self.registrar.name_prefix(),
                &[entity],
            )
            .map_err(QueryError::SchemaCheck)?;
        log::debug!(
            "schema check passed for entity {} (version {})",
            entity.name(),
            version
        );
        self.initialized = true;
        Ok(())
    }

    /// Point read.
    ///
    /// Translates `fields_to_read` into column names, compiles `predicates`
    /// into the key map (equality operators only), invokes the connector,
    /// and returns field-keyed rows, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// All of [`QueryError`]'s translation variants fail before the
    /// connector is called; connector failures are propagated unchanged.
    pub fn read(
        &self,
        ctx: &CallContext,
        predicates: &[Predicate],
        fields_to_read: &[&str],
        limit: usize,
    ) -> Result<Vec<FieldRow>, QueryError> {
        self.ensure_ready()?;
        let entity = self.registrar.entity();
        let columns = translate_fields(entity, fields_to_read)?;
        validate_predicate_columns(entity, predicates)?;
        let args = build_read_args(predicates)?;

        let row = self.connector.read(ctx, entity, args, &columns)?;
        let mut rows = rows_to_fields(&[row], entity.col_to_field());
        rows.truncate(limit);
        log::debug!("read on {} returned {} row(s)", entity.name(), rows.len());
        Ok(rows)
    }

    /// Range scan.
    ///
    /// Same field translation as [`QueryClient::read`], but predicates may
    /// carry ordering operators and are compiled into a [`crate::query::RangeOp`]
    /// with an empty continuation token. The token returned by the connector
    /// is dropped here; callers wanting pagination drive it themselves
    /// against the connector contract.
    pub fn range(
        &self,
        ctx: &CallContext,
        predicates: &[Predicate],
        fields_to_read: &[&str],
        limit: usize,
    ) -> Result<Vec<FieldRow>, QueryError> {
        self.ensure_ready()?;
        let entity = self.registrar.entity();
        let columns = translate_fields(entity, fields_to_read)?;
        validate_predicate_columns(entity, predicates)?;
        let op = build_range_op(predicates, limit)?;

        let (raw_rows, _token) = self.connector.range(ctx, entity, &op, &columns)?;
        let rows = rows_to_fields(&raw_rows, entity.col_to_field());
        log::debug!("range on {} returned {} row(s)", entity.name(), rows.len());
        Ok(rows)
    }

    fn ensure_ready(&self) -> Result<(), QueryError> {
        if self.initialized {
            Ok(())
        } else {
            Err(QueryError::NotInitialized)
        }
    }
}

fn translate_fields(entity: &EntityDef, fields: &[&str]) -> Result<Vec<String>, QueryError> {
    entity
        .columns_for_fields(fields)
        .map_err(QueryError::UnknownField)
}

// Strict input-side check: a predicate aimed at a column the entity does not
// declare is a terminal error before any connector call.
fn validate_predicate_columns(
    entity: &EntityDef,
    predicates: &[Predicate],
) -> Result<(), QueryError> {
    for pred in predicates {
        if entity.field_for_column(pred.column()).is_none() {
            return Err(QueryError::UnknownColumn(pred.column().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::DevNullConnector;
    use crate::predicate::Operator;
    use crate::schema::{ColumnType, FieldDef};

    fn registrar() -> Registrar {
        let entity = EntityDef::new(
            "User",
            vec![
                FieldDef::new("ID", "id", ColumnType::Int64).partition_key(),
                FieldDef::new("Email", "email", ColumnType::Text),
            ],
        )
        .unwrap();
        Registrar::new("test", "team.service", entity).unwrap()
    }

    #[test]
    fn test_uninitialized_client_rejects_queries() {
        let client = QueryClient::new(registrar(), Box::new(DevNullConnector::new()));
        let err = client
            .read(&CallContext::background(), &[], &["ID"], 1)
            .unwrap_err();
        assert!(matches!(err, QueryError::NotInitialized));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut client = QueryClient::new(registrar(), Box::new(DevNullConnector::new()));
        let ctx = CallContext::background();
        client.initialize(&ctx).unwrap();
        client.initialize(&ctx).unwrap();
    }

    #[test]
    fn test_read_rejects_predicate_with_unknown_column() {
        let mut client = QueryClient::new(registrar(), Box::new(DevNullConnector::new()));
        let ctx = CallContext::background();
        client.initialize(&ctx).unwrap();
        let stray = Predicate::new(
            "Ghost",
            "ghost",
            Operator::Eq,
            "1",
            Value::BigInt(Some(1)),
        );
        let err = client.read(&ctx, &[stray], &["ID"], 1).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
