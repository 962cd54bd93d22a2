//! Null connector: accepts every schema, stores nothing, finds nothing.
//!
//! Useful for wiring tests and as the default backend in configuration
//! before a real connector is selected.

use super::{Connector, ConnectorError, Row};
use crate::context::CallContext;
use crate::query::RangeOp;
use crate::schema::EntityDef;
use sea_query::Value;
use std::collections::HashMap;

/// Connector that drops all data on the floor.
#[derive(Debug, Default)]
pub struct DevNullConnector;

impl DevNullConnector {
    pub fn new() -> Self {
        DevNullConnector
    }
}

impl Connector for DevNullConnector {
    fn check_schema(
        &self,
        ctx: &CallContext,
        _scope: &str,
        _name_prefix: &str,
        _entities: &[&EntityDef],
    ) -> Result<i32, ConnectorError> {
        if ctx.is_cancelled() {
            return Err(ConnectorError::Cancelled);
        }
        Ok(1)
    }

    fn read(
        &self,
        ctx: &CallContext,
        _entity: &EntityDef,
        _key_columns: HashMap<String, Value>,
        _columns_to_read: &[String],
    ) -> Result<Row, ConnectorError> {
        if ctx.is_cancelled() {
            return Err(ConnectorError::Cancelled);
        }
        Err(ConnectorError::NotFound)
    }

    fn range(
        &self,
        ctx: &CallContext,
        _entity: &EntityDef,
        _op: &RangeOp,
        _minimum_columns: &[String],
    ) -> Result<(Vec<Row>, String), ConnectorError> {
        if ctx.is_cancelled() {
            return Err(ConnectorError::Cancelled);
        }
        Ok((Vec::new(), String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build_range_op;
    use crate::schema::{ColumnType, EntityDef, FieldDef};

    fn entity() -> EntityDef {
        EntityDef::new(
            "User",
            vec![FieldDef::new("ID", "id", ColumnType::Int64).partition_key()],
        )
        .unwrap()
    }

    #[test]
    fn test_devnull_accepts_any_schema() {
        let conn = DevNullConnector::new();
        let entity = entity();
        let version = conn
            .check_schema(&CallContext::background(), "test", "team.service", &[&entity])
            .unwrap();
        assert!(version >= 0);
    }

    #[test]
    fn test_devnull_read_finds_nothing() {
        let conn = DevNullConnector::new();
        let err = conn
            .read(&CallContext::background(), &entity(), HashMap::new(), &[])
            .unwrap_err();
        assert!(matches!(err, ConnectorError::NotFound));
    }

    #[test]
    fn test_devnull_range_is_empty() {
        let conn = DevNullConnector::new();
        let op = build_range_op(&[], 10).unwrap();
        let (rows, token) = conn
            .range(&CallContext::background(), &entity(), &op, &[])
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(token, "");
    }

    #[test]
    fn test_devnull_honors_cancellation() {
        let conn = DevNullConnector::new();
        let (ctx, handle) = CallContext::cancellable();
        handle.cancel();
        let entity = entity();
        let err = conn
            .check_schema(&ctx, "test", "team.service", &[&entity])
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Cancelled));
    }
}
