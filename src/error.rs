//! Error types for the query translation layer.
//!
//! All translation errors are detected synchronously, before any connector
//! call is made. Connector failures are carried through unchanged inside
//! [`QueryError::Connector`]; this layer never retries or swallows them.

use crate::connector::ConnectorError;
use crate::predicate::Operator;
use std::fmt;

/// Errors surfaced by the query client and its builders.
#[derive(Debug)]
pub enum QueryError {
    /// A predicate's operator is not legal for the requested access pattern.
    ///
    /// `usage` is the operation kind, `"read"` or `"range"`.
    UnsupportedOperator {
        op: Operator,
        usage: &'static str,
    },
    /// A requested field name has no mapping in the entity schema.
    UnknownField(String),
    /// A predicate's column name is not part of the entity's column set.
    UnknownColumn(String),
    /// A textual query expression could not be parsed.
    BadQuery(String),
    /// The client was used before a successful `initialize`.
    NotInitialized,
    /// The connector rejected or could not verify the schema during
    /// `initialize`. The client stays unusable.
    SchemaCheck(ConnectorError),
    /// Any other connector failure during `read`/`range`, propagated
    /// unchanged.
    Connector(ConnectorError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnsupportedOperator { op, usage } => {
                write!(f, "wrong operator used for {}: {}", usage, op)
            }
            QueryError::UnknownField(name) => {
                write!(f, "unknown field name: {}", name)
            }
            QueryError::UnknownColumn(name) => {
                write!(f, "unknown column name: {}", name)
            }
            QueryError::BadQuery(msg) => {
                write!(f, "bad query expression: {}", msg)
            }
            QueryError::NotInitialized => {
                write!(f, "client is not initialized, call initialize first")
            }
            QueryError::SchemaCheck(e) => {
                write!(f, "schema check failed: {}", e)
            }
            QueryError::Connector(e) => {
                write!(f, "connector error: {}", e)
            }
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::SchemaCheck(e) | QueryError::Connector(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConnectorError> for QueryError {
    fn from(err: ConnectorError) -> Self {
        QueryError::Connector(err)
    }
}
