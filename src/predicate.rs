//! Query predicates: one field/operator/value constraint each.
//!
//! A [`Predicate`] carries both the application-side field name and the
//! storage-side column name so the builders downstream never need to touch
//! the schema again. Predicates are immutable once constructed; several
//! predicates may target the same field (range bounds do).

use crate::error::QueryError;
use crate::schema::EntityDef;
use sea_query::Value;
use std::fmt;

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
}

impl Operator {
    /// Parse the lowercase mnemonic used in shell-style query expressions.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(Operator::Eq),
            "lt" => Some(Operator::Lt),
            "le" => Some(Operator::Le),
            "gt" => Some(Operator::Gt),
            "ge" => Some(Operator::Ge),
            "ne" => Some(Operator::Ne),
            _ => None,
        }
    }

    /// The mnemonic form, the inverse of [`Operator::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Ne => "ne",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One constraint over an entity field.
#[derive(Debug, Clone)]
pub struct Predicate {
    field: String,
    column: String,
    op: Operator,
    raw: String,
    value: Value,
}

impl Predicate {
    /// Construct a predicate from already-resolved parts.
    pub fn new(field: &str, column: &str, op: Operator, raw: &str, value: Value) -> Self {
        Predicate {
            field: field.to_string(),
            column: column.to_string(),
            op,
            raw: raw.to_string(),
            value,
        }
    }

    /// Parse a shell-style `Field:op:value` expression against an entity.
    ///
    /// The column name is resolved through the entity descriptor and the raw
    /// value is converted using the field's declared storage type.
    ///
    /// # Example
    ///
    /// ```
    /// use dockhand::{Operator, Predicate};
    /// use dockhand::schema::{ColumnType, EntityDef, FieldDef};
    ///
    /// let entity = EntityDef::new(
    ///     "User",
    ///     vec![FieldDef::new("ID", "id", ColumnType::Int64).partition_key()],
    /// )?;
    /// let pred = Predicate::parse("ID:eq:10", &entity)?;
    /// assert_eq!(pred.column(), "id");
    /// assert_eq!(pred.op(), Operator::Eq);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`QueryError::BadQuery`] for a malformed expression, unknown operator
    /// mnemonic, or unparsable value; [`QueryError::UnknownField`] when the
    /// field is not part of the entity.
    pub fn parse(expr: &str, entity: &EntityDef) -> Result<Self, QueryError> {
        // Value text may itself contain ':' (timestamps do), so split twice
        // from the left and keep the remainder intact.
        let (field, rest) = expr
            .split_once(':')
            .ok_or_else(|| QueryError::BadQuery(format!("expected field:op:value, got {}", expr)))?;
        let (op_str, raw) = rest
            .split_once(':')
            .ok_or_else(|| QueryError::BadQuery(format!("expected field:op:value, got {}", expr)))?;

        let op = Operator::parse(op_str)
            .ok_or_else(|| QueryError::BadQuery(format!("unknown operator: {}", op_str)))?;
        let column = entity
            .column_for_field(field)
            .ok_or_else(|| QueryError::UnknownField(field.to_string()))?
            .to_string();
        // column_for_field succeeded, so the type lookup cannot miss
        let ty = entity
            .field_type(field)
            .ok_or_else(|| QueryError::UnknownField(field.to_string()))?;
        let value = ty.parse_value(raw).map_err(QueryError::BadQuery)?;

        Ok(Predicate {
            field: field.to_string(),
            column,
            op,
            raw: raw.to_string(),
            value,
        })
    }

    /// Application-side field name this predicate targets.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Storage-side column name this predicate targets.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Comparison operator.
    pub fn op(&self) -> Operator {
        self.op
    }

    /// The raw textual value the predicate was built from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The typed value to compare against.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, FieldDef};

    fn user_entity() -> EntityDef {
        EntityDef::new(
            "User",
            vec![
                FieldDef::new("ID", "id", ColumnType::Int64).partition_key(),
                FieldDef::new("Name", "name", ColumnType::Text),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_operator_parse_roundtrip() {
        for op in ["eq", "lt", "le", "gt", "ge", "ne"] {
            assert_eq!(Operator::parse(op).unwrap().as_str(), op);
        }
        assert!(Operator::parse("like").is_none());
    }

    #[test]
    fn test_parse_resolves_column_and_value() {
        let entity = user_entity();
        let pred = Predicate::parse("ID:eq:10", &entity).unwrap();
        assert_eq!(pred.field(), "ID");
        assert_eq!(pred.column(), "id");
        assert_eq!(pred.op(), Operator::Eq);
        assert_eq!(pred.raw(), "10");
        assert_eq!(pred.value(), &Value::BigInt(Some(10)));
    }

    #[test]
    fn test_parse_unknown_field() {
        let entity = user_entity();
        let err = Predicate::parse("Missing:eq:10", &entity).unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_parse_malformed_expression() {
        let entity = user_entity();
        assert!(matches!(
            Predicate::parse("ID", &entity),
            Err(QueryError::BadQuery(_))
        ));
        assert!(matches!(
            Predicate::parse("ID:like:10", &entity),
            Err(QueryError::BadQuery(_))
        ));
        assert!(matches!(
            Predicate::parse("ID:eq:ten", &entity),
            Err(QueryError::BadQuery(_))
        ));
    }

    #[test]
    fn test_parse_value_may_contain_colons() {
        let entity = EntityDef::new(
            "Event",
            vec![
                FieldDef::new("ID", "id", ColumnType::Int64).partition_key(),
                FieldDef::new("At", "at", ColumnType::Timestamp),
            ],
        )
        .unwrap();
        let pred = Predicate::parse("At:ge:2024-01-02T03:04:05Z", &entity).unwrap();
        assert_eq!(pred.raw(), "2024-01-02T03:04:05Z");
        assert_eq!(pred.op(), Operator::Ge);
    }
}
