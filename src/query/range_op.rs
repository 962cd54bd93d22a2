//! Range-op builder: compiles predicates into a range-scan specification.

use crate::error::QueryError;
use crate::predicate::{Operator, Predicate};
use sea_query::Value;
use std::collections::HashMap;

/// One compiled condition of a range scan: operator plus comparison value.
#[derive(Debug, Clone)]
pub struct Condition {
    pub op: Operator,
    pub value: Value,
}

/// Compiled representation of a range-scan request.
///
/// Owns the conditions grouped by field name, the row limit, and the
/// continuation token (empty for a fresh scan). Built fresh per call and
/// handed to the connector as-is.
#[derive(Debug)]
pub struct RangeOp {
    conditions: HashMap<String, Vec<Condition>>,
    limit: usize,
    token: String,
}

impl RangeOp {
    /// Conditions grouped by field name, original predicate order preserved
    /// within each group.
    pub fn conditions(&self) -> &HashMap<String, Vec<Condition>> {
        &self.conditions
    }

    /// The row limit, exactly as supplied to the builder.
    pub fn limit_rows(&self) -> usize {
        self.limit
    }

    /// The continuation token. Empty means a fresh scan.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Resume a scan from a token returned by an earlier connector call.
    /// Pagination is the caller's responsibility; this layer never loops.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }
}

/// Compile predicates plus a row limit into a [`RangeOp`].
///
/// Range scans accept equality and all four ordering comparisons; not-equal
/// cannot be pushed down and is rejected. The first unsupported operator
/// fails the whole build; no partial op is returned.
///
/// # Errors
///
/// [`QueryError::UnsupportedOperator`] naming the operator and the `"range"`
/// operation kind.
pub fn build_range_op(predicates: &[Predicate], limit: usize) -> Result<RangeOp, QueryError> {
    let mut conditions: HashMap<String, Vec<Condition>> = HashMap::new();
    for pred in predicates {
        match pred.op() {
            Operator::Eq | Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => {
                conditions
                    .entry(pred.field().to_string())
                    .or_default()
                    .push(Condition {
                        op: pred.op(),
                        value: pred.value().clone(),
                    });
            }
            Operator::Ne => {
                return Err(QueryError::UnsupportedOperator {
                    op: pred.op(),
                    usage: "range",
                });
            }
        }
    }
    Ok(RangeOp {
        conditions,
        limit,
        token: String::new(),
    })
}
