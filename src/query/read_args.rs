//! Read-args builder: compiles predicates into a point-read key map.

use crate::error::QueryError;
use crate::predicate::{Operator, Predicate};
use sea_query::Value;
use std::collections::HashMap;

/// Compile predicates into the column-keyed argument map of a point read.
///
/// Point reads are exact key lookups, so only the equality operator is
/// legal. The first predicate carrying anything else fails the whole build;
/// no partial map is returned. When two predicates target the same column
/// the later one wins.
///
/// # Errors
///
/// [`QueryError::UnsupportedOperator`] naming the operator and the `"read"`
/// operation kind.
pub fn build_read_args(predicates: &[Predicate]) -> Result<HashMap<String, Value>, QueryError> {
    let mut args = HashMap::with_capacity(predicates.len());
    for pred in predicates {
        if pred.op() != Operator::Eq {
            return Err(QueryError::UnsupportedOperator {
                op: pred.op(),
                usage: "read",
            });
        }
        args.insert(pred.column().to_string(), pred.value().clone());
    }
    Ok(args)
}
