//! Predicate-to-operation compilation and result mapping.
//!
//! This is the core of the crate: pure functions that compile caller
//! predicates into the exact shape a connector operation needs, enforcing
//! operator legality per access pattern, plus the column-name to field-name
//! mapper applied to result rows. Nothing in this module performs I/O; a
//! malformed query is rejected before the connector is ever invoked.
//!
//! - [`read_args::build_read_args`]: point-read key map (equality only)
//! - [`range_op::build_range_op`]: range-scan specification (equality and
//!   ordering operators)
//! - [`mapper::rows_to_fields`]: column-keyed rows to field-keyed rows

pub mod mapper;
pub mod range_op;
pub mod read_args;

#[doc(inline)]
pub use mapper::rows_to_fields;
#[doc(inline)]
pub use range_op::{build_range_op, Condition, RangeOp};
#[doc(inline)]
pub use read_args::build_read_args;
