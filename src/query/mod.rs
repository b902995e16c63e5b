//! Query evaluation core: scalar values, predicates, joins, aggregation,
//! and staged pipelines.
//!
//! Every operation here is a pure function over immutable inputs; the only
//! side effects are tracing events. Composition order follows the
//! relational convention: source, filter, join, group/aggregate, project,
//! sort, driven by a single terminal materialization.

/// Grouping and per-group aggregates (count, sum, average).
pub mod aggregate;

/// Equi-join and range-join primitives.
pub mod join;

/// Staged pipeline objects and the terminal `materialize` operation.
pub mod pipeline;

/// Predicate trees with three-valued, null-propagating evaluation.
pub mod predicate;

/// Canonical scalar value representation.
pub mod value;

pub use aggregate::{group_by, Group};
pub use join::{equi_join, range_join};
pub use pipeline::Pipeline;
pub use predicate::{Comparison, FieldRef, Predicate, Truth};
pub use value::Value;
