//! Tabula: a read-only relational query core over in-memory tables.
//!
//! Tables are registered once in a [`store::RowStore`] and never mutated.
//! Queries are declared as staged pipelines (filter, join, group, project,
//! sort) and evaluated lazily by a single terminal
//! [`query::pipeline::Pipeline::materialize`] call.

#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod query;
pub mod store;

pub use error::{Result, TabulaError};
pub use model::{Department, Employee, SalaryGrade};
pub use query::pipeline::Pipeline;
pub use query::predicate::{FieldRef, Predicate};
pub use query::value::Value;
pub use store::RowStore;
