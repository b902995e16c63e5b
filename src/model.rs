//! Record types for the employee/department/salary-grade dataset.
//!
//! Rows are plain data: loaded once by the surrounding application, cloned
//! freely through pipeline stages, never mutated by the query core.

use serde::{Deserialize, Serialize};

/// An employee row. `dept_no` references [`Department::dept_no`]; a value
/// with no matching department is an orphan and drops out of inner joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee number.
    pub emp_no: i64,
    /// Employee name.
    pub ename: String,
    /// Job title.
    pub job: String,
    /// Manager's employee number; the president has none.
    pub mgr: Option<i64>,
    /// Monthly salary.
    pub sal: f64,
    /// Commission; only salesmen carry one.
    pub comm: Option<f64>,
    /// Owning department number.
    pub dept_no: i64,
}

/// A department row, keyed by `dept_no`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Department number, unique within the table.
    pub dept_no: i64,
    /// Department name.
    pub dname: String,
    /// Location city.
    pub loc: String,
}

/// A salary grade: the inclusive band `losal..=hisal`. Bands are assumed
/// well-formed (`losal <= hisal`, non-overlapping); the core does not
/// enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryGrade {
    /// Grade identifier.
    pub grade: i64,
    /// Lower salary bound, inclusive.
    pub losal: f64,
    /// Upper salary bound, inclusive.
    pub hisal: f64,
}

impl SalaryGrade {
    /// Whether `sal` falls within this grade's band.
    pub fn covers(&self, sal: f64) -> bool {
        sal >= self.losal && sal <= self.hisal
    }
}
