//! Employee domain model and write-path validation.
//!
//! # Responsibility
//! - Define the employee record and its write draft.
//! - Enforce name/salary validation before persistence.
//!
//! # Invariants
//! - `name` contains only alphabetic characters and spaces, trimmed.
//! - `salary` is finite and strictly greater than zero.
//! - `department_id`/`role_id` must reference existing rows at write time.

use super::department::DepartmentId;
use super::role::RoleId;
use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable storage-assigned identifier for an employee row.
pub type EmployeeId = i64;

static EMPLOYEE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("valid employee name regex"));

/// Person record referencing exactly one department and one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department_id: DepartmentId,
    pub role_id: RoleId,
    pub salary: f64,
}

/// Pending employee write, shared by create and update paths.
///
/// Fields are public so callers can assemble drafts directly; repositories
/// re-run `validate()` before every SQL mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub department_id: DepartmentId,
    pub role_id: RoleId,
    pub salary: f64,
}

impl EmployeeDraft {
    /// Builds a validated draft with the name trimmed.
    ///
    /// # Errors
    /// - `ValidationError::InvalidEmployeeName` for empty or non-alphabetic names.
    /// - `ValidationError::InvalidSalary` for non-finite or non-positive salaries.
    pub fn new(
        name: impl Into<String>,
        department_id: DepartmentId,
        role_id: RoleId,
        salary: f64,
    ) -> Result<Self, ValidationError> {
        let draft = Self {
            name: name.into().trim().to_string(),
            department_id,
            role_id,
            salary,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Checks name and salary constraints without touching storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !EMPLOYEE_NAME_RE.is_match(self.name.trim()) {
            return Err(ValidationError::InvalidEmployeeName(self.name.clone()));
        }
        if !self.salary.is_finite() || self.salary <= 0.0 {
            return Err(ValidationError::InvalidSalary(self.salary));
        }
        Ok(())
    }
}

/// Read model joining an employee to its department name and role title.
///
/// Produced by join queries for display; the association lives in the
/// referencing ids, not in duplicated columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub role: String,
    pub salary: f64,
}

#[cfg(test)]
mod tests {
    use super::EmployeeDraft;
    use crate::model::ValidationError;

    #[test]
    fn new_trims_name_and_accepts_valid_input() {
        let draft = EmployeeDraft::new("  Jane Doe ", 1, 1, 50_000.0).unwrap();
        assert_eq!(draft.name, "Jane Doe");
    }

    #[test]
    fn names_with_digits_or_punctuation_are_rejected() {
        for name in ["John3", "Jane-Doe", "", "  "] {
            let err = EmployeeDraft::new(name, 1, 1, 1_000.0).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidEmployeeName(_)));
        }
    }

    #[test]
    fn non_positive_or_non_finite_salaries_are_rejected() {
        for salary in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = EmployeeDraft::new("Jane Doe", 1, 1, salary).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidSalary(_)));
        }
    }
}
