//! Department domain model.
//!
//! # Invariants
//! - `name` is unique across the store and never empty.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable storage-assigned identifier for a department row.
pub type DepartmentId = i64;

/// Organizational unit with a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

/// Trims and validates a department name for create/rename paths.
///
/// # Errors
/// - `ValidationError::EmptyDepartmentName` when nothing remains after trim.
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDepartmentName);
    }
    Ok(trimmed.to_string())
}
