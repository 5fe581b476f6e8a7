//! Role domain model.
//!
//! # Invariants
//! - `title` is unique across the store and never empty.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable storage-assigned identifier for a role row.
pub type RoleId = i64;

/// Job title with a unique title string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
}

/// Trims and validates a role title for create/rename paths.
///
/// # Errors
/// - `ValidationError::EmptyRoleTitle` when nothing remains after trim.
pub fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyRoleTitle);
    }
    Ok(trimmed.to_string())
}
