//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must run model validation before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateName`,
//!   `InUse`, `MissingReference`) in addition to DB transport errors.
//! - Internal lookups are id-based; name/title lookups exist only for
//!   natural-key resolution at the shell boundary.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod employee_repo;
pub mod role_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for directory persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// The targeted row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// A unique natural key (department name / role title) is already taken.
    DuplicateName {
        entity: &'static str,
        value: String,
    },
    /// Deletion was refused because employee rows still reference the target.
    InUse { entity: &'static str, id: i64 },
    /// An employee write referenced a department/role that does not exist.
    MissingReference { entity: &'static str, id: i64 },
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A table required by this repository is absent.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: id {id}"),
            Self::DuplicateName { entity, value } => {
                write!(f, "a {entity} named `{value}` already exists")
            }
            Self::InUse { entity, id } => write!(
                f,
                "{entity} id {id} still has employees assigned; reassign or delete them first"
            ),
            Self::MissingReference { entity, id } => {
                write!(f, "{entity} id {id} does not exist")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: expected schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Returns whether `err` is a UNIQUE constraint failure.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(cause, _)
            if cause.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Returns whether `err` is a FOREIGN KEY constraint failure.
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(cause, _)
            if cause.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Verifies the connection was opened through `db::open_db` and carries the
/// directory schema.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["departments", "roles", "employees"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
