//! Department repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `departments` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Names are normalized (trimmed, non-empty) before any SQL mutation.
//! - Duplicate names surface as `RepoError::DuplicateName`, never as raw
//!   SQLite failures.
//! - Deleting a department still referenced by employees fails with
//!   `RepoError::InUse`.

use crate::model::department::{normalize_name, Department, DepartmentId};
use crate::repo::{
    ensure_connection_ready, is_foreign_key_violation, is_unique_violation, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "department";

/// Repository interface for department CRUD operations.
pub trait DepartmentRepository {
    fn create_department(&self, name: &str) -> RepoResult<Department>;
    fn rename_department(&self, id: DepartmentId, new_name: &str) -> RepoResult<()>;
    fn delete_department(&self, id: DepartmentId) -> RepoResult<()>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn find_department_by_name(&self, name: &str) -> RepoResult<Option<Department>>;
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_department(&self, name: &str) -> RepoResult<Department> {
        let name = normalize_name(name)?;

        self.conn
            .execute(
                "INSERT INTO departments (name) VALUES (?1);",
                params![name.as_str()],
            )
            .map_err(|err| duplicate_or_db(err, &name))?;

        Ok(Department {
            id: self.conn.last_insert_rowid(),
            name,
        })
    }

    fn rename_department(&self, id: DepartmentId, new_name: &str) -> RepoResult<()> {
        let new_name = normalize_name(new_name)?;

        let changed = self
            .conn
            .execute(
                "UPDATE departments SET name = ?2 WHERE id = ?1;",
                params![id, new_name.as_str()],
            )
            .map_err(|err| duplicate_or_db(err, &new_name))?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_department(&self, id: DepartmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", params![id])
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    RepoError::InUse { entity: ENTITY, id }
                } else {
                    err.into()
                }
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                "SELECT id, name FROM departments WHERE id = ?1;",
                params![id],
                parse_department_row,
            )
            .optional()?;
        Ok(department)
    }

    fn find_department_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                "SELECT id, name FROM departments WHERE name = ?1;",
                params![name.trim()],
                parse_department_row,
            )
            .optional()?;
        Ok(department)
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM departments ORDER BY id;")?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();

        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }

        Ok(departments)
    }
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn duplicate_or_db(err: rusqlite::Error, name: &str) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::DuplicateName {
            entity: ENTITY,
            value: name.to_string(),
        }
    } else {
        err.into()
    }
}
