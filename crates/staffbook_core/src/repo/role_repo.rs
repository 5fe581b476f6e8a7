//! Role repository contract and SQLite implementation.
//!
//! Identical contract shape to the department repository, substituting the
//! unique `title` natural key for `name`.
//!
//! # Invariants
//! - Titles are normalized (trimmed, non-empty) before any SQL mutation.
//! - Duplicate titles surface as `RepoError::DuplicateName`.
//! - Deleting a role still referenced by employees fails with
//!   `RepoError::InUse`.

use crate::model::role::{normalize_title, Role, RoleId};
use crate::repo::{
    ensure_connection_ready, is_foreign_key_violation, is_unique_violation, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "role";

/// Repository interface for role CRUD operations.
pub trait RoleRepository {
    fn create_role(&self, title: &str) -> RepoResult<Role>;
    fn rename_role(&self, id: RoleId, new_title: &str) -> RepoResult<()>;
    fn delete_role(&self, id: RoleId) -> RepoResult<()>;
    fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>>;
    fn find_role_by_title(&self, title: &str) -> RepoResult<Option<Role>>;
    fn list_roles(&self) -> RepoResult<Vec<Role>>;
}

/// SQLite-backed role repository.
pub struct SqliteRoleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoleRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RoleRepository for SqliteRoleRepository<'_> {
    fn create_role(&self, title: &str) -> RepoResult<Role> {
        let title = normalize_title(title)?;

        self.conn
            .execute(
                "INSERT INTO roles (title) VALUES (?1);",
                params![title.as_str()],
            )
            .map_err(|err| duplicate_or_db(err, &title))?;

        Ok(Role {
            id: self.conn.last_insert_rowid(),
            title,
        })
    }

    fn rename_role(&self, id: RoleId, new_title: &str) -> RepoResult<()> {
        let new_title = normalize_title(new_title)?;

        let changed = self
            .conn
            .execute(
                "UPDATE roles SET title = ?2 WHERE id = ?1;",
                params![id, new_title.as_str()],
            )
            .map_err(|err| duplicate_or_db(err, &new_title))?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_role(&self, id: RoleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM roles WHERE id = ?1;", params![id])
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

    fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>> {
        let role = self
            .conn
            .query_row(
                "SELECT id, title FROM roles WHERE id = ?1;",
                params![id],
                parse_role_row,
            )
            .optional()?;
        Ok(role)
    }

    fn find_role_by_title(&self, title: &str) -> RepoResult<Option<Role>> {
        let role = self
            .conn
            .query_row(
                "SELECT id, title FROM roles WHERE title = ?1;",
                params![title.trim()],
                parse_role_row,
            )
            .optional()?;
        Ok(role)
    }

    fn list_roles(&self) -> RepoResult<Vec<Role>> {
        let mut stmt = self.conn.prepare("SELECT id, title FROM roles ORDER BY id;")?;
        let mut rows = stmt.query([])?;
        let mut roles = Vec::new();

        while let Some(row) = rows.next()? {
            roles.push(parse_role_row(row)?);
        }

        Ok(roles)
    }
}

pub(crate) fn parse_role_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get("id")?,
        title: row.get("title")?,
    })
}

fn duplicate_or_db(err: rusqlite::Error, title: &str) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::DuplicateName {
            entity: ENTITY,
            value: title.to_string(),
        }
    } else {
        err.into()
    }
}
