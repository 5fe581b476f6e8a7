//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `employees`, plus joined read models for display.
//! - Resolve department/role references inside a single transaction so a
//!   failed resolution leaves no partial write.
//!
//! # Invariants
//! - Write paths call `EmployeeDraft::validate()` before SQL mutations.
//! - A write referencing a missing department/role aborts with
//!   `RepoError::MissingReference`; no row is inserted or updated.
//! - Referential integrity is additionally enforced by foreign keys, so view
//!   queries may use inner joins.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeView};
use crate::model::role::{Role, RoleId};
use crate::repo::role_repo::parse_role_row;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};

const ENTITY: &str = "employee";

const EMPLOYEE_VIEW_SQL: &str = "SELECT
    e.id,
    e.name,
    d.name AS department,
    r.title AS role,
    e.salary
FROM employees e
JOIN departments d ON d.id = e.department_id
JOIN roles r ON r.id = e.role_id";

/// Repository interface for employee CRUD and display queries.
pub trait EmployeeRepository {
    fn create_employee(&mut self, draft: &EmployeeDraft) -> RepoResult<Employee>;
    fn update_employee(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<()>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    fn get_employee_view(&self, id: EmployeeId) -> RepoResult<Option<EmployeeView>>;
    fn list_employee_views(&self) -> RepoResult<Vec<EmployeeView>>;
    fn list_views_in_department(&self, department_id: DepartmentId)
        -> RepoResult<Vec<EmployeeView>>;
    fn list_views_with_role(&self, role_id: RoleId) -> RepoResult<Vec<EmployeeView>>;
    fn list_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Role>>;
}

/// SQLite-backed employee repository.
///
/// Holds a mutable connection borrow because reference resolution and the
/// row write happen inside one transaction.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&mut self, draft: &EmployeeDraft) -> RepoResult<Employee> {
        draft.validate()?;
        let name = draft.name.trim().to_string();

        let tx = self.conn.transaction()?;
        ensure_references_resolve(&tx, draft)?;
        tx.execute(
            "INSERT INTO employees (name, department_id, role_id, salary)
             VALUES (?1, ?2, ?3, ?4);",
            params![name.as_str(), draft.department_id, draft.role_id, draft.salary],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Employee {
            id,
            name,
            department_id: draft.department_id,
            role_id: draft.role_id,
            salary: draft.salary,
        })
    }

    fn update_employee(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<()> {
        draft.validate()?;
        let name = draft.name.trim().to_string();

        let tx = self.conn.transaction()?;
        ensure_references_resolve(&tx, draft)?;
        let changed = tx.execute(
            "UPDATE employees
             SET name = ?2, department_id = ?3, role_id = ?4, salary = ?5
             WHERE id = ?1;",
            params![id, name.as_str(), draft.department_id, draft.role_id, draft.salary],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                "SELECT id, name, department_id, role_id, salary
                 FROM employees WHERE id = ?1;",
                params![id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, department_id, role_id, salary
             FROM employees ORDER BY id;",
        )?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn get_employee_view(&self, id: EmployeeId) -> RepoResult<Option<EmployeeView>> {
        let view = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_VIEW_SQL} WHERE e.id = ?1;"),
                params![id],
                parse_employee_view_row,
            )
            .optional()?;
        Ok(view)
    }

    fn list_employee_views(&self) -> RepoResult<Vec<EmployeeView>> {
        self.query_views(&format!("{EMPLOYEE_VIEW_SQL} ORDER BY e.id;"), &[])
    }

    fn list_views_in_department(
        &self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<EmployeeView>> {
        self.query_views(
            &format!("{EMPLOYEE_VIEW_SQL} WHERE e.department_id = ?1 ORDER BY e.id;"),
            &[department_id],
        )
    }

    fn list_views_with_role(&self, role_id: RoleId) -> RepoResult<Vec<EmployeeView>> {
        self.query_views(
            &format!("{EMPLOYEE_VIEW_SQL} WHERE e.role_id = ?1 ORDER BY e.id;"),
            &[role_id],
        )
    }

    fn list_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Role>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT r.id, r.title
             FROM employees e
             JOIN roles r ON r.id = e.role_id
             WHERE e.department_id = ?1
             ORDER BY r.id;",
        )?;
        let mut rows = stmt.query(params![department_id])?;
        let mut roles = Vec::new();

        while let Some(row) = rows.next()? {
            roles.push(parse_role_row(row)?);
        }

        Ok(roles)
    }
}

impl SqliteEmployeeRepository<'_> {
    fn query_views(&self, sql: &str, bind: &[i64]) -> RepoResult<Vec<EmployeeView>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(bind.iter()))?;
        let mut views = Vec::new();

        while let Some(row) = rows.next()? {
            views.push(parse_employee_view_row(row)?);
        }

        Ok(views)
    }
}

fn ensure_references_resolve(tx: &Transaction<'_>, draft: &EmployeeDraft) -> RepoResult<()> {
    if !row_exists(
        tx,
        "SELECT EXISTS(SELECT 1 FROM departments WHERE id = ?1);",
        draft.department_id,
    )? {
        return Err(RepoError::MissingReference {
            entity: "department",
            id: draft.department_id,
        });
    }
    if !row_exists(
        tx,
        "SELECT EXISTS(SELECT 1 FROM roles WHERE id = ?1);",
        draft.role_id,
    )? {
        return Err(RepoError::MissingReference {
            entity: "role",
            id: draft.role_id,
        });
    }
    Ok(())
}

fn row_exists(tx: &Transaction<'_>, sql: &str, id: i64) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(sql, params![id], |row| row.get(0))?;
    Ok(exists == 1)
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        department_id: row.get("department_id")?,
        role_id: row.get("role_id")?,
        salary: row.get("salary")?,
    })
}

fn parse_employee_view_row(row: &Row<'_>) -> rusqlite::Result<EmployeeView> {
    Ok(EmployeeView {
        id: row.get("id")?,
        name: row.get("name")?,
        department: row.get("department")?,
        role: row.get("role")?,
        salary: row.get("salary")?,
    })
}
