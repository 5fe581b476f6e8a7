//! Employee use-case service.
//!
//! # Responsibility
//! - Provide employee CRUD and display-query entry points.
//! - Delegate validation and reference resolution to the repository.
//!
//! # Invariants
//! - Every write goes through `EmployeeDraft` validation in the repository.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeView};
use crate::model::role::{Role, RoleId};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for employee operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds an employee after validating the draft and resolving both
    /// references; a failed resolution leaves no row behind.
    pub fn add_employee(&mut self, draft: &EmployeeDraft) -> RepoResult<Employee> {
        let employee = self.repo.create_employee(draft)?;
        info!(
            "event=employee_add module=service status=ok id={}",
            employee.id
        );
        Ok(employee)
    }

    /// Replaces all fields of an existing employee under the same validation
    /// and resolution rules as `add_employee`.
    pub fn update_employee(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<()> {
        self.repo.update_employee(id, draft)
    }

    /// Deletes an employee by id.
    pub fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        self.repo.delete_employee(id)?;
        info!("event=employee_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Gets one employee row by id.
    pub fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.get_employee(id)
    }

    /// Lists all employee rows in id order.
    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_employees()
    }

    /// Gets one joined display row by id.
    pub fn get_employee_view(&self, id: EmployeeId) -> RepoResult<Option<EmployeeView>> {
        self.repo.get_employee_view(id)
    }

    /// Lists joined display rows for all employees.
    pub fn list_employee_views(&self) -> RepoResult<Vec<EmployeeView>> {
        self.repo.list_employee_views()
    }

    /// Lists joined display rows for one department's employees.
    pub fn list_views_in_department(
        &self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<EmployeeView>> {
        self.repo.list_views_in_department(department_id)
    }

    /// Lists joined display rows for employees holding one role.
    pub fn list_views_with_role(&self, role_id: RoleId) -> RepoResult<Vec<EmployeeView>> {
        self.repo.list_views_with_role(role_id)
    }

    /// Lists the distinct roles held by a department's employees.
    pub fn list_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Role>> {
        self.repo.list_roles_in_department(department_id)
    }
}
