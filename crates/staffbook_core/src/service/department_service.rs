//! Department use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for shell callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::model::department::{Department, DepartmentId};
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for department CRUD operations.
pub struct DepartmentService<R: DepartmentRepository> {
    repo: R,
}

impl<R: DepartmentRepository> DepartmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a department with a unique, non-empty name.
    pub fn add_department(&self, name: &str) -> RepoResult<Department> {
        let department = self.repo.create_department(name)?;
        info!(
            "event=department_add module=service status=ok id={}",
            department.id
        );
        Ok(department)
    }

    /// Renames an existing department by id.
    ///
    /// Returns repository-level not-found or duplicate-name errors unchanged.
    pub fn rename_department(&self, id: DepartmentId, new_name: &str) -> RepoResult<()> {
        self.repo.rename_department(id, new_name)
    }

    /// Deletes a department by id.
    ///
    /// Fails with `RepoError::InUse` while employees still reference it.
    pub fn delete_department(&self, id: DepartmentId) -> RepoResult<()> {
        self.repo.delete_department(id)?;
        info!("event=department_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Gets one department by id.
    pub fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        self.repo.get_department(id)
    }

    /// Resolves a department by its unique name, for shell-boundary lookups.
    pub fn find_department_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        self.repo.find_department_by_name(name)
    }

    /// Lists all departments in id order.
    pub fn list_departments(&self) -> RepoResult<Vec<Department>> {
        self.repo.list_departments()
    }
}
