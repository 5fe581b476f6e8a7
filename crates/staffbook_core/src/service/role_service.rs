//! Role use-case service.
//!
//! Mirrors the department service contract with `title` as the natural key.

use crate::model::role::{Role, RoleId};
use crate::repo::role_repo::RoleRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for role CRUD operations.
pub struct RoleService<R: RoleRepository> {
    repo: R,
}

impl<R: RoleRepository> RoleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a role with a unique, non-empty title.
    pub fn add_role(&self, title: &str) -> RepoResult<Role> {
        let role = self.repo.create_role(title)?;
        info!("event=role_add module=service status=ok id={}", role.id);
        Ok(role)
    }

    /// Renames an existing role by id.
    pub fn rename_role(&self, id: RoleId, new_title: &str) -> RepoResult<()> {
        self.repo.rename_role(id, new_title)
    }

    /// Deletes a role by id.
    ///
    /// Fails with `RepoError::InUse` while employees still reference it.
    pub fn delete_role(&self, id: RoleId) -> RepoResult<()> {
        self.repo.delete_role(id)?;
        info!("event=role_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Gets one role by id.
    pub fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>> {
        self.repo.get_role(id)
    }

    /// Resolves a role by its unique title, for shell-boundary lookups.
    pub fn find_role_by_title(&self, title: &str) -> RepoResult<Option<Role>> {
        self.repo.find_role_by_title(title)
    }

    /// Lists all roles in id order.
    pub fn list_roles(&self) -> RepoResult<Vec<Role>> {
        self.repo.list_roles()
    }
}
