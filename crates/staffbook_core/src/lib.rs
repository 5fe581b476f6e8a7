//! Core domain logic for StaffBook.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeView};
pub use model::role::{Role, RoleId};
pub use model::ValidationError;
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::role_repo::{RoleRepository, SqliteRoleRepository};
pub use repo::{RepoError, RepoResult};
pub use service::department_service::DepartmentService;
pub use service::employee_service::EmployeeService;
pub use service::role_service::RoleService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
