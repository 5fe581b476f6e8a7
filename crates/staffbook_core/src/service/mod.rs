//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the CLI layer decoupled from storage details.

pub mod department_service;
pub mod employee_service;
pub mod role_service;
