//! Employee domain
//!
//! This module provides the employee entity (identity, credentials, role and
//! optional department reference), its validation rules and the repository
//! trait.

mod entity;
mod repository;
mod role;
mod validation;

pub use entity::{Employee, EmployeeId};
pub use repository::EmployeeRepository;
pub use role::Role;
pub use validation::{
    validate_email, validate_employee_id, validate_password, validate_person_name,
    EmployeeValidationError,
};

#[cfg(test)]
pub use repository::MockEmployeeRepository;
