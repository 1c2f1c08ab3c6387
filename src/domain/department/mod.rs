//! Department domain
//!
//! Departments group employees. A department keeps the set of employee ids
//! it currently claims; that set is derived from each employee's
//! `department` reference and kept in sync by the membership manager.

mod entity;
mod repository;
mod validation;

pub use entity::{Department, DepartmentId};
pub use repository::DepartmentRepository;
pub use validation::{
    names_match, validate_department_id, validate_department_name, DepartmentValidationError,
};

#[cfg(test)]
pub use repository::MockDepartmentRepository;
