//! Department repository trait

use std::collections::BTreeSet;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Department, DepartmentId};
use crate::domain::employee::EmployeeId;
use crate::domain::DomainError;

/// Repository for department persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Get a department by ID
    async fn get(&self, id: &DepartmentId) -> Result<Option<Department>, DomainError>;

    /// Find a department by name (case-insensitive)
    async fn get_by_name(&self, name: &str) -> Result<Option<Department>, DomainError>;

    /// List all departments sorted by name
    async fn list(&self) -> Result<Vec<Department>, DomainError>;

    /// Create a department, Conflict if the name is taken
    async fn create(&self, department: Department) -> Result<Department, DomainError>;

    /// Update a department, Conflict if renamed onto another department's name
    async fn update(&self, department: Department) -> Result<Department, DomainError>;

    /// Delete a department, returns true if it existed
    async fn delete(&self, id: &DepartmentId) -> Result<bool, DomainError>;

    /// Add an employee id to the member set.
    ///
    /// Returns NotFound if the department does not exist.
    async fn add_member(
        &self,
        id: &DepartmentId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError>;

    /// Remove an employee id from the member set.
    ///
    /// Returns false if the department does not exist.
    async fn remove_member(
        &self,
        id: &DepartmentId,
        employee_id: &EmployeeId,
    ) -> Result<bool, DomainError>;

    /// Overwrite the member set
    async fn replace_members(
        &self,
        id: &DepartmentId,
        members: BTreeSet<EmployeeId>,
    ) -> Result<(), DomainError>;

    /// Count departments
    async fn count(&self) -> Result<usize, DomainError>;

    /// Remove every department
    async fn clear(&self) -> Result<(), DomainError>;
}
