//! Employee repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Employee, EmployeeId};
use crate::domain::department::DepartmentId;
use crate::domain::DomainError;

/// Repository for employee persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Get an employee by ID
    async fn get(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError>;

    /// Get an employee by email (exact, case-sensitive match)
    async fn get_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError>;

    /// List all employees sorted by surname then name
    async fn list(&self) -> Result<Vec<Employee>, DomainError>;

    /// List employees whose department reference equals `department`
    async fn list_by_department(
        &self,
        department: &DepartmentId,
    ) -> Result<Vec<Employee>, DomainError>;

    /// Create an employee, Conflict if the email is taken
    async fn create(&self, employee: Employee) -> Result<Employee, DomainError>;

    /// Update an employee, Conflict if the new email belongs to someone else
    async fn update(&self, employee: Employee) -> Result<Employee, DomainError>;

    /// Delete an employee, returns true if it existed
    async fn delete(&self, id: &EmployeeId) -> Result<bool, DomainError>;

    /// Count employees
    async fn count(&self) -> Result<usize, DomainError>;

    /// Remove every employee
    async fn clear(&self) -> Result<(), DomainError>;
}
