//! Storage-backed employee repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::department::DepartmentId;
use crate::domain::employee::{Employee, EmployeeId, EmployeeRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// EmployeeRepository over a generic document storage
#[derive(Debug)]
pub struct StorageEmployeeRepository {
    storage: Arc<dyn Storage<Employee>>,
}

impl StorageEmployeeRepository {
    pub fn new(storage: Arc<dyn Storage<Employee>>) -> Self {
        Self { storage }
    }

    async fn ensure_email_free(&self, employee: &Employee) -> Result<(), DomainError> {
        let taken = self
            .storage
            .list()
            .await?
            .into_iter()
            .any(|other| other.email() == employee.email() && other.id() != employee.id());

        if taken {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                employee.email()
            )));
        }

        Ok(())
    }
}

fn sort_employees(employees: &mut [Employee]) {
    employees.sort_by(|a, b| {
        a.surname()
            .cmp(b.surname())
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(b.id()))
    });
}

#[async_trait]
impl EmployeeRepository for StorageEmployeeRepository {
    async fn get(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .find(|employee| employee.email() == email))
    }

    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        let mut employees = self.storage.list().await?;
        sort_employees(&mut employees);
        Ok(employees)
    }

    async fn list_by_department(
        &self,
        department: &DepartmentId,
    ) -> Result<Vec<Employee>, DomainError> {
        let mut employees: Vec<Employee> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|employee| employee.belongs_to(department))
            .collect();

        sort_employees(&mut employees);
        Ok(employees)
    }

    async fn create(&self, employee: Employee) -> Result<Employee, DomainError> {
        self.ensure_email_free(&employee).await?;
        self.storage.create(employee).await
    }

    async fn update(&self, employee: Employee) -> Result<Employee, DomainError> {
        if !self.storage.exists(employee.id()).await? {
            return Err(DomainError::not_found(format!(
                "Employee '{}' not found",
                employee.id()
            )));
        }

        self.ensure_email_free(&employee).await?;
        self.storage.update(employee).await
    }

    async fn delete(&self, id: &EmployeeId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.storage.clear().await
    }
}
