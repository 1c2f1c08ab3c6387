//! Storage-backed department repository

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::department::{names_match, Department, DepartmentId, DepartmentRepository};
use crate::domain::employee::EmployeeId;
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// DepartmentRepository over a generic document storage
#[derive(Debug)]
pub struct StorageDepartmentRepository {
    storage: Arc<dyn Storage<Department>>,
}

impl StorageDepartmentRepository {
    pub fn new(storage: Arc<dyn Storage<Department>>) -> Self {
        Self { storage }
    }

    async fn ensure_name_free(&self, department: &Department) -> Result<(), DomainError> {
        let taken = self.storage.list().await?.into_iter().any(|other| {
            other.id() != department.id() && names_match(other.name(), department.name())
        });

        if taken {
            return Err(DomainError::conflict(format!(
                "Department '{}' already exists",
                department.name()
            )));
        }

        Ok(())
    }

    async fn require(&self, id: &DepartmentId) -> Result<Department, DomainError> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Department '{}' not found", id)))
    }
}

#[async_trait]
impl DepartmentRepository for StorageDepartmentRepository {
    async fn get(&self, id: &DepartmentId) -> Result<Option<Department>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Department>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .find(|department| names_match(department.name(), name)))
    }

    async fn list(&self) -> Result<Vec<Department>, DomainError> {
        let mut departments = self.storage.list().await?;
        departments.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(departments)
    }

    async fn create(&self, department: Department) -> Result<Department, DomainError> {
        self.ensure_name_free(&department).await?;
        self.storage.create(department).await
    }

    async fn update(&self, department: Department) -> Result<Department, DomainError> {
        if !self.storage.exists(department.id()).await? {
            return Err(DomainError::not_found(format!(
                "Department '{}' not found",
                department.id()
            )));
        }

        self.ensure_name_free(&department).await?;
        self.storage.update(department).await
    }

    async fn delete(&self, id: &DepartmentId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn add_member(
        &self,
        id: &DepartmentId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        let mut department = self.require(id).await?;

        if department.add_employee(employee_id.clone()) {
            self.storage.update(department).await?;
        }

        Ok(())
    }

    async fn remove_member(
        &self,
        id: &DepartmentId,
        employee_id: &EmployeeId,
    ) -> Result<bool, DomainError> {
        let Some(mut department) = self.storage.get(id).await? else {
            return Ok(false);
        };

        if department.remove_employee(employee_id) {
            self.storage.update(department).await?;
        }

        Ok(true)
    }

    async fn replace_members(
        &self,
        id: &DepartmentId,
        members: BTreeSet<EmployeeId>,
    ) -> Result<(), DomainError> {
        let mut department = self.require(id).await?;
        department.replace_employees(members);
        self.storage.update(department).await?;
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.storage.clear().await
    }
}
