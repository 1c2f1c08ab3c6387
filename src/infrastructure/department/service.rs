//! Department service

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::department::{validate_department_name, Department, DepartmentId};
use crate::domain::employee::Employee;
use crate::domain::DomainError;
use crate::infrastructure::membership::MembershipManager;

/// A department together with its resolved member records
#[derive(Debug, Clone)]
pub struct DepartmentDetail {
    pub department: Department,
    pub members: Vec<Employee>,
}

/// Department service
#[derive(Debug)]
pub struct DepartmentService {
    membership: Arc<MembershipManager>,
}

impl DepartmentService {
    pub fn new(membership: Arc<MembershipManager>) -> Self {
        Self { membership }
    }

    pub async fn create(&self, name: &str) -> Result<Department, DomainError> {
        info!(name = %name.trim(), "Creating department");

        validate_department_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        let department = Department::new(DepartmentId::generate(), name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.membership.create_department(department).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Department>, DomainError> {
        let department_id = parse_department_id(id)?;
        self.membership.departments().get(&department_id).await
    }

    /// Department plus the employee records in its member set
    pub async fn detail(&self, id: &str) -> Result<Option<DepartmentDetail>, DomainError> {
        let Some(department) = self.get(id).await? else {
            return Ok(None);
        };

        let mut members = Vec::with_capacity(department.employee_count());
        for employee_id in department.employees() {
            match self.membership.employees().get(employee_id).await? {
                Some(employee) => members.push(employee),
                None => warn!(
                    department_id = %department.id(),
                    employee_id = %employee_id,
                    "Member set references a missing employee"
                ),
            }
        }

        members.sort_by(|a, b| a.surname().cmp(b.surname()).then_with(|| a.name().cmp(b.name())));

        Ok(Some(DepartmentDetail {
            department,
            members,
        }))
    }

    /// List departments, optionally filtered by exact (case-insensitive) name
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Department>, DomainError> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Ok(self
                .membership
                .departments()
                .get_by_name(name)
                .await?
                .into_iter()
                .collect()),
            None => self.membership.departments().list().await,
        }
    }

    /// Id to name lookup used to expand employee department references
    pub async fn names(&self) -> Result<HashMap<DepartmentId, String>, DomainError> {
        Ok(self
            .membership
            .departments()
            .list()
            .await?
            .into_iter()
            .map(|d| (d.id().clone(), d.name().to_string()))
            .collect())
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<Department, DomainError> {
        let department_id = parse_department_id(id)?;
        info!(id = %department_id, name = %name.trim(), "Renaming department");

        self.membership.rename_department(&department_id, name).await
    }

    /// Delete a department; Conflict while employees still reference it
    pub async fn delete(&self, id: &str) -> Result<Department, DomainError> {
        let department_id = parse_department_id(id)?;
        info!(id = %department_id, "Deleting department");

        self.membership.delete_department(&department_id).await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.membership.departments().count().await
    }
}

fn parse_department_id(id: &str) -> Result<DepartmentId, DomainError> {
    DepartmentId::new(id.trim()).map_err(|e| DomainError::invalid_id(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::{EmployeeId, Role};
    use crate::infrastructure::department::StorageDepartmentRepository;
    use crate::infrastructure::employee::StorageEmployeeRepository;
    use crate::infrastructure::storage::InMemoryStorage;

    fn setup() -> (DepartmentService, Arc<MembershipManager>) {
        let membership = Arc::new(MembershipManager::new(
            Arc::new(StorageEmployeeRepository::new(Arc::new(
                InMemoryStorage::<Employee>::new(),
            ))),
            Arc::new(StorageDepartmentRepository::new(Arc::new(
                InMemoryStorage::<Department>::new(),
            ))),
        ));
        (DepartmentService::new(membership.clone()), membership)
    }

    fn member(surname: &str, department: &DepartmentId) -> Employee {
        Employee::new(
            EmployeeId::generate(),
            "Alex",
            surname,
            format!("{}@dentist.com", surname.to_lowercase()),
            "hash",
            Role::Employee,
            Some(department.clone()),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _) = setup();

        let ortho = service.create("  Orthodontics ").await.unwrap();
        assert_eq!(ortho.name(), "Orthodontics");

        let found = service.get(ortho.id().as_str()).await.unwrap().unwrap();
        assert_eq!(found.id(), ortho.id());
    }

    #[tokio::test]
    async fn test_create_validation_and_conflict() {
        let (service, _) = setup();

        assert!(matches!(
            service.create("").await,
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            service.create("Dept 42").await,
            Err(DomainError::Validation { .. })
        ));

        service.create("Orthodontics").await.unwrap();
        assert!(matches!(
            service.create("orthodontics").await,
            Err(DomainError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_with_name_filter() {
        let (service, _) = setup();
        service.create("Orthodontics").await.unwrap();
        service.create("Surgery Dentistry").await.unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 2);

        let filtered = service.list(Some("surgery dentistry")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name(), "Surgery Dentistry");

        assert!(service.list(Some("Radiology")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detail_resolves_members() {
        let (service, membership) = setup();
        let ortho = service.create("Orthodontics").await.unwrap();
        membership.create_employee(member("Roche", ortho.id())).await.unwrap();
        membership.create_employee(member("Combs", ortho.id())).await.unwrap();

        let detail = service.detail(ortho.id().as_str()).await.unwrap().unwrap();

        let surnames: Vec<&str> = detail.members.iter().map(|e| e.surname()).collect();
        assert_eq!(surnames, vec!["Combs", "Roche"]);
        assert_eq!(detail.department.employee_count(), 2);
    }

    #[tokio::test]
    async fn test_names_lookup() {
        let (service, _) = setup();
        let ortho = service.create("Orthodontics").await.unwrap();

        let names = service.names().await.unwrap();
        assert_eq!(names.get(ortho.id()).map(String::as_str), Some("Orthodontics"));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let (service, membership) = setup();
        let ortho = service.create("Orthodontics").await.unwrap();
        let travis = membership.create_employee(member("Combs", ortho.id())).await.unwrap();

        assert!(matches!(
            service.delete(ortho.id().as_str()).await,
            Err(DomainError::Conflict { .. })
        ));

        membership.delete_employee(travis.id(), |_| Ok(())).await.unwrap();
        service.delete(ortho.id().as_str()).await.unwrap();

        assert!(matches!(
            service.delete(ortho.id().as_str()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete("nope").await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_rename() {
        let (service, _) = setup();
        let surgery = service.create("Surgery Dentistry").await.unwrap();
        service.create("Orthodontics").await.unwrap();

        let renamed = service.rename(surgery.id().as_str(), "Oral Surgery").await.unwrap();
        assert_eq!(renamed.name(), "Oral Surgery");

        assert!(matches!(
            service.rename(surgery.id().as_str(), "ORTHODONTICS").await,
            Err(DomainError::Conflict { .. })
        ));
    }
}
