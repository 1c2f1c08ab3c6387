//! Write-side coordinator for employee and department mutations
//!
//! Every mutation that can touch a department's member set runs while holding
//! the manager's write gate, so the "write employee, then fix member sets"
//! sequence never interleaves with another one inside this process. Readers
//! go straight to the repositories and may observe the state between the two
//! steps.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::department::{Department, DepartmentId, DepartmentRepository};
use crate::domain::employee::{Employee, EmployeeId, EmployeeRepository};
use crate::domain::membership::{derive_memberships, MembershipChange, MembershipDrift, ReconcileReport};
use crate::domain::DomainError;

pub struct MembershipManager {
    employees: Arc<dyn EmployeeRepository>,
    departments: Arc<dyn DepartmentRepository>,
    gate: Mutex<()>,
}

impl std::fmt::Debug for MembershipManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipManager").finish_non_exhaustive()
    }
}

impl MembershipManager {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            employees,
            departments,
            gate: Mutex::new(()),
        }
    }

    pub fn employees(&self) -> &Arc<dyn EmployeeRepository> {
        &self.employees
    }

    pub fn departments(&self) -> &Arc<dyn DepartmentRepository> {
        &self.departments
    }

    /// Persist a new employee and add it to its department's member set.
    ///
    /// A department that does not exist is rejected before anything is written.
    pub async fn create_employee(&self, employee: Employee) -> Result<Employee, DomainError> {
        let _gate = self.gate.lock().await;

        self.require_department(employee.department()).await?;

        let created = self.employees.create(employee).await?;
        let change = MembershipChange::joining(created.department());
        self.apply(created.id(), &change).await?;

        debug!(employee_id = %created.id(), department = ?created.department(), "Employee joined");
        Ok(created)
    }

    /// Load an employee, let `edit` mutate it, persist it and move its
    /// membership if the department reference changed.
    ///
    /// `edit` may reject the change (for example on a permission check); in
    /// that case nothing is written.
    pub async fn update_employee<F>(&self, id: &EmployeeId, edit: F) -> Result<Employee, DomainError>
    where
        F: FnOnce(&mut Employee) -> Result<(), DomainError> + Send,
    {
        let _gate = self.gate.lock().await;

        let mut employee = self
            .employees
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Employee '{}' not found", id)))?;

        let previous = employee.department().cloned();
        edit(&mut employee)?;

        let change = MembershipChange::plan(previous.as_ref(), employee.department());
        self.require_department(change.add_to.as_ref()).await?;

        let updated = self.employees.update(employee).await?;
        self.apply(updated.id(), &change).await?;

        if !change.is_noop() {
            debug!(
                employee_id = %updated.id(),
                from = ?change.remove_from,
                to = ?change.add_to,
                "Employee changed department"
            );
        }

        Ok(updated)
    }

    /// Remove an employee from its department's member set, then delete it.
    ///
    /// `check` runs against the stored record before anything is written.
    pub async fn delete_employee<F>(&self, id: &EmployeeId, check: F) -> Result<Employee, DomainError>
    where
        F: FnOnce(&Employee) -> Result<(), DomainError> + Send,
    {
        let _gate = self.gate.lock().await;

        let employee = self
            .employees
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Employee '{}' not found", id)))?;

        check(&employee)?;

        self.apply(id, &MembershipChange::leaving(employee.department()))
            .await?;
        self.employees.delete(id).await?;

        Ok(employee)
    }

    pub async fn create_department(&self, department: Department) -> Result<Department, DomainError> {
        let _gate = self.gate.lock().await;
        self.departments.create(department).await
    }

    pub async fn rename_department(
        &self,
        id: &DepartmentId,
        name: &str,
    ) -> Result<Department, DomainError> {
        let _gate = self.gate.lock().await;

        let mut department = self
            .departments
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Department '{}' not found", id)))?;

        department
            .set_name(name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.departments.update(department).await
    }

    /// Delete a department no employee references.
    ///
    /// Conflict while any employee still points at it.
    pub async fn delete_department(&self, id: &DepartmentId) -> Result<Department, DomainError> {
        let _gate = self.gate.lock().await;

        let department = self
            .departments
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Department '{}' not found", id)))?;

        let referencing = self.employees.list_by_department(id).await?.len();

        if referencing > 0 {
            return Err(DomainError::conflict(format!(
                "Department '{}' still has {} employee(s); reassign them first",
                department.name(),
                referencing
            )));
        }

        self.departments.delete(id).await?;
        Ok(department)
    }

    /// Rebuild every department's member set from the employees' references.
    ///
    /// References to departments that no longer exist are cleared. With
    /// `dry_run` nothing is written and the report describes what would change.
    pub async fn reconcile(&self, dry_run: bool) -> Result<ReconcileReport, DomainError> {
        let _gate = self.gate.lock().await;

        let departments = self.departments.list().await?;
        let mut employees = self.employees.list().await?;
        let known: HashSet<DepartmentId> = departments.iter().map(|d| d.id().clone()).collect();

        let mut report = ReconcileReport {
            dry_run,
            departments_checked: departments.len(),
            employees_checked: employees.len(),
            ..Default::default()
        };

        for employee in employees.iter_mut() {
            let Some(department) = employee.department().cloned() else {
                continue;
            };

            if known.contains(&department) {
                continue;
            }

            warn!(
                employee_id = %employee.id(),
                department_id = %department,
                dry_run,
                "Employee references a missing department"
            );

            employee.set_department(None);
            if !dry_run {
                self.employees.update(employee.clone()).await?;
            }
            report.record_dangling(employee.id().clone());
        }

        let expected = derive_memberships(&employees);
        let nobody = BTreeSet::new();

        for department in &departments {
            let wanted = expected.get(department.id()).unwrap_or(&nobody);

            let Some(drift) = MembershipDrift::detect(department, wanted) else {
                continue;
            };

            warn!(
                department_id = %department.id(),
                missing = drift.missing.len(),
                stale = drift.stale.len(),
                dry_run,
                "Department member set drifted"
            );

            if !dry_run {
                self.departments
                    .replace_members(department.id(), wanted.clone())
                    .await?;
            }
            report.record_drift(drift);
        }

        info!(
            departments = report.departments_checked,
            repaired = report.departments_repaired,
            dangling = report.dangling_references_cleared,
            dry_run,
            "Membership reconciliation finished"
        );

        Ok(report)
    }

    /// Remove every employee and department
    pub async fn clear_all(&self) -> Result<(), DomainError> {
        let _gate = self.gate.lock().await;

        self.employees.clear().await?;
        self.departments.clear().await?;

        warn!("Cleared all employees and departments");
        Ok(())
    }

    async fn require_department(&self, id: Option<&DepartmentId>) -> Result<(), DomainError> {
        let Some(id) = id else {
            return Ok(());
        };

        if self.departments.get(id).await?.is_none() {
            return Err(DomainError::validation(format!(
                "Department '{}' does not exist",
                id
            )));
        }

        Ok(())
    }

    /// Execute a membership plan. Both set operations are attempted; the
    /// first failure is reported.
    async fn apply(
        &self,
        employee_id: &EmployeeId,
        change: &MembershipChange,
    ) -> Result<(), DomainError> {
        let mut failure = None;

        if let Some(department) = &change.remove_from {
            if let Err(e) = self.departments.remove_member(department, employee_id).await {
                error!(
                    employee_id = %employee_id,
                    department_id = %department,
                    error = %e,
                    "Failed to remove employee from department member set"
                );
                failure.get_or_insert(e);
            }
        }

        if let Some(department) = &change.add_to {
            if let Err(e) = self.departments.add_member(department, employee_id).await {
                error!(
                    employee_id = %employee_id,
                    department_id = %department,
                    error = %e,
                    "Failed to add employee to department member set"
                );
                failure.get_or_insert(e);
            }
        }

        match failure {
            None => Ok(()),
            Some(e) => Err(DomainError::internal(format!(
                "Membership update for employee '{}' failed: {}",
                employee_id, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::department::MockDepartmentRepository;
    use crate::domain::employee::Role;
    use crate::infrastructure::department::StorageDepartmentRepository;
    use crate::infrastructure::employee::StorageEmployeeRepository;
    use crate::infrastructure::storage::InMemoryStorage;

    fn manager() -> MembershipManager {
        MembershipManager::new(
            Arc::new(StorageEmployeeRepository::new(Arc::new(
                InMemoryStorage::<Employee>::new(),
            ))),
            Arc::new(StorageDepartmentRepository::new(Arc::new(
                InMemoryStorage::<Department>::new(),
            ))),
        )
    }

    fn employee(email: &str, department: Option<&DepartmentId>) -> Employee {
        Employee::new(
            EmployeeId::generate(),
            "Jane",
            "Doe",
            email,
            "hash",
            Role::Employee,
            department.cloned(),
        )
    }

    async fn department(manager: &MembershipManager, name: &str) -> Department {
        manager
            .create_department(Department::new(DepartmentId::generate(), name).unwrap())
            .await
            .unwrap()
    }

    async fn members(manager: &MembershipManager, id: &DepartmentId) -> BTreeSet<EmployeeId> {
        manager
            .departments()
            .get(id)
            .await
            .unwrap()
            .unwrap()
            .employees()
            .clone()
    }

    #[tokio::test]
    async fn test_create_employee_joins_department() {
        let manager = manager();
        let ortho = department(&manager, "Orthodontics").await;

        let jane = manager
            .create_employee(employee("jane@x.com", Some(ortho.id())))
            .await
            .unwrap();

        assert!(members(&manager, ortho.id()).await.contains(jane.id()));
    }

    #[tokio::test]
    async fn test_create_employee_with_missing_department_writes_nothing() {
        let manager = manager();
        let missing = DepartmentId::generate();

        let result = manager
            .create_employee(employee("jane@x.com", Some(&missing)))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(manager.employees().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_move_between_departments() {
        let manager = manager();
        let a = department(&manager, "Pediatric Dentistry").await;
        let b = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(a.id())))
            .await
            .unwrap();

        let b_id = b.id().clone();
        let moved = manager
            .update_employee(jane.id(), |e| {
                e.set_department(Some(b_id));
                Ok(())
            })
            .await
            .unwrap();

        assert!(moved.belongs_to(b.id()));
        assert!(!members(&manager, a.id()).await.contains(jane.id()));
        let b_members = members(&manager, b.id()).await;
        assert_eq!(b_members.iter().filter(|id| *id == jane.id()).count(), 1);
    }

    #[tokio::test]
    async fn test_update_without_department_change_leaves_sets_alone() {
        let manager = manager();
        let ortho = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(ortho.id())))
            .await
            .unwrap();
        let before = manager.departments().get(ortho.id()).await.unwrap().unwrap();

        manager
            .update_employee(jane.id(), |e| {
                e.set_surname("Smith");
                Ok(())
            })
            .await
            .unwrap();

        let after = manager.departments().get(ortho.id()).await.unwrap().unwrap();
        assert_eq!(before.updated_at(), after.updated_at());
        assert!(after.has_employee(jane.id()));
    }

    #[tokio::test]
    async fn test_clearing_department_removes_membership() {
        let manager = manager();
        let ortho = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(ortho.id())))
            .await
            .unwrap();

        manager
            .update_employee(jane.id(), |e| {
                e.set_department(None);
                Ok(())
            })
            .await
            .unwrap();

        assert!(members(&manager, ortho.id()).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_to_missing_department_is_rejected() {
        let manager = manager();
        let ortho = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(ortho.id())))
            .await
            .unwrap();

        let result = manager
            .update_employee(jane.id(), |e| {
                e.set_department(Some(DepartmentId::generate()));
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        let stored = manager.employees().get(jane.id()).await.unwrap().unwrap();
        assert!(stored.belongs_to(ortho.id()));
    }

    #[tokio::test]
    async fn test_rejected_edit_writes_nothing() {
        let manager = manager();
        let jane = manager
            .create_employee(employee("jane@x.com", None))
            .await
            .unwrap();

        let result = manager
            .update_employee(jane.id(), |e| {
                e.set_role(Role::Admin);
                Err(DomainError::forbidden("nope"))
            })
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
        let stored = manager.employees().get(jane.id()).await.unwrap().unwrap();
        assert_eq!(stored.role(), Role::Employee);
    }

    #[tokio::test]
    async fn test_delete_employee_leaves_department() {
        let manager = manager();
        let ortho = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(ortho.id())))
            .await
            .unwrap();

        manager.delete_employee(jane.id(), |_| Ok(())).await.unwrap();

        assert!(members(&manager, ortho.id()).await.is_empty());
        assert!(manager.employees().get(jane.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_employee_is_not_found() {
        let manager = manager();
        let result = manager
            .delete_employee(&EmployeeId::generate(), |_| Ok(()))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_referenced_department_conflicts() {
        let manager = manager();
        let ortho = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(ortho.id())))
            .await
            .unwrap();

        let result = manager.delete_department(ortho.id()).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        manager.delete_employee(jane.id(), |_| Ok(())).await.unwrap();
        manager.delete_department(ortho.id()).await.unwrap();
        assert!(manager.departments().get(ortho.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rename_department() {
        let manager = manager();
        let surgery = department(&manager, "Surgery Dentistry").await;

        let renamed = manager
            .rename_department(surgery.id(), "Oral Surgery")
            .await
            .unwrap();
        assert_eq!(renamed.name(), "Oral Surgery");

        let result = manager.rename_department(surgery.id(), "4").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_reconcile_repairs_corrupted_sets() {
        let manager = manager();
        let a = department(&manager, "General Dentistry").await;
        let b = department(&manager, "Orthodontics").await;
        let jane = manager
            .create_employee(employee("jane@x.com", Some(a.id())))
            .await
            .unwrap();

        // Corrupt by hand: Jane listed in B, missing from A
        manager
            .departments()
            .replace_members(a.id(), BTreeSet::new())
            .await
            .unwrap();
        manager.departments().add_member(b.id(), jane.id()).await.unwrap();

        let preview = manager.reconcile(true).await.unwrap();
        assert!(preview.dry_run);
        assert_eq!(preview.departments_repaired, 2);
        assert!(members(&manager, a.id()).await.is_empty());

        let report = manager.reconcile(false).await.unwrap();
        assert_eq!(report.departments_checked, 2);
        assert_eq!(report.missing_members_added, 1);
        assert_eq!(report.stale_members_removed, 1);
        assert!(members(&manager, a.id()).await.contains(jane.id()));
        assert!(members(&manager, b.id()).await.is_empty());

        assert!(manager.reconcile(false).await.unwrap().is_consistent());
    }

    #[tokio::test]
    async fn test_reconcile_clears_dangling_references() {
        let manager = manager();
        let ghost = DepartmentId::generate();
        let jane = employee("jane@x.com", Some(&ghost));
        manager.employees().create(jane.clone()).await.unwrap();

        let report = manager.reconcile(false).await.unwrap();

        assert_eq!(report.dangling_references_cleared, 1);
        assert_eq!(report.dangling, vec![jane.id().clone()]);
        let stored = manager.employees().get(jane.id()).await.unwrap().unwrap();
        assert!(stored.department().is_none());
    }

    #[tokio::test]
    async fn test_member_set_failure_surfaces_as_internal() {
        let ortho = Department::new(DepartmentId::generate(), "Orthodontics").unwrap();
        let ortho_id = ortho.id().clone();

        let mut departments = MockDepartmentRepository::new();
        departments
            .expect_get()
            .returning(move |_| Ok(Some(ortho.clone())));
        departments
            .expect_add_member()
            .returning(|_, _| Err(DomainError::storage("connection reset")));

        let employees = Arc::new(StorageEmployeeRepository::new(Arc::new(
            InMemoryStorage::<Employee>::new(),
        )));
        let manager = MembershipManager::new(employees.clone(), Arc::new(departments));

        let jane = employee("jane@x.com", Some(&ortho_id));
        let result = manager.create_employee(jane.clone()).await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
        // The employee write is not rolled back
        assert!(employees.get(jane.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_both_set_operations_attempted_on_move() {
        let a = DepartmentId::generate();
        let b = Department::new(DepartmentId::generate(), "Orthodontics").unwrap();
        let b_id = b.id().clone();

        let mut departments = MockDepartmentRepository::new();
        departments.expect_get().returning(move |_| Ok(Some(b.clone())));
        departments
            .expect_remove_member()
            .times(1)
            .returning(|_, _| Err(DomainError::storage("timeout")));
        departments
            .expect_add_member()
            .times(1)
            .returning(|_, _| Ok(()));

        let employees = Arc::new(StorageEmployeeRepository::new(Arc::new(
            InMemoryStorage::<Employee>::new(),
        )));
        let jane = employee("jane@x.com", Some(&a));
        employees.create(jane.clone()).await.unwrap();

        let manager = MembershipManager::new(employees, Arc::new(departments));
        let result = manager
            .update_employee(jane.id(), |e| {
                e.set_department(Some(b_id));
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_moves_keep_sets_consistent() {
        let manager = Arc::new(manager());
        let a = department(&manager, "General Dentistry").await;
        let b = department(&manager, "Orthodontics").await;

        let mut ids = Vec::new();
        for i in 0..10 {
            let created = manager
                .create_employee(employee(&format!("e{}@x.com", i), Some(a.id())))
                .await
                .unwrap();
            ids.push(created.id().clone());
        }

        let mut handles = Vec::new();
        for id in ids.clone() {
            let manager = manager.clone();
            let target = b.id().clone();
            handles.push(tokio::spawn(async move {
                manager
                    .update_employee(&id, |e| {
                        e.set_department(Some(target));
                        Ok(())
                    })
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(members(&manager, a.id()).await.is_empty());
        assert_eq!(members(&manager, b.id()).await.len(), 10);
        assert!(manager.reconcile(true).await.unwrap().is_consistent());
    }
}
