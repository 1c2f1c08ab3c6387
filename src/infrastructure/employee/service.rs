//! Employee service - validation, access rules and credential checks

use std::sync::Arc;

use tracing::{debug, info};

use super::password::PasswordHasher;
use crate::domain::department::DepartmentId;
use crate::domain::employee::{
    validate_email, validate_password, validate_person_name, Employee, EmployeeId, Role,
};
use crate::domain::DomainError;
use crate::infrastructure::membership::MembershipManager;

/// Request for creating an employee
#[derive(Debug, Clone, Default)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Partial update of an employee
///
/// `department: Some(None)` (or an empty id) clears the department.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub department: Option<Option<String>>,
}

/// Employee service
#[derive(Debug)]
pub struct EmployeeService {
    membership: Arc<MembershipManager>,
    hasher: Arc<dyn PasswordHasher>,
}

impl EmployeeService {
    pub fn new(membership: Arc<MembershipManager>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { membership, hasher }
    }

    /// Public self-registration; only plain employee accounts
    pub async fn register(&self, request: CreateEmployeeRequest) -> Result<Employee, DomainError> {
        let role = parse_role(request.role.as_deref())?;
        if role > Role::Employee {
            return Err(DomainError::forbidden(
                "Self-registration creates employee accounts only; ask a manager or admin",
            ));
        }
        info!(email = %request.email.trim(), role = %role, "Registering employee");

        self.insert(request, role).await
    }

    /// Create an employee on behalf of a logged-in manager or admin
    pub async fn create(
        &self,
        acting: Role,
        request: CreateEmployeeRequest,
    ) -> Result<Employee, DomainError> {
        let role = parse_role(request.role.as_deref())?;
        authorize(acting, &[role])?;
        info!(email = %request.email.trim(), role = %role, acting = %acting, "Creating employee");

        self.insert(request, role).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Employee>, DomainError> {
        let employee_id = parse_employee_id(id)?;
        self.get_by_id(&employee_id).await
    }

    pub async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        self.membership.employees().get(id).await
    }

    /// List employees, optionally only those referencing `department`
    pub async fn list(&self, department: Option<&str>) -> Result<Vec<Employee>, DomainError> {
        match department.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => {
                let department_id = DepartmentId::new(raw)
                    .map_err(|e| DomainError::invalid_id(e.to_string()))?;
                self.membership
                    .employees()
                    .list_by_department(&department_id)
                    .await
            }
            None => self.membership.employees().list().await,
        }
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.membership.employees().count().await
    }

    /// Partially update an employee, moving its membership when the
    /// department changes
    pub async fn update(
        &self,
        acting: Role,
        id: &str,
        request: UpdateEmployeeRequest,
    ) -> Result<Employee, DomainError> {
        let employee_id = parse_employee_id(id)?;
        info!(id = %employee_id, acting = %acting, "Updating employee");

        let name = request.name.map(|v| v.trim().to_string());
        if let Some(name) = &name {
            validate_person_name("name", name).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let surname = request.surname.map(|v| v.trim().to_string());
        if let Some(surname) = &surname {
            validate_person_name("surname", surname)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let email = request.email.map(|v| v.trim().to_string());
        if let Some(email) = &email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let password_hash = match request.password.as_deref() {
            Some(password) => {
                validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        // Blank role leaves the stored one untouched
        let role = request
            .role
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.parse::<Role>().map_err(DomainError::validation))
            .transpose()?;

        let department = request
            .department
            .map(|raw| parse_department(raw.as_deref()))
            .transpose()?;

        self.membership
            .update_employee(&employee_id, move |employee| {
                let new_role = role.unwrap_or(employee.role());
                authorize(acting, &[employee.role(), new_role])?;

                if let Some(name) = name {
                    employee.set_name(name);
                }
                if let Some(surname) = surname {
                    employee.set_surname(surname);
                }
                if let Some(email) = email {
                    employee.set_email(email);
                }
                if let Some(hash) = password_hash {
                    employee.set_password_hash(hash);
                }
                if let Some(role) = role {
                    employee.set_role(role);
                }
                if let Some(department) = department {
                    employee.set_department(department);
                }

                Ok(())
            })
            .await
    }

    /// Delete an employee, returning the removed record
    pub async fn delete(&self, acting: Role, id: &str) -> Result<Employee, DomainError> {
        let employee_id = parse_employee_id(id)?;
        info!(id = %employee_id, acting = %acting, "Deleting employee");

        self.membership
            .delete_employee(&employee_id, |employee| authorize(acting, &[employee.role()]))
            .await
    }

    /// Check credentials; `None` when the email is unknown or the password wrong
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Employee>, DomainError> {
        let Some(employee) = self.membership.employees().get_by_email(email.trim()).await? else {
            debug!("Login attempt for unknown email");
            return Ok(None);
        };

        if !self.hasher.verify(password, employee.password_hash()) {
            debug!(id = %employee.id(), "Login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(employee))
    }

    async fn insert(&self, request: CreateEmployeeRequest, role: Role) -> Result<Employee, DomainError> {
        let name = request.name.trim();
        let surname = request.surname.trim();
        let email = request.email.trim();

        validate_person_name("name", name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_person_name("surname", surname)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        let department = parse_department(request.department.as_deref())?;
        let password_hash = self.hasher.hash(&request.password)?;

        let employee = Employee::new(
            EmployeeId::generate(),
            name,
            surname,
            email,
            password_hash,
            role,
            department,
        );

        self.membership.create_employee(employee).await
    }
}

/// Managers and admins may write employees; only admins may touch admin accounts
fn authorize(acting: Role, touched: &[Role]) -> Result<(), DomainError> {
    if !acting.satisfies(Role::Manager) {
        return Err(DomainError::forbidden(
            "Only managers and admins can modify employees",
        ));
    }

    if !acting.satisfies(Role::Admin) && touched.contains(&Role::Admin) {
        return Err(DomainError::forbidden(
            "Only admins can create, promote or modify admin accounts",
        ));
    }

    Ok(())
}

fn parse_employee_id(id: &str) -> Result<EmployeeId, DomainError> {
    EmployeeId::new(id.trim()).map_err(|e| DomainError::invalid_id(e.to_string()))
}

fn parse_role(raw: Option<&str>) -> Result<Role, DomainError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => raw.parse().map_err(DomainError::validation),
        None => Ok(Role::default()),
    }
}

/// Empty or missing ids mean "no department"
fn parse_department(raw: Option<&str>) -> Result<Option<DepartmentId>, DomainError> {
    match raw.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => DepartmentId::new(raw)
            .map(Some)
            .map_err(|e| DomainError::validation(e.to_string())),
        None => Ok(None),
    }
}
