//! Employee entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;
use super::validation::{validate_employee_id, EmployeeValidationError};
use crate::domain::department::DepartmentId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Employee identifier - UUID string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Parse an EmployeeId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let id = id.into();
        validate_employee_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = EmployeeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for EmployeeId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Employee entity
///
/// The password hash is part of the stored document but must never be copied
/// into an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    surname: String,
    email: String,
    /// Argon2 PHC string
    password_hash: String,
    #[serde(default)]
    role: Role,
    /// Source of truth for department membership
    #[serde(default)]
    department: Option<DepartmentId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Employee {
    /// Create a new employee
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
        department: Option<DepartmentId>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            department,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> Option<&DepartmentId> {
        self.department.as_ref()
    }

    pub fn belongs_to(&self, department: &DepartmentId) -> bool {
        self.department.as_ref() == Some(department)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_surname(&mut self, surname: impl Into<String>) {
        self.surname = surname.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.touch();
    }

    /// Point the employee at another department (or none).
    ///
    /// Returns the previous reference so the caller can fix up member sets.
    pub fn set_department(&mut self, department: Option<DepartmentId>) -> Option<DepartmentId> {
        let previous = std::mem::replace(&mut self.department, department);
        if previous != self.department {
            self.touch();
        }
        previous
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Employee {
    type Key = EmployeeId;
    const COLLECTION: &'static str = "employees";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane(department: Option<DepartmentId>) -> Employee {
        Employee::new(
            EmployeeId::generate(),
            "Jane",
            "Doe",
            "jane@x.com",
            "$argon2id$hash",
            Role::Employee,
            department,
        )
    }

    #[test]
    fn test_employee_id_valid() {
        let id = EmployeeId::generate();
        assert_eq!(EmployeeId::new(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_employee_id_invalid() {
        assert!(EmployeeId::new("").is_err());
        assert!(EmployeeId::new("jane").is_err());
    }

    #[test]
    fn test_employee_creation() {
        let employee = jane(None);

        assert_eq!(employee.name(), "Jane");
        assert_eq!(employee.surname(), "Doe");
        assert_eq!(employee.full_name(), "Jane Doe");
        assert_eq!(employee.email(), "jane@x.com");
        assert_eq!(employee.role(), Role::Employee);
        assert!(employee.department().is_none());
    }

    #[test]
    fn test_set_department_returns_previous() {
        let first = DepartmentId::generate();
        let second = DepartmentId::generate();
        let mut employee = jane(Some(first.clone()));

        let previous = employee.set_department(Some(second.clone()));
        assert_eq!(previous, Some(first.clone()));
        assert!(employee.belongs_to(&second));
        assert!(!employee.belongs_to(&first));

        let previous = employee.set_department(None);
        assert_eq!(previous, Some(second));
        assert!(employee.department().is_none());
    }

    #[test]
    fn test_touch_on_update() {
        let mut employee = jane(None);
        let original = employee.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        employee.set_role(Role::Manager);
        assert_eq!(employee.role(), Role::Manager);
        assert!(employee.updated_at() > original);
    }

    #[test]
    fn test_document_roundtrip() {
        let department = DepartmentId::generate();
        let employee = jane(Some(department.clone()));

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["role"], "employee");
        assert_eq!(json["department"], department.as_str());

        let restored: Employee = serde_json::from_value(json).unwrap();
        assert_eq!(restored.id(), employee.id());
        assert_eq!(restored.password_hash(), "$argon2id$hash");
    }

    #[test]
    fn test_document_without_optional_fields() {
        let json = serde_json::json!({
            "id": EmployeeId::generate().as_str(),
            "name": "John",
            "surname": "Dudley",
            "email": "john.dudley@dentist.com",
            "password_hash": "hash",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        });

        let employee: Employee = serde_json::from_value(json).unwrap();
        assert_eq!(employee.role(), Role::Employee);
        assert!(employee.department().is_none());
    }
}
