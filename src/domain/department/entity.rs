//! Department entity and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_department_id, validate_department_name, DepartmentValidationError};
use crate::domain::employee::EmployeeId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Department identifier - UUID string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Parse a DepartmentId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DepartmentValidationError> {
        let id = id.into();
        validate_department_id(&id)?;
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

impl TryFrom<String> for DepartmentId {
    type Error = DepartmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DepartmentId> for String {
    fn from(id: DepartmentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for DepartmentId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Department entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
    /// Employees currently claimed as members; derived from `Employee::department`
    #[serde(default)]
    employees: BTreeSet<EmployeeId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Department {
    /// Create a new department with no members
    pub fn new(id: DepartmentId, name: impl Into<String>) -> Result<Self, DepartmentValidationError> {
        let name = name.into();
        validate_department_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name: name.trim().to_string(),
            employees: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &DepartmentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn employees(&self) -> &BTreeSet<EmployeeId> {
        &self.employees
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub fn has_employee(&self, id: &EmployeeId) -> bool {
        self.employees.contains(id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Rename the department
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DepartmentValidationError> {
        let name = name.into();
        validate_department_name(&name)?;
        self.name = name.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Add an employee to the member set, returns false if already present
    pub fn add_employee(&mut self, id: EmployeeId) -> bool {
        let added = self.employees.insert(id);
        if added {
            self.touch();
        }
        added
    }

    /// Remove an employee from the member set, returns false if absent
    pub fn remove_employee(&mut self, id: &EmployeeId) -> bool {
        let removed = self.employees.remove(id);
        if removed {
            self.touch();
        }
        removed
    }

    /// Replace the whole member set
    pub fn replace_employees(&mut self, employees: BTreeSet<EmployeeId>) {
        if self.employees != employees {
            self.employees = employees;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Department {
    type Key = DepartmentId;
    const COLLECTION: &'static str = "departments";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
