//! Employee request and response bodies

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::department::DepartmentId;
use crate::domain::employee::{Employee, Role};
use crate::infrastructure::employee::{CreateEmployeeRequest, UpdateEmployeeRequest};

/// Body for register and create
///
/// Missing fields deserialize as empty strings so they fail validation with
/// a 400 rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateEmployeeBody {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub department: Option<String>,
}

impl From<CreateEmployeeBody> for CreateEmployeeRequest {
    fn from(body: CreateEmployeeBody) -> Self {
        Self {
            name: body.name,
            surname: body.surname,
            email: body.email,
            password: body.password,
            role: body.role,
            department: body.department,
        }
    }
}

/// Partial update body; `"department": null` clears the department
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeBody {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub department: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent field
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateEmployeeBody> for UpdateEmployeeRequest {
    fn from(body: UpdateEmployeeBody) -> Self {
        Self {
            name: body.name,
            surname: body.surname,
            email: body.email,
            password: body.password,
            role: body.role,
            department: body.department,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListQuery {
    pub department: Option<String>,
}

/// Department reference expanded with its name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: String,
    /// `None` when the reference dangles
    pub name: Option<String>,
}

/// Employee as returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
    pub department: Option<DepartmentRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeResponse {
    pub fn new(employee: &Employee, department_names: &HashMap<DepartmentId, String>) -> Self {
        Self {
            id: employee.id().to_string(),
            name: employee.name().to_string(),
            surname: employee.surname().to_string(),
            email: employee.email().to_string(),
            role: employee.role(),
            department: employee.department().map(|id| DepartmentRef {
                id: id.to_string(),
                name: department_names.get(id).cloned(),
            }),
            created_at: employee.created_at(),
            updated_at: employee.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeEnvelope {
    pub message: String,
    pub employee: EmployeeResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
    pub id: String,
}
