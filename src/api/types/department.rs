//! Department request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::department::Department;
use crate::domain::employee::{Employee, Role};
use crate::infrastructure::department::DepartmentDetail;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepartmentBody {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentListQuery {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub employees: Vec<String>,
    pub employee_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id().to_string(),
            name: department.name().to_string(),
            employees: department.employees().iter().map(|id| id.to_string()).collect(),
            employee_count: department.employee_count(),
            created_at: department.created_at(),
            updated_at: department.updated_at(),
        }
    }
}

/// Member summary in the department detail view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
}

impl From<&Employee> for MemberSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id().to_string(),
            name: employee.name().to_string(),
            surname: employee.surname().to_string(),
            email: employee.email().to_string(),
            role: employee.role(),
        }
    }
}

/// Detail view; `employee_count` is the stored set size, as in the list view,
/// so ids without a matching employee still count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDetailResponse {
    pub id: String,
    pub name: String,
    pub employees: Vec<MemberSummary>,
    pub employee_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&DepartmentDetail> for DepartmentDetailResponse {
    fn from(detail: &DepartmentDetail) -> Self {
        Self {
            id: detail.department.id().to_string(),
            name: detail.department.name().to_string(),
            employees: detail.members.iter().map(MemberSummary::from).collect(),
            employee_count: detail.department.employee_count(),
            created_at: detail.department.created_at(),
            updated_at: detail.department.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentEnvelope {
    pub message: String,
    pub department: DepartmentResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::department::DepartmentId;
    use crate::domain::employee::EmployeeId;

    #[test]
    fn test_detail_and_list_agree_on_count_with_dangling_member() {
        let mut department = Department::new(DepartmentId::generate(), "Orthodontics").unwrap();
        let jane = Employee::new(
            EmployeeId::generate(),
            "Jane",
            "Doe",
            "jane@x.com",
            "$argon2id$hash",
            Role::Employee,
            Some(department.id().clone()),
        );
        department.add_employee(jane.id().clone());
        department.add_employee(EmployeeId::generate());

        let detail = DepartmentDetail {
            department: department.clone(),
            members: vec![jane],
        };

        let listed = DepartmentResponse::from(&department);
        let shown = DepartmentDetailResponse::from(&detail);

        assert_eq!(listed.employee_count, 2);
        assert_eq!(shown.employee_count, listed.employee_count);
        assert_eq!(shown.employees.len(), 1);
        assert_eq!(shown.employees[0].name, "Jane");
    }
}
