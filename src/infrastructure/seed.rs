//! Demo dataset for a dental clinic

use std::collections::HashMap;

use tracing::info;

use super::department::DepartmentService;
use super::employee::{CreateEmployeeRequest, EmployeeService};
use super::membership::MembershipManager;
use crate::domain::{DomainError, Role};

/// Password shared by every seeded account
pub const DEMO_PASSWORD: &str = "password123";

const DEPARTMENTS: [&str; 5] = [
    "General Dentistry",
    "Pediatric Dentistry",
    "Restorative Dentistry",
    "Surgery Dentistry",
    "Orthodontics",
];

/// (name, surname, email, role, department)
const EMPLOYEES: [(&str, &str, &str, &str, &str); 11] = [
    ("Admin", "System", "admin@dentist.com", "admin", "General Dentistry"),
    ("Alfred", "Christensen", "alfred.christensen@dentist.com", "manager", "General Dentistry"),
    ("John", "Dudley", "john.dudley@dentist.com", "employee", "General Dentistry"),
    ("Janet", "Doe", "janet.doe@dentist.com", "employee", "General Dentistry"),
    ("Francisco", "Willard", "francisco.willard@dentist.com", "manager", "Pediatric Dentistry"),
    ("Sarah", "Alvarez", "sarah.alvarez@dentist.com", "employee", "Pediatric Dentistry"),
    ("Lisa", "Harris", "lisa.harris@dentist.com", "manager", "Restorative Dentistry"),
    ("Danny", "Perez", "danny.perez@dentist.com", "employee", "Restorative Dentistry"),
    ("Constance", "Smith", "constance.smith@dentist.com", "manager", "Surgery Dentistry"),
    ("Leslie", "Roche", "leslie.roche@dentist.com", "manager", "Orthodontics"),
    ("Travis", "Combs", "travis.combs@dentist.com", "employee", "Orthodontics"),
];

/// What the seeder wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub departments: usize,
    pub employees: usize,
}

/// Wipe both collections and load the demo dataset.
///
/// Employees are created through the membership manager so every
/// department's member set matches.
pub async fn seed_demo_data(
    membership: &MembershipManager,
    departments: &DepartmentService,
    employees: &EmployeeService,
) -> Result<SeedSummary, DomainError> {
    membership.clear_all().await?;

    let mut ids = HashMap::new();
    for name in DEPARTMENTS {
        let department = departments.create(name).await?;
        ids.insert(name, department.id().to_string());
    }

    for (name, surname, email, role, department) in EMPLOYEES {
        employees
            .create(Role::Admin, CreateEmployeeRequest {
                name: name.to_string(),
                surname: surname.to_string(),
                email: email.to_string(),
                password: DEMO_PASSWORD.to_string(),
                role: Some(role.to_string()),
                department: ids.get(department).cloned(),
            })
            .await?;
    }

    let summary = SeedSummary {
        departments: DEPARTMENTS.len(),
        employees: EMPLOYEES.len(),
    };

    info!(
        departments = summary.departments,
        employees = summary.employees,
        "Demo data seeded"
    );

    Ok(summary)
}
