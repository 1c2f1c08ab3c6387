//! Application state shared by every handler

use std::sync::Arc;

use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::department::DepartmentService;
use crate::infrastructure::employee::EmployeeService;
use crate::infrastructure::membership::MembershipManager;

/// Services behind the HTTP layer
#[derive(Clone)]
pub struct AppState {
    pub employee_service: Arc<EmployeeService>,
    pub department_service: Arc<DepartmentService>,
    pub membership: Arc<MembershipManager>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

impl AppState {
    pub fn new(
        employee_service: Arc<EmployeeService>,
        department_service: Arc<DepartmentService>,
        membership: Arc<MembershipManager>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            employee_service,
            department_service,
            membership,
            jwt_service,
        }
    }
}
