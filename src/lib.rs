//! Staff directory API
//!
//! Employees and departments with a bidirectional membership reference:
//! - `Employee.department` is the source of truth
//! - `Department.employees` is kept in step by the membership manager
//! - a reconciliation sweep repairs any drift between the two

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::storage::Storage;
use domain::{Department, Employee, Role};
use infrastructure::{
    auth::{JwtConfig, JwtGenerator, JwtService},
    department::{DepartmentService, StorageDepartmentRepository},
    employee::{Argon2Hasher, CreateEmployeeRequest, EmployeeService, StorageEmployeeRepository},
    membership::MembershipManager,
    storage::StorageFactory,
};
use rand::Rng;
use tracing::{info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Create the application state with the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.resolve()?;
    info!(backend = ?storage_config.storage_type(), "Opening storage");

    let backend = StorageFactory::open(&storage_config).await?;
    let employee_storage = backend.collection::<Employee>().await?;
    let department_storage = backend.collection::<Department>().await?;

    let jwt_service = create_jwt_service(config);

    Ok(build_app_state(employee_storage, department_storage, jwt_service))
}

/// Wire repositories, the membership manager and services over two collections
pub fn build_app_state(
    employee_storage: Arc<dyn Storage<Employee>>,
    department_storage: Arc<dyn Storage<Department>>,
    jwt_service: Arc<dyn JwtGenerator>,
) -> AppState {
    let membership = Arc::new(MembershipManager::new(
        Arc::new(StorageEmployeeRepository::new(employee_storage)),
        Arc::new(StorageDepartmentRepository::new(department_storage)),
    ));

    let employee_service = Arc::new(EmployeeService::new(
        membership.clone(),
        Arc::new(Argon2Hasher::new()),
    ));
    let department_service = Arc::new(DepartmentService::new(membership.clone()));

    AppState::new(employee_service, department_service, membership, jwt_service)
}

/// Create an admin account when the store has no employees.
///
/// Credentials come from `ADMIN_EMAIL` and `ADMIN_DEFAULT_PASSWORD`; without
/// a password a random one is generated and logged once.
pub async fn ensure_initial_admin(state: &AppState) -> anyhow::Result<()> {
    if state.employee_service.count().await? > 0 {
        return Ok(());
    }

    let email = std::env::var("ADMIN_EMAIL")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

    let (password, is_default) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_random_string(16), false),
    };

    state
        .employee_service
        .create(Role::Admin, CreateEmployeeRequest {
            name: "System".to_string(),
            surname: "Administrator".to_string(),
            email: email.clone(),
            password: password.clone(),
            role: Some(Role::Admin.to_string()),
            department: None,
        })
        .await?;

    info!("===========================================");
    info!("Initial admin account created");
    info!("Email: {}", email);

    if is_default {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }

    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}

/// JWT service from the configured secret, `JWT_SECRET`, or a random one
fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let secret = config.auth.resolve_secret().unwrap_or_else(|| {
        warn!(
            "No JWT_SECRET configured. Generating random secret. \
            Sessions will NOT persist across restarts."
        );
        generate_random_string(64)
    });

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_expiration_hours,
    )))
}

fn generate_random_string(len: usize) -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
