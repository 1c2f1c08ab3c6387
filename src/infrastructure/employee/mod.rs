//! Employee infrastructure - persistence, credentials and service

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageEmployeeRepository;
pub use service::{CreateEmployeeRequest, EmployeeService, UpdateEmployeeRequest};
