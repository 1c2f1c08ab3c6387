//! Domain layer - Core business logic and entities

pub mod department;
pub mod employee;
pub mod error;
pub mod membership;
pub mod storage;

pub use department::{Department, DepartmentId, DepartmentRepository};
pub use employee::{Employee, EmployeeId, EmployeeRepository, Role};
pub use error::DomainError;
pub use membership::{MembershipChange, ReconcileReport};
pub use storage::{Storage, StorageEntity, StorageKey};
