//! Department infrastructure - persistence and service

mod repository;
mod service;

pub use repository::StorageDepartmentRepository;
pub use service::{DepartmentDetail, DepartmentService};
