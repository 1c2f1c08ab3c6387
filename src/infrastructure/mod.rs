//! Infrastructure layer - storage backends, services and background work

pub mod auth;
pub mod department;
pub mod employee;
pub mod logging;
pub mod membership;
pub mod seed;
pub mod storage;
