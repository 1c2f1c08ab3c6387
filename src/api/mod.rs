//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod maintenance;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
