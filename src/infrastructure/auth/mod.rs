//! Authentication infrastructure
//!
//! Bearer token issuance and validation for logged-in employees.

mod jwt;

pub use jwt::{IssuedToken, JwtClaims, JwtConfig, JwtGenerator, JwtService};
