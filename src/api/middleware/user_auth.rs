//! Bearer token authentication and role checks

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::employee::{Employee, EmployeeId, Role};

/// The employee behind a validated token, with the role read from storage
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: EmployeeId,
    pub role: Role,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn require(&self, role: Role) -> Result<(), ApiError> {
        if self.role.satisfies(role) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "This action requires the '{}' role",
                role
            )))
        }
    }
}

impl From<&Employee> for AuthenticatedUser {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id().clone(),
            role: employee.role(),
            email: employee.email().to_string(),
        }
    }
}

/// Any logged-in employee
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthenticatedUser);

/// Logged-in manager or admin
#[derive(Debug, Clone)]
pub struct RequireManager(pub AuthenticatedUser);

/// Logged-in admin
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, state).await.map(RequireUser)
    }
}

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(&parts.headers, state).await?;
        user.require(Role::Manager)?;
        Ok(RequireManager(user))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(&parts.headers, state).await?;
        user.require(Role::Admin)?;
        Ok(RequireAdmin(user))
    }
}

/// Validate the bearer token and load the employee it names
async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthenticatedUser, ApiError> {
    let token = extract_jwt_token(headers)?;

    let claims = state
        .jwt_service
        .validate(&token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let id = EmployeeId::new(claims.employee_id())
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let employee = state
        .employee_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    debug!(employee_id = %id, role = %employee.role(), "Authenticated request");

    Ok(AuthenticatedUser::from(&employee))
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::unauthorized(
                "Authentication required. Provide a token via 'Authorization: Bearer <token>'",
            )
        })?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Authorization header must use the Bearer scheme"))?;

    Ok(token.to_string())
}
