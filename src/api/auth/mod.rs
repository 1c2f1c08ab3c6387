//! Authentication API endpoints
//!
//! Registration, login and the current-employee lookup.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::employees::employee_response;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::employee::{CreateEmployeeBody, EmployeeEnvelope, EmployeeResponse};
use crate::api::types::{ApiError, Json};
use crate::domain::employee::Role;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_current_employee))
}

/// Login request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub employee: EmployeeResponse,
}

/// Register a new employee
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeBody>,
) -> Result<(StatusCode, Json<EmployeeEnvelope>), ApiError> {
    let employee = state.employee_service.register(body.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeEnvelope {
            message: "Employee registered successfully".to_string(),
            employee: employee_response(&state, &employee).await?,
        }),
    ))
}

/// Login with email and password
///
/// POST /auth/login
///
/// Wrong credentials answer 400 and issue no token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let employee = state
        .employee_service
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid email or password"))?;

    let issued = state.jwt_service.generate(&employee)?;

    info!(employee_id = %employee.id(), role = %employee.role(), "Employee logged in");

    Ok(Json(LoginResponse {
        token: issued.token,
        role: employee.role(),
        expires_at: issued.expires_at,
        employee: employee_response(&state, &employee).await?,
    }))
}

/// GET /auth/me
pub async fn get_current_employee(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = state
        .employee_service
        .get_by_id(&user.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(employee_response(&state, &employee).await?))
}
