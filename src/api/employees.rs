//! Employee CRUD endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};

use super::middleware::{RequireManager, RequireUser};
use super::state::AppState;
use super::types::employee::{
    CreateEmployeeBody, DeletedResponse, EmployeeEnvelope, EmployeeListQuery, EmployeeResponse,
    UpdateEmployeeBody,
};
use super::types::{ApiError, Json};
use crate::domain::employee::Employee;

pub fn create_employees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// Project one employee, resolving its department name
pub(crate) async fn employee_response(
    state: &AppState,
    employee: &Employee,
) -> Result<EmployeeResponse, ApiError> {
    let mut names = HashMap::new();

    if let Some(department_id) = employee.department() {
        if let Some(department) = state
            .membership
            .departments()
            .get(department_id)
            .await?
        {
            names.insert(department_id.clone(), department.name().to_string());
        }
    }

    Ok(EmployeeResponse::new(employee, &names))
}

/// GET /employees
pub async fn list_employees(
    State(state): State<AppState>,
    _user: RequireUser,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let filter = query.department.as_deref().filter(|d| !d.trim().is_empty());
    let employees = state.employee_service.list(filter).await?;
    let names = state.department_service.names().await?;

    Ok(Json(
        employees
            .iter()
            .map(|employee| EmployeeResponse::new(employee, &names))
            .collect(),
    ))
}

/// GET /employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    _user: RequireUser,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = state
        .employee_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee '{}' not found", id)))?;

    Ok(Json(employee_response(&state, &employee).await?))
}

/// POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Json(body): Json<CreateEmployeeBody>,
) -> Result<(StatusCode, Json<EmployeeEnvelope>), ApiError> {
    let employee = state.employee_service.create(user.role, body.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeEnvelope {
            message: "Employee created successfully".to_string(),
            employee: employee_response(&state, &employee).await?,
        }),
    ))
}

/// PUT /employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<String>,
    Json(body): Json<UpdateEmployeeBody>,
) -> Result<Json<EmployeeEnvelope>, ApiError> {
    let employee = state
        .employee_service
        .update(user.role, &id, body.into())
        .await?;

    Ok(Json(EmployeeEnvelope {
        message: "Employee updated successfully".to_string(),
        employee: employee_response(&state, &employee).await?,
    }))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let employee = state.employee_service.delete(user.role, &id).await?;

    Ok(Json(DeletedResponse {
        message: "Employee deleted successfully".to_string(),
        id: employee.id().to_string(),
    }))
}
