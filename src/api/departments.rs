//! Department CRUD endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};

use super::middleware::{RequireAdmin, RequireUser};
use super::state::AppState;
use super::types::department::{
    DepartmentBody, DepartmentDetailResponse, DepartmentEnvelope, DepartmentListQuery,
    DepartmentResponse,
};
use super::types::employee::DeletedResponse;
use super::types::{ApiError, Json};

pub fn create_departments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/{id}",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
}

/// GET /departments
pub async fn list_departments(
    State(state): State<AppState>,
    _user: RequireUser,
    Query(query): Query<DepartmentListQuery>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let filter = query.name.as_deref().filter(|n| !n.trim().is_empty());
    let departments = state.department_service.list(filter).await?;

    Ok(Json(departments.iter().map(DepartmentResponse::from).collect()))
}

/// GET /departments/{id}
pub async fn get_department(
    State(state): State<AppState>,
    _user: RequireUser,
    Path(id): Path<String>,
) -> Result<Json<DepartmentDetailResponse>, ApiError> {
    let detail = state
        .department_service
        .detail(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Department '{}' not found", id)))?;

    Ok(Json(DepartmentDetailResponse::from(&detail)))
}

/// POST /departments
pub async fn create_department(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<DepartmentBody>,
) -> Result<(StatusCode, Json<DepartmentEnvelope>), ApiError> {
    let department = state.department_service.create(&body.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(DepartmentEnvelope {
            message: "Department created successfully".to_string(),
            department: DepartmentResponse::from(&department),
        }),
    ))
}

/// PUT /departments/{id}
pub async fn update_department(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
    Json(body): Json<DepartmentBody>,
) -> Result<Json<DepartmentEnvelope>, ApiError> {
    let department = state.department_service.rename(&id, &body.name).await?;

    Ok(Json(DepartmentEnvelope {
        message: "Department updated successfully".to_string(),
        department: DepartmentResponse::from(&department),
    }))
}

/// DELETE /departments/{id}
///
/// Refused with 409 while any employee still references the department.
pub async fn delete_department(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let department = state.department_service.delete(&id).await?;

    Ok(Json(DeletedResponse {
        message: "Department deleted successfully".to_string(),
        id: department.id().to_string(),
    }))
}
