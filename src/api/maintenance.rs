//! Maintenance endpoints

use axum::{
    extract::{Query, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::middleware::RequireAdmin;
use super::state::AppState;
use super::types::{ApiError, Json};
use crate::domain::ReconcileReport;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new().route("/reconcile", post(reconcile))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReconcileQuery {
    #[serde(default)]
    pub dry_run: bool,
}

/// POST /maintenance/reconcile?dry_run=bool
///
/// Rebuild every department's member set from the employees' references.
pub async fn reconcile(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<ReconcileQuery>,
) -> Result<Json<ReconcileReport>, ApiError> {
    info!(requested_by = %admin.id, dry_run = query.dry_run, "Manual reconciliation");

    let report = state.membership.reconcile(query.dry_run).await?;
    Ok(Json(report))
}
