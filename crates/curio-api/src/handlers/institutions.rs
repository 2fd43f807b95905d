//! Institution (tenant) HTTP handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use curio_core::{CreateInstitutionRequest, Institution, InstitutionRepository};

use crate::error::ApiError;
use crate::state::AppState;

/// List every institution.
pub async fn list_institutions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Institution>>, ApiError> {
    let institutions = state.db.institutions.list().await?;
    Ok(Json(institutions))
}

/// Look an institution up by its stable external identifier.
///
/// # Returns
/// - 200 OK with the institution
/// - 404 Not Found if no institution carries that id
pub async fn get_institution(
    State(state): State<AppState>,
    Path(unique_id): Path<i64>,
) -> Result<Json<Institution>, ApiError> {
    let institution = state.db.institutions.find_by_unique_id(unique_id).await?;
    Ok(Json(institution))
}

/// Provision a new institution.
///
/// # Returns
/// - 201 Created with the new institution
pub async fn create_institution(
    State(state): State<AppState>,
    Json(req): Json<CreateInstitutionRequest>,
) -> Result<(StatusCode, Json<Institution>), ApiError> {
    let institution = state.db.institutions.insert(req).await?;
    info!(
        subsystem = "api",
        institution_id = institution.unique_id,
        "Provisioned institution"
    );
    Ok((StatusCode::CREATED, Json(institution)))
}
