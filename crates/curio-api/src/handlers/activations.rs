//! Activation window HTTP handlers.
//!
//! Window boundaries arrive as wire dates: either a full timestamp or a
//! bare date, which extends to midnight UTC.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use curio_core::{ActivationRepository, CreateActivationRequest, ItemRepository};

use crate::error::ApiError;
use crate::handlers::dto::ActivationDto;
use crate::state::AppState;
use crate::wire_dates::WireDateTime;

/// Request body for activating an item version for a course.
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub item_id: Uuid,
    pub course: String,
    pub starts_at: WireDateTime,
    pub ends_at: WireDateTime,
}

/// Response for the expiry sweep.
#[derive(Debug, Serialize)]
pub struct ExpireResponse {
    /// Number of windows transitioned to expired.
    pub expired: u64,
}

/// Create an activation window.
///
/// # Returns
/// - 201 Created with the new activation
/// - 400 Bad Request if the window ends before it starts, with
///   `{ "field": "date" }` in the body
pub async fn create_activation(
    State(state): State<AppState>,
    Json(req): Json<ActivateRequest>,
) -> Result<(StatusCode, Json<ActivationDto>), ApiError> {
    let activation = state
        .db
        .activations
        .insert(CreateActivationRequest {
            item_id: req.item_id,
            course: req.course,
            starts_at_utc: req.starts_at.into_inner(),
            ends_at_utc: req.ends_at.into_inner(),
        })
        .await?;
    info!(
        subsystem = "api",
        item_id = %activation.item_id,
        course = %activation.course,
        "Created activation window"
    );
    Ok((
        StatusCode::CREATED,
        Json(ActivationDto::from_activation(activation, state.wire_zone)),
    ))
}

/// List activation windows for one item version.
pub async fn list_item_activations(
    State(state): State<AppState>,
    Path((uuid, version)): Path<(Uuid, i32)>,
) -> Result<Json<Vec<ActivationDto>>, ApiError> {
    let item = state.db.items.get(uuid, version).await?;
    let activations = state.db.activations.list_for_item(item.id).await?;
    Ok(Json(
        activations
            .into_iter()
            .map(|a| ActivationDto::from_activation(a, state.wire_zone))
            .collect(),
    ))
}

/// Sweep ended windows into the expired status.
pub async fn expire_activations(
    State(state): State<AppState>,
) -> Result<Json<ExpireResponse>, ApiError> {
    let expired = state.db.activations.expire_ended(Utc::now()).await?;
    info!(subsystem = "api", expired, "Expired activation windows");
    Ok(Json(ExpireResponse { expired }))
}
