//! Item and attachment HTTP handlers.
//!
//! Items are versioned: `uuid` is the stable identity, `(uuid, version)`
//! addresses one row. Creating an item with an existing uuid appends the
//! next version.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use curio_core::{
    AttachmentRepository, CreateAttachmentRequest, CreateItemRequest, ItemRepository,
};

use crate::error::ApiError;
use crate::handlers::dto::{AttachmentDto, ItemDto, VersionDto};
use crate::state::AppState;

/// Create an item version.
///
/// # Request Body
/// - `uuid`: optional; when set and versions exist, appends the next version
/// - `institution_id`: owning tenant (required)
/// - `name`, `description`, `status`
///
/// # Returns
/// - 201 Created with the new item
/// - 400 Bad Request if validation fails
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    let item = state.db.items.insert(req).await?;
    info!(
        subsystem = "api",
        item_uuid = %item.uuid,
        item_version = item.version,
        "Created item version"
    );
    Ok((
        StatusCode::CREATED,
        Json(ItemDto::from_item(item, state.wire_zone)),
    ))
}

/// Fetch one specific version of an item.
///
/// # Returns
/// - 200 OK with the item
/// - 404 Not Found if no such (uuid, version)
pub async fn get_item(
    State(state): State<AppState>,
    Path((uuid, version)): Path<(Uuid, i32)>,
) -> Result<Json<ItemDto>, ApiError> {
    let item = state.db.items.get(uuid, version).await?;
    Ok(Json(ItemDto::from_item(item, state.wire_zone)))
}

/// Fetch the highest version of an item.
pub async fn get_latest_item(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ItemDto>, ApiError> {
    let item = state.db.items.latest(uuid).await?;
    Ok(Json(ItemDto::from_item(item, state.wire_zone)))
}

/// List every version of an item, ascending by version.
///
/// An unknown uuid yields an empty list rather than 404.
pub async fn list_item_versions(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<Vec<VersionDto>>, ApiError> {
    let versions = state.db.items.list_all_versions(uuid).await?;
    Ok(Json(
        versions
            .into_iter()
            .map(|v| VersionDto::from_summary(v, state.wire_zone))
            .collect(),
    ))
}

/// Delete one item version and, by cascade, its attachments.
///
/// # Returns
/// - 204 No Content on success
/// - 404 Not Found if no such (uuid, version)
pub async fn delete_item(
    State(state): State<AppState>,
    Path((uuid, version)): Path<(Uuid, i32)>,
) -> Result<StatusCode, ApiError> {
    state.db.items.delete(uuid, version).await?;
    info!(
        subsystem = "api",
        item_uuid = %uuid,
        item_version = version,
        "Deleted item version"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// List attachments owned by one item version, insertion-ordered.
pub async fn list_item_attachments(
    State(state): State<AppState>,
    Path((uuid, version)): Path<(Uuid, i32)>,
) -> Result<Json<Vec<AttachmentDto>>, ApiError> {
    let item = state.db.items.get(uuid, version).await?;
    let attachments = state.db.attachments.list_for_item(item.id).await?;
    Ok(Json(
        attachments
            .into_iter()
            .map(|a| AttachmentDto::from_attachment(a, state.wire_zone))
            .collect(),
    ))
}

/// Attach a file/link to an item version.
///
/// # Returns
/// - 201 Created with the new attachment
pub async fn create_attachment(
    State(state): State<AppState>,
    Json(req): Json<CreateAttachmentRequest>,
) -> Result<(StatusCode, Json<AttachmentDto>), ApiError> {
    let attachment = state.db.attachments.insert(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(AttachmentDto::from_attachment(attachment, state.wire_zone)),
    ))
}
