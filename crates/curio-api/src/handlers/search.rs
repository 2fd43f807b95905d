//! Activation results search handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use curio_core::ItemStatus;
use curio_search::SearchParams;

use crate::error::ApiError;
use crate::handlers::dto::EntryDto;
use crate::state::AppState;
use crate::wire_dates::WireDateTime;

/// Query parameters for the activation results listing.
#[derive(Debug, Deserialize)]
pub struct ActivationSearchQuery {
    /// Instant to scope windows by; defaults to now. Accepts a full
    /// timestamp or a bare date (midnight UTC).
    pub date: Option<WireDateTime>,
    pub institution_id: Option<Uuid>,
    pub status: Option<ItemStatus>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Whether the caller may see restricted attachments.
    #[serde(default)]
    pub view_restricted: bool,
}

/// One page of activation results on the wire.
#[derive(Debug, Serialize)]
pub struct ResultsPageDto {
    pub title: String,
    pub entries: Vec<EntryDto>,
    pub total: usize,
    pub update_regions: Vec<String>,
}

/// List items with an activation window covering an instant.
///
/// Entries carry their attachments plus the image count badge when more
/// than one image qualifies for the caller.
///
/// # Returns
/// - 200 OK with the results page
/// - 400 Bad Request if `date` fails to parse, with `{ "field": "date" }`
pub async fn search_activations(
    State(state): State<AppState>,
    Query(query): Query<ActivationSearchQuery>,
) -> Result<Json<ResultsPageDto>, ApiError> {
    let mut params = SearchParams::default_params();
    if let Some(date) = query.date {
        params = params.activation_scoped(date.into_inner());
    }
    if let Some(institution_id) = query.institution_id {
        params = params.for_institution(institution_id);
    }
    params.status = query.status;
    if query.limit.is_some() || query.offset.is_some() {
        params = params.page(
            query.limit.unwrap_or(curio_search::DEFAULT_PAGE_SIZE),
            query.offset.unwrap_or(0),
        );
    }

    let page = state
        .assembler
        .assemble(params, query.view_restricted)
        .await?;

    Ok(Json(ResultsPageDto {
        title: page.title,
        total: page.total,
        update_regions: page.update_regions,
        entries: page
            .entries
            .into_iter()
            .map(|e| EntryDto::from_entry(e, state.wire_zone))
            .collect(),
    }))
}
