//! curio-api - HTTP API server for the curio item repository

mod error;
mod handlers;
mod state;
mod wire_dates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use uuid::Uuid;

use curio_core::WireZone;
use curio_db::Database;
use curio_search::{ActivationResultsAssembler, CountSettings};

use crate::handlers::{activations, institutions, items, search};
use crate::state::AppState;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// OPENAPI DOCUMENT
// =============================================================================

/// OpenAPI metadata and wire schemas, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Curio API",
        description = "Multi-tenant repository of versioned educational items with attachments and activation windows"
    ),
    components(schemas(
        curio_core::Institution,
        curio_core::CreateInstitutionRequest,
        curio_core::Item,
        curio_core::ItemStatus,
        curio_core::ItemVersionSummary,
        curio_core::CreateItemRequest,
        curio_core::Attachment,
        curio_core::AttachmentKind,
        curio_core::CreateAttachmentRequest,
        curio_core::Activation,
        curio_core::ActivationStatus,
        curio_core::CreateActivationRequest,
    )),
    tags(
        (name = "Institutions", description = "Tenant provisioning and lookup"),
        (name = "Items", description = "Versioned item CRUD"),
        (name = "Activations", description = "Availability windows"),
        (name = "Search", description = "Activation-scoped result listing"),
        (name = "System", description = "Health checks")
    )
)]
struct ApiDoc;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// ROUTER
// =============================================================================

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        // Institutions
        .route(
            "/api/v1/institutions",
            get(institutions::list_institutions).post(institutions::create_institution),
        )
        .route(
            "/api/v1/institutions/:unique_id",
            get(institutions::get_institution),
        )
        // Items
        .route("/api/v1/items", post(items::create_item))
        .route("/api/v1/items/:uuid/latest", get(items::get_latest_item))
        .route("/api/v1/items/:uuid/versions", get(items::list_item_versions))
        .route(
            "/api/v1/items/:uuid/:version",
            get(items::get_item).delete(items::delete_item),
        )
        .route(
            "/api/v1/items/:uuid/:version/attachments",
            get(items::list_item_attachments),
        )
        // Attachments
        .route("/api/v1/attachments", post(items::create_attachment))
        // Activations
        .route(
            "/api/v1/activations",
            post(activations::create_activation),
        )
        .route(
            "/api/v1/items/:uuid/:version/activations",
            get(activations::list_item_activations),
        )
        .route(
            "/api/v1/activations/expire",
            post(activations::expire_activations),
        )
        // Search
        .route(
            "/api/v1/search/activations",
            get(search::search_activations),
        )
        // Middleware
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   RUST_LOG    - standard env filter (default: "curio_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "curio_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Get configuration from environment
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/curio".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    // CURIO_TIME_ZONE_OFFSET: zone outbound timestamps are rendered in.
    // "Z"/"UTC"/empty for UTC, or a fixed offset like "+10:00".
    let wire_zone = match std::env::var("CURIO_TIME_ZONE_OFFSET") {
        Ok(offset) => WireZone::from_offset_str(&offset)?,
        Err(_) => WireZone::default(),
    };

    // CURIO_DISABLE_FILE_COUNT: global switch for image count badges.
    let count_disabled = std::env::var("CURIO_DISABLE_FILE_COUNT")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let count_settings = CountSettings {
        enabled: !count_disabled,
    };

    // Connect to database and apply schema
    let db = Database::connect(&database_url).await?;
    db.ensure_schema().await?;
    info!("Database ready");

    let state = AppState {
        assembler: Arc::new(ActivationResultsAssembler::new(db.clone(), count_settings)),
        db,
        wire_zone,
    };

    let app = router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(%addr, image_counts = count_settings.enabled, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Ctrl+C or SIGTERM, whichever comes first
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_doc_carries_wire_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        for name in ["Institution", "Item", "ItemVersionSummary", "Attachment", "Activation"] {
            assert!(schemas.get(name).is_some(), "missing schema {}", name);
        }
        assert_eq!(doc["info"]["title"], "Curio API");
    }
}
