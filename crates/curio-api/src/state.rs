//! Application state shared across handlers.

use std::sync::Arc;

use curio_core::WireZone;
use curio_db::Database;
use curio_search::ActivationResultsAssembler;

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Activation results pipeline, wired once at startup.
    pub assembler: Arc<ActivationResultsAssembler>,
    /// Zone outbound timestamps are rendered in.
    pub wire_zone: WireZone,
}
