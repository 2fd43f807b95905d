//! # curio-db
//!
//! PostgreSQL database layer for the curio item repository.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for items, attachments, institutions,
//!   and activation windows
//! - A composable, immutable item query builder
//!
//! ## Example
//!
//! ```rust,ignore
//! use curio_db::Database;
//! use curio_core::ItemRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/curio").await?;
//!     let versions = db.items.list_all_versions(uuid).await?;
//!     Ok(())
//! }
//! ```

pub mod activations;
pub mod attachments;
pub mod institutions;
pub mod items;
pub mod pool;
pub mod query;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use them.
pub mod test_fixtures;

// Re-export core types
pub use curio_core::*;

pub use activations::PgActivationRepository;
pub use attachments::PgAttachmentRepository;
pub use institutions::PgInstitutionRepository;
pub use items::PgItemRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use query::{AllVersionsClause, Bind, ItemQuery, QueryClause, SortDir};

/// Embedded schema DDL, applied by [`Database::ensure_schema`].
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");

/// Aggregated handle over every repository, sharing one pool.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::PgPool,
    /// Item repository for versioned item operations.
    pub items: std::sync::Arc<PgItemRepository>,
    /// Attachment repository.
    pub attachments: std::sync::Arc<PgAttachmentRepository>,
    /// Institution (tenant) repository.
    pub institutions: std::sync::Arc<PgInstitutionRepository>,
    /// Activation window repository.
    pub activations: std::sync::Arc<PgActivationRepository>,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            items: std::sync::Arc::new(PgItemRepository::new(pool.clone())),
            attachments: std::sync::Arc::new(PgAttachmentRepository::new(pool.clone())),
            institutions: std::sync::Arc::new(PgInstitutionRepository::new(pool.clone())),
            activations: std::sync::Arc::new(PgActivationRepository::new(pool.clone())),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema. Idempotent.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}
