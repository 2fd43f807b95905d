//! Test fixtures for database integration tests.
//!
//! Provides a reusable setup/teardown harness and data builders for
//! consistent testing across the codebase.
//!
//! ## Configuration
//!
//! The test database URL is read from `DATABASE_URL`. Integration tests
//! skip themselves when it is not set, so a plain `cargo test` stays green
//! on machines without PostgreSQL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Database;
use curio_core::{
    ActivationRepository, AttachmentRepository, AttachmentKind, CreateActivationRequest,
    CreateAttachmentRequest, CreateInstitutionRequest, CreateItemRequest, Institution,
    InstitutionRepository, Item, ItemRepository,
};

/// Test database connection with cleanup helpers.
pub struct TestDatabase {
    pub db: Database,
}

impl TestDatabase {
    /// Connect to the test database named by `DATABASE_URL`, or None when
    /// the variable is unset.
    pub async fn connect() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let db = Database::connect(&url)
            .await
            .expect("failed to connect to test database");
        db.ensure_schema().await.expect("failed to apply schema");
        Some(Self { db })
    }

    /// Remove every row this harness may have created.
    pub async fn cleanup(&self) {
        for table in ["activation", "attachment", "item", "institution"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&self.db.pool)
                .await
                .expect("cleanup failed");
        }
    }

    /// Provision a throwaway institution.
    pub async fn institution(&self) -> Institution {
        self.db
            .institutions
            .insert(CreateInstitutionRequest {
                unique_id: rand_unique_id(),
                name: "Test University".to_string(),
                url: "https://test.example.edu".to_string(),
            })
            .await
            .expect("failed to create institution")
    }

    /// Create an item version under the given institution.
    pub async fn item(&self, institution_id: Uuid, uuid: Option<Uuid>) -> Item {
        self.db
            .items
            .insert(CreateItemRequest {
                uuid,
                institution_id,
                name: "Test Item".to_string(),
                description: None,
                status: None,
            })
            .await
            .expect("failed to create item")
    }

    /// Attach a file to an item version.
    pub async fn file_attachment(&self, item_id: Uuid, filename: &str, restricted: bool) {
        self.db
            .attachments
            .insert(CreateAttachmentRequest {
                item_id,
                kind: AttachmentKind::File,
                filename: filename.to_string(),
                description: None,
                restricted,
                size_bytes: 1024,
            })
            .await
            .expect("failed to create attachment");
    }

    /// Create an activation window for an item version.
    pub async fn activation(&self, item_id: Uuid, starts: DateTime<Utc>, ends: DateTime<Utc>) {
        self.db
            .activations
            .insert(CreateActivationRequest {
                item_id,
                course: "GEO-101".to_string(),
                starts_at_utc: starts,
                ends_at_utc: ends,
            })
            .await
            .expect("failed to create activation");
    }
}

/// Unique-enough external id for test institutions.
fn rand_unique_id() -> i64 {
    // Derived from a v4 uuid so concurrent tests don't collide.
    let bytes = Uuid::new_v4().into_bytes();
    i64::from_be_bytes(bytes[..8].try_into().unwrap()).abs()
}
