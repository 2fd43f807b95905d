//! Core traits for curio abstractions.
//!
//! These traits define the repository interfaces that concrete database
//! implementations must satisfy, enabling pluggable backends and
//! testability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Repository for versioned items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item version.
    ///
    /// When the request names an existing uuid, the row is assigned the
    /// next version number for that uuid; otherwise version 1 of a fresh
    /// uuid.
    async fn insert(&self, req: CreateItemRequest) -> Result<Item>;

    /// Fetch one specific version of an item.
    async fn get(&self, uuid: Uuid, version: i32) -> Result<Item>;

    /// Fetch the highest version of an item.
    async fn latest(&self, uuid: Uuid) -> Result<Item>;

    /// List every version of an item, ascending by version, with the
    /// version column projected. An unknown uuid yields an empty list.
    async fn list_all_versions(&self, uuid: Uuid) -> Result<Vec<ItemVersionSummary>>;

    /// Delete one version and, by cascade, its attachments.
    async fn delete(&self, uuid: Uuid, version: i32) -> Result<()>;
}

/// Repository for item attachments.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Attach a file/link to an item version.
    async fn insert(&self, req: CreateAttachmentRequest) -> Result<Attachment>;

    /// List attachments owned by an item version, insertion-ordered.
    async fn list_for_item(&self, item_id: Uuid) -> Result<Vec<Attachment>>;
}

/// Repository for institutions (tenants).
#[async_trait]
pub trait InstitutionRepository: Send + Sync {
    /// Provision a new institution.
    async fn insert(&self, req: CreateInstitutionRequest) -> Result<Institution>;

    /// Look an institution up by its stable external identifier.
    async fn find_by_unique_id(&self, unique_id: i64) -> Result<Institution>;

    /// List every institution.
    async fn list(&self) -> Result<Vec<Institution>>;
}

/// Repository for activation windows.
#[async_trait]
pub trait ActivationRepository: Send + Sync {
    /// Create an activation window for an item version.
    async fn insert(&self, req: CreateActivationRequest) -> Result<Activation>;

    /// List activation windows for one item version.
    async fn list_for_item(&self, item_id: Uuid) -> Result<Vec<Activation>>;

    /// List ids of items with a window covering the given instant.
    async fn items_active_at(&self, at: DateTime<Utc>) -> Result<Vec<Uuid>>;

    /// Mark windows whose end has passed as expired. Returns the number of
    /// rows transitioned.
    async fn expire_ended(&self, now: DateTime<Utc>) -> Result<u64>;
}
