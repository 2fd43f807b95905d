//! Core data models for curio.
//!
//! These types are shared across all curio crates and represent the
//! domain entities of the item repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

// =============================================================================
// INSTITUTION TYPES
// =============================================================================

/// A tenant of the repository. Every item belongs to exactly one institution.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Institution {
    pub id: Uuid,
    /// Stable external identifier, assigned at provisioning time and never
    /// reused. Lookups from legacy integrations key on this.
    pub unique_id: i64,
    pub name: String,
    pub url: String,
    pub enabled: bool,
    pub created_at_utc: DateTime<Utc>,
}

/// Request for provisioning a new institution.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateInstitutionRequest {
    pub unique_id: i64,
    pub name: String,
    pub url: String,
}

// =============================================================================
// ITEM TYPES
// =============================================================================

/// Lifecycle status of an item version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Draft,
    Live,
    Archived,
}

impl ItemStatus {
    /// Stable string form used in the database and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Draft => "draft",
            ItemStatus::Live => "live",
            ItemStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ItemStatus::Draft),
            "live" => Ok(ItemStatus::Live),
            "archived" => Ok(ItemStatus::Archived),
            other => Err(Error::InvalidInput(format!(
                "unknown item status: {}",
                other
            ))),
        }
    }
}

/// One version of an item.
///
/// `uuid` is the stable identity shared by every version; `(uuid, version)`
/// is unique and `version` is monotonic per uuid, starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    /// Row key for this specific version.
    pub id: Uuid,
    pub uuid: Uuid,
    pub version: i32,
    pub institution_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at_utc: DateTime<Utc>,
    pub modified_at_utc: DateTime<Utc>,
}

/// Summary row produced by the all-versions listing.
///
/// Carries the projected `version` column plus enough metadata to render a
/// version history without fetching full items.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemVersionSummary {
    pub version: i32,
    pub status: ItemStatus,
    pub modified_at_utc: DateTime<Utc>,
    pub is_latest: bool,
}

/// Request for creating an item.
///
/// When `uuid` is set and versions of it already exist, the new row becomes
/// the next version of that uuid; otherwise a fresh uuid at version 1.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    pub institution_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
}

// =============================================================================
// ATTACHMENT TYPES
// =============================================================================

/// Discriminator for attachment rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    File,
    Link,
    Html,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::File => "file",
            AttachmentKind::Link => "link",
            AttachmentKind::Html => "html",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(AttachmentKind::File),
            "link" => Ok(AttachmentKind::Link),
            "html" => Ok(AttachmentKind::Html),
            other => Err(Error::InvalidInput(format!(
                "unknown attachment kind: {}",
                other
            ))),
        }
    }
}

/// An attachment owned by exactly one item version.
///
/// Attachments are destroyed with their item (cascade); `restricted` rows
/// are visible only to privileged viewers.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Attachment {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: AttachmentKind,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub restricted: bool,
    pub size_bytes: i64,
    pub created_at_utc: DateTime<Utc>,
}

/// Request for attaching a file/link to an item version.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateAttachmentRequest {
    pub item_id: Uuid,
    pub kind: AttachmentKind,
    pub filename: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub size_bytes: i64,
}

// =============================================================================
// ACTIVATION TYPES
// =============================================================================

/// Lifecycle status of an activation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivationStatus {
    Pending,
    Active,
    Expired,
}

impl ActivationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationStatus::Pending => "pending",
            ActivationStatus::Active => "active",
            ActivationStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ActivationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ActivationStatus::Pending),
            "active" => Ok(ActivationStatus::Active),
            "expired" => Ok(ActivationStatus::Expired),
            other => Err(Error::InvalidInput(format!(
                "unknown activation status: {}",
                other
            ))),
        }
    }
}

/// A scheduling window during which an item version is available to a course.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Activation {
    pub id: Uuid,
    pub item_id: Uuid,
    pub course: String,
    pub starts_at_utc: DateTime<Utc>,
    pub ends_at_utc: DateTime<Utc>,
    pub status: ActivationStatus,
    pub created_at_utc: DateTime<Utc>,
}

/// Request for activating an item version for a course.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateActivationRequest {
    pub item_id: Uuid,
    pub course: String,
    pub starts_at_utc: DateTime<Utc>,
    pub ends_at_utc: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_round_trip() {
        for status in [ItemStatus::Draft, ItemStatus::Live, ItemStatus::Archived] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_item_status_rejects_unknown() {
        assert!("published".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_attachment_kind_round_trip() {
        for kind in [
            AttachmentKind::File,
            AttachmentKind::Link,
            AttachmentKind::Html,
        ] {
            assert_eq!(kind.as_str().parse::<AttachmentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_activation_status_round_trip() {
        for status in [
            ActivationStatus::Pending,
            ActivationStatus::Active,
            ActivationStatus::Expired,
        ] {
            assert_eq!(
                status.as_str().parse::<ActivationStatus>().unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_item_serializes_status_lowercase() {
        let item = Item {
            id: Uuid::nil(),
            uuid: Uuid::nil(),
            version: 1,
            institution_id: Uuid::nil(),
            name: "Intro to Geology".to_string(),
            description: None,
            status: ItemStatus::Live,
            created_at_utc: Utc::now(),
            modified_at_utc: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "live");
        assert!(json.get("description").is_none());
    }
}
