//! Wire representations of domain entities.
//!
//! Timestamps cross the REST boundary as strings rendered by the wire date
//! codec in the configured zone, so every DTO conversion takes the
//! [`WireZone`] from application state.

use serde::Serialize;
use uuid::Uuid;

use curio_core::{
    wiredate, Activation, ActivationStatus, Attachment, AttachmentKind, Item, ItemStatus,
    ItemVersionSummary, WireZone,
};
use curio_search::{CountBadge, ResultEntry};

/// One item version on the wire.
#[derive(Debug, Serialize)]
pub struct ItemDto {
    pub id: Uuid,
    pub uuid: Uuid,
    pub version: i32,
    pub institution_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: String,
    pub modified_at: String,
}

impl ItemDto {
    pub fn from_item(item: Item, zone: WireZone) -> Self {
        Self {
            id: item.id,
            uuid: item.uuid,
            version: item.version,
            institution_id: item.institution_id,
            name: item.name,
            description: item.description,
            status: item.status,
            created_at: wiredate::format(item.created_at_utc, zone),
            modified_at: wiredate::format(item.modified_at_utc, zone),
        }
    }
}

/// One row of a version history listing.
#[derive(Debug, Serialize)]
pub struct VersionDto {
    pub version: i32,
    pub status: ItemStatus,
    pub modified_at: String,
    pub is_latest: bool,
}

impl VersionDto {
    pub fn from_summary(summary: ItemVersionSummary, zone: WireZone) -> Self {
        Self {
            version: summary.version,
            status: summary.status,
            modified_at: wiredate::format(summary.modified_at_utc, zone),
            is_latest: summary.is_latest,
        }
    }
}

/// An attachment on the wire.
#[derive(Debug, Serialize)]
pub struct AttachmentDto {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: AttachmentKind,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub restricted: bool,
    pub size_bytes: i64,
    pub created_at: String,
}

impl AttachmentDto {
    pub fn from_attachment(attachment: Attachment, zone: WireZone) -> Self {
        Self {
            id: attachment.id,
            item_id: attachment.item_id,
            kind: attachment.kind,
            filename: attachment.filename,
            description: attachment.description,
            restricted: attachment.restricted,
            size_bytes: attachment.size_bytes,
            created_at: wiredate::format(attachment.created_at_utc, zone),
        }
    }
}

/// An activation window on the wire.
#[derive(Debug, Serialize)]
pub struct ActivationDto {
    pub id: Uuid,
    pub item_id: Uuid,
    pub course: String,
    pub starts_at: String,
    pub ends_at: String,
    pub status: ActivationStatus,
    pub created_at: String,
}

impl ActivationDto {
    pub fn from_activation(activation: Activation, zone: WireZone) -> Self {
        Self {
            id: activation.id,
            item_id: activation.item_id,
            course: activation.course,
            starts_at: wiredate::format(activation.starts_at_utc, zone),
            ends_at: wiredate::format(activation.ends_at_utc, zone),
            status: activation.status,
            created_at: wiredate::format(activation.created_at_utc, zone),
        }
    }
}

/// One decorated search result entry on the wire.
#[derive(Debug, Serialize)]
pub struct EntryDto {
    pub item: ItemDto,
    pub attachments: Vec<AttachmentDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_count_badge: Option<CountBadge>,
}

impl EntryDto {
    pub fn from_entry(entry: ResultEntry, zone: WireZone) -> Self {
        Self {
            item: ItemDto::from_item(entry.item, zone),
            attachments: entry
                .attachments
                .into_iter()
                .map(|a| AttachmentDto::from_attachment(a, zone))
                .collect(),
            image_count_badge: entry.image_count_badge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_item_dto_renders_dates_in_configured_zone() {
        let item = Item {
            id: Uuid::nil(),
            uuid: Uuid::nil(),
            version: 1,
            institution_id: Uuid::nil(),
            name: "n".to_string(),
            description: None,
            status: ItemStatus::Live,
            created_at_utc: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            modified_at_utc: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        };

        let zone = WireZone::from_offset_str("+10:00").unwrap();
        let dto = ItemDto::from_item(item, zone);
        assert_eq!(dto.created_at, "2024-03-01T20:00:00+10:00");
    }
}
