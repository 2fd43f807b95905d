//! Result entry view models.

use serde::Serialize;

use curio_core::{Attachment, Item};

/// Icon shown on a count badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeIcon {
    Image,
}

/// A rendering hint attached to an entry's thumbnail area.
///
/// Rendered as a disabled, titled icon+count element; `disabled` is part of
/// the contract so clients don't wire a click target to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBadge {
    pub icon: BadgeIcon,
    pub count: i64,
    /// Localized tooltip, e.g. "3 images".
    pub title: String,
    pub disabled: bool,
}

/// A transient view model wrapping one item plus its prefetched
/// attachments, decorated before being handed to the rendering layer.
///
/// Created per request and discarded after render; entries are unrelated
/// to one another.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEntry {
    pub item: Item,
    pub attachments: Vec<Attachment>,
    /// Set by the image count pass when more than one image qualifies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_count_badge: Option<CountBadge>,
}

impl ResultEntry {
    /// Build an undecorated entry.
    pub fn new(item: Item, attachments: Vec<Attachment>) -> Self {
        Self {
            item,
            attachments,
            image_count_badge: None,
        }
    }
}
