//! File/image count decoration for result entries.
//!
//! Counts the image attachments a viewer is allowed to see and, when more
//! than one qualifies, attaches a disabled icon+count badge to the entry.
//! Zero and one are deliberately not called out — the single-image case is
//! carried by the thumbnail itself.

use curio_core::{i18n, is_image_filename, Attachment, AttachmentKind};

use crate::entry::{BadgeIcon, CountBadge, ResultEntry};

/// Message key for the badge tooltip.
const COUNT_KEY: &str = "search.images.count";

/// Settings for the count pass.
#[derive(Debug, Clone, Copy)]
pub struct CountSettings {
    /// Global switch; when off, no entry gets a badge at all.
    pub enabled: bool,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Number of image attachments the viewer may count.
///
/// An attachment qualifies when it is a FILE, its filename resolves to an
/// `image/*` MIME type, and it is either unrestricted or the viewer is
/// privileged. A pure filter+count; invariant under reordering.
pub fn qualifying_image_count(attachments: &[Attachment], can_view_restricted: bool) -> i64 {
    attachments
        .iter()
        .filter(|a| a.kind == AttachmentKind::File)
        .filter(|a| can_view_restricted || !a.restricted)
        .filter(|a| is_image_filename(&a.filename))
        .count() as i64
}

/// Decorate one entry with an image count badge when more than one image
/// qualifies. Runs once per entry, independently.
pub fn decorate_entry(entry: &mut ResultEntry, can_view_restricted: bool, settings: CountSettings) {
    if !settings.enabled {
        return;
    }
    let count = qualifying_image_count(&entry.attachments, can_view_restricted);
    if count > 1 {
        entry.image_count_badge = Some(CountBadge {
            icon: BadgeIcon::Image,
            count,
            title: i18n::resolve_count(COUNT_KEY, count),
            disabled: true,
        });
    }
}

/// Decorate a whole result page.
pub fn decorate_entries(
    entries: &mut [ResultEntry],
    can_view_restricted: bool,
    settings: CountSettings,
) {
    for entry in entries {
        decorate_entry(entry, can_view_restricted, settings);
    }
}
