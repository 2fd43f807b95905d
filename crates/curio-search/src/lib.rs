//! # curio-search
//!
//! Activation search and listing pipeline for the curio item repository:
//! parameter composition, per-entry file/image count decoration, and
//! results page assembly.

pub mod entry;
pub mod image_count;
pub mod params;
pub mod results;

pub use entry::{BadgeIcon, CountBadge, ResultEntry};
pub use image_count::{decorate_entries, decorate_entry, qualifying_image_count, CountSettings};
pub use params::{SearchParams, DEFAULT_PAGE_SIZE};
pub use results::{ActivationResultsAssembler, ResultsPage, REGION_BULK_SELECT};
