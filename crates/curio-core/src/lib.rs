//! # curio-core
//!
//! Core types, traits, and abstractions for the curio item repository.
//!
//! This crate provides the foundational data structures and trait
//! definitions that other curio crates depend on.

pub mod error;
pub mod i18n;
pub mod logging;
pub mod mime;
pub mod models;
pub mod traits;
pub mod wiredate;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use mime::{detect_content_type, is_image_filename, mime_type_for_filename};
pub use models::*;
pub use traits::*;
pub use wiredate::WireZone;
