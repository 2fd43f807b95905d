//! HTTP handlers for curio-api.

pub mod activations;
pub mod dto;
pub mod institutions;
pub mod items;
pub mod search;
