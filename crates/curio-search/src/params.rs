//! Search parameter composition.
//!
//! A request starts from default parameters and is narrowed into a
//! domain-specific variant; the activation listing always goes through
//! [`SearchParams::activation_scoped`] so the activation-aware query source
//! is used rather than a generic one.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use curio_core::ItemStatus;

/// Default page size for result listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Parameters for an item listing.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Restrict to one tenant.
    pub institution_id: Option<Uuid>,
    /// Restrict to one item status.
    pub status: Option<ItemStatus>,
    /// When set, only items with an activation window covering this
    /// instant are listed (the activation-scoped variant).
    pub active_at: Option<DateTime<Utc>>,
    pub limit: usize,
    pub offset: usize,
}

impl SearchParams {
    /// Default parameters: no filters, first page.
    pub fn default_params() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            ..Self::default()
        }
    }

    /// Narrow to the activation-scoped variant at the given instant.
    pub fn activation_scoped(mut self, at: DateTime<Utc>) -> Self {
        self.active_at = Some(at);
        self
    }

    /// Restrict to one institution.
    pub fn for_institution(mut self, institution_id: Uuid) -> Self {
        self.institution_id = Some(institution_id);
        self
    }

    /// Page selection.
    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SearchParams::default_params();
        assert_eq!(params.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset, 0);
        assert!(params.active_at.is_none());
        assert!(params.institution_id.is_none());
    }

    #[test]
    fn test_activation_scoping_composes() {
        let at = Utc::now();
        let inst = Uuid::new_v4();
        let params = SearchParams::default_params()
            .for_institution(inst)
            .activation_scoped(at)
            .page(25, 50);

        assert_eq!(params.active_at, Some(at));
        assert_eq!(params.institution_id, Some(inst));
        assert_eq!(params.limit, 25);
        assert_eq!(params.offset, 50);
    }
}
