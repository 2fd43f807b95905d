//! Activation results assembly.
//!
//! Composes default search parameters, the activation-scoped query source,
//! the item listing, and the per-entry image count pass into one results
//! page. Wiring is explicit constructor composition; there is no runtime
//! component lookup.

use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use curio_core::{i18n, ActivationRepository, AttachmentRepository, Error, Result};
use curio_db::Database;

use crate::entry::ResultEntry;
use crate::image_count::{decorate_entries, CountSettings};
use crate::params::SearchParams;

/// Message key for the page title.
const RESULTS_TITLE_KEY: &str = "activations.results.title";

/// Identifier of the bulk-selection checkbox region clients refresh along
/// with the result list.
pub const REGION_BULK_SELECT: &str = "bulk-select-box";

/// One page of activation results, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsPage {
    /// Localized results title.
    pub title: String,
    pub entries: Vec<ResultEntry>,
    /// Total matches before pagination.
    pub total: usize,
    /// Auxiliary UI regions to refresh together with the list.
    pub update_regions: Vec<String>,
}

/// Assembles activation result pages.
pub struct ActivationResultsAssembler {
    db: Database,
    count_settings: CountSettings,
}

impl ActivationResultsAssembler {
    /// Wire an assembler over the shared database handle.
    pub fn new(db: Database, count_settings: CountSettings) -> Self {
        Self { db, count_settings }
    }

    /// The localized title shown above activation results.
    pub fn results_title(&self) -> String {
        i18n::resolve(RESULTS_TITLE_KEY, &[])
    }

    /// Build a page of activation-scoped results.
    ///
    /// The activation-aware query source is always used here: items enter
    /// the listing only through a window covering `params.active_at`
    /// (defaulting to now), never through a generic item search.
    pub async fn assemble(
        &self,
        params: SearchParams,
        can_view_restricted: bool,
    ) -> Result<ResultsPage> {
        let start = Instant::now();
        let at = params.active_at.unwrap_or_else(Utc::now);

        let item_ids = self.db.activations.items_active_at(at).await?;

        let mut entries = Vec::with_capacity(item_ids.len());
        for item_id in item_ids {
            let item = match self.db.items.get_by_row_id(item_id).await {
                Ok(item) => item,
                // The window can outlive its item between the id scan and
                // the fetch; such rows simply drop out of the page.
                Err(Error::NotFound(_)) => continue,
                Err(e) => return Err(e),
            };
            if let Some(institution_id) = params.institution_id {
                if item.institution_id != institution_id {
                    continue;
                }
            }
            if let Some(status) = params.status {
                if item.status != status {
                    continue;
                }
            }
            let attachments = self.db.attachments.list_for_item(item_id).await?;
            entries.push(ResultEntry::new(item, attachments));
        }

        entries.sort_by(|a, b| {
            (a.item.name.as_str(), a.item.version).cmp(&(b.item.name.as_str(), b.item.version))
        });

        let total = entries.len();
        let mut page: Vec<ResultEntry> = entries
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .collect();

        decorate_entries(&mut page, can_view_restricted, self.count_settings);

        debug!(
            subsystem = "search",
            component = "activation_results",
            op = "assemble",
            result_count = page.len(),
            total,
            "Assembled activation results page"
        );
        info!(
            subsystem = "search",
            component = "activation_results",
            duration_ms = start.elapsed().as_millis() as u64,
            total,
            "Activation search complete"
        );

        Ok(ResultsPage {
            title: self.results_title(),
            entries: page,
            total,
            update_regions: vec![REGION_BULK_SELECT.to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_title_is_localized() {
        assert_eq!(i18n::resolve(RESULTS_TITLE_KEY, &[]), "Activations");
    }

    #[test]
    fn test_bulk_select_region_id() {
        assert_eq!(REGION_BULK_SELECT, "bulk-select-box");
    }
}
