//! Item repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use curio_core::{
    CreateItemRequest, Error, Item, ItemRepository, ItemStatus, ItemVersionSummary, Result,
};

use crate::query::{bind_all, AllVersionsClause, ItemQuery, ALIAS_VERSION};

/// PostgreSQL implementation of ItemRepository.
pub struct PgItemRepository {
    pool: PgPool,
}

const ITEM_COLUMNS: &str =
    "id, uuid, version, institution_id, name, description, status, created_at_utc, modified_at_utc";

impl PgItemRepository {
    /// Create a new PgItemRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one version by its row key. Used by listing pipelines that
    /// join through tables keyed on `item.id`.
    pub async fn get_by_row_id(&self, id: Uuid) -> Result<Item> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM item WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("item row {}", id)))?;
        Self::item_from_row(&row)
    }

    fn item_from_row(row: &sqlx::postgres::PgRow) -> Result<Item> {
        let status: String = row.try_get("status")?;
        Ok(Item {
            id: row.try_get("id")?,
            uuid: row.try_get("uuid")?,
            version: row.try_get("version")?,
            institution_id: row.try_get("institution_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            status: status.parse()?,
            created_at_utc: row.try_get("created_at_utc")?,
            modified_at_utc: row.try_get("modified_at_utc")?,
        })
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert(&self, req: CreateItemRequest) -> Result<Item> {
        let mut tx = self.pool.begin().await?;

        // Version assignment must see a stable max, so the newest existing
        // row of the uuid is locked for the duration of the transaction.
        let (uuid, version) = match req.uuid {
            Some(uuid) => {
                let newest: Option<(i32,)> = sqlx::query_as(
                    "SELECT version FROM item WHERE uuid = $1 \
                     ORDER BY version DESC LIMIT 1 FOR UPDATE",
                )
                .bind(uuid)
                .fetch_optional(&mut *tx)
                .await?;
                (uuid, newest.map(|r| r.0).unwrap_or(0) + 1)
            }
            None => (Uuid::new_v4(), 1),
        };

        let now = Utc::now();
        let item = Item {
            id: Uuid::now_v7(),
            uuid,
            version,
            institution_id: req.institution_id,
            name: req.name,
            description: req.description,
            status: req.status.unwrap_or(ItemStatus::Draft),
            created_at_utc: now,
            modified_at_utc: now,
        };

        sqlx::query(
            "INSERT INTO item \
             (id, uuid, version, institution_id, name, description, status, \
              created_at_utc, modified_at_utc) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(item.id)
        .bind(item.uuid)
        .bind(item.version)
        .bind(item.institution_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.status.as_str())
        .bind(item.created_at_utc)
        .bind(item.modified_at_utc)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            subsystem = "db",
            component = "items",
            op = "insert",
            item_uuid = %item.uuid,
            item_version = item.version,
            "Inserted item version"
        );
        Ok(item)
    }

    async fn get(&self, uuid: Uuid, version: i32) -> Result<Item> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM item WHERE uuid = $1 AND version = $2",
            ITEM_COLUMNS
        ))
        .bind(uuid)
        .bind(version)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::ItemNotFound { uuid, version })?;
        Self::item_from_row(&row)
    }

    async fn latest(&self, uuid: Uuid) -> Result<Item> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM item WHERE uuid = $1 ORDER BY version DESC LIMIT 1",
            ITEM_COLUMNS
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("item {}", uuid)))?;
        Self::item_from_row(&row)
    }

    async fn list_all_versions(&self, uuid: Uuid) -> Result<Vec<ItemVersionSummary>> {
        let (sql, binds) = ItemQuery::new()
            .project("item.status", "status")
            .project("item.modified_at_utc", "modified_at_utc")
            .apply(&AllVersionsClause::new(uuid))
            .to_sql();

        let rows = bind_all(sqlx::query(&sql), &binds)
            .fetch_all(&self.pool)
            .await?;

        let mut versions = Vec::with_capacity(rows.len());
        for row in &rows {
            let status: String = row.try_get("status")?;
            let modified_at_utc: DateTime<Utc> = row.try_get("modified_at_utc")?;
            versions.push(ItemVersionSummary {
                version: row.try_get(ALIAS_VERSION)?,
                status: status.parse()?,
                modified_at_utc,
                is_latest: false,
            });
        }
        // Rows arrive ascending by version, so the last one is current.
        if let Some(last) = versions.last_mut() {
            last.is_latest = true;
        }

        debug!(
            subsystem = "db",
            component = "items",
            op = "list_versions",
            item_uuid = %uuid,
            result_count = versions.len(),
            "Listed item versions"
        );
        Ok(versions)
    }

    async fn delete(&self, uuid: Uuid, version: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM item WHERE uuid = $1 AND version = $2")
            .bind(uuid)
            .bind(version)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::ItemNotFound { uuid, version });
        }
        Ok(())
    }
}
