//! Attachment repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use curio_core::{
    Attachment, AttachmentRepository, CreateAttachmentRequest, Result,
};

/// PostgreSQL implementation of AttachmentRepository.
///
/// Attachments live and die with their item; deletion happens through the
/// item cascade, so no delete operation is exposed here.
pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    /// Create a new PgAttachmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Attachment> {
        let kind: String = row.try_get("kind")?;
        Ok(Attachment {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            kind: kind.parse()?,
            filename: row.try_get("filename")?,
            description: row.try_get("description")?,
            restricted: row.try_get("restricted")?,
            size_bytes: row.try_get("size_bytes")?,
            created_at_utc: row.try_get("created_at_utc")?,
        })
    }
}

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    async fn insert(&self, req: CreateAttachmentRequest) -> Result<Attachment> {
        let attachment = Attachment {
            id: Uuid::now_v7(),
            item_id: req.item_id,
            kind: req.kind,
            filename: req.filename,
            description: req.description,
            restricted: req.restricted,
            size_bytes: req.size_bytes,
            created_at_utc: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO attachment \
             (id, item_id, kind, filename, description, restricted, size_bytes, created_at_utc) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(attachment.id)
        .bind(attachment.item_id)
        .bind(attachment.kind.as_str())
        .bind(&attachment.filename)
        .bind(&attachment.description)
        .bind(attachment.restricted)
        .bind(attachment.size_bytes)
        .bind(attachment.created_at_utc)
        .execute(&self.pool)
        .await?;

        Ok(attachment)
    }

    async fn list_for_item(&self, item_id: Uuid) -> Result<Vec<Attachment>> {
        let rows = sqlx::query(
            "SELECT id, item_id, kind, filename, description, restricted, size_bytes, \
             created_at_utc \
             FROM attachment WHERE item_id = $1 ORDER BY created_at_utc, id",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}
