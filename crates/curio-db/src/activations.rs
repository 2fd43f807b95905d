//! Activation window repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use curio_core::{
    i18n, Activation, ActivationRepository, ActivationStatus, CreateActivationRequest, Error,
    Result,
};

/// PostgreSQL implementation of ActivationRepository.
pub struct PgActivationRepository {
    pool: PgPool,
}

impl PgActivationRepository {
    /// Create a new PgActivationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Activation> {
        let status: String = row.try_get("status")?;
        Ok(Activation {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            course: row.try_get("course")?,
            starts_at_utc: row.try_get("starts_at_utc")?,
            ends_at_utc: row.try_get("ends_at_utc")?,
            status: status.parse()?,
            created_at_utc: row.try_get("created_at_utc")?,
        })
    }

    /// Status a fresh window holds relative to `now`.
    fn initial_status(
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ActivationStatus {
        if ends_at <= now {
            ActivationStatus::Expired
        } else if starts_at > now {
            ActivationStatus::Pending
        } else {
            ActivationStatus::Active
        }
    }
}

#[async_trait]
impl ActivationRepository for PgActivationRepository {
    async fn insert(&self, req: CreateActivationRequest) -> Result<Activation> {
        if req.ends_at_utc <= req.starts_at_utc {
            return Err(Error::validation(
                "date",
                i18n::resolve(
                    "api.error.daterange",
                    &[
                        &req.ends_at_utc.to_rfc3339(),
                        &req.starts_at_utc.to_rfc3339(),
                    ],
                ),
            ));
        }

        let now = Utc::now();
        let activation = Activation {
            id: Uuid::now_v7(),
            item_id: req.item_id,
            course: req.course,
            starts_at_utc: req.starts_at_utc,
            ends_at_utc: req.ends_at_utc,
            status: Self::initial_status(req.starts_at_utc, req.ends_at_utc, now),
            created_at_utc: now,
        };

        sqlx::query(
            "INSERT INTO activation \
             (id, item_id, course, starts_at_utc, ends_at_utc, status, created_at_utc) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(activation.id)
        .bind(activation.item_id)
        .bind(&activation.course)
        .bind(activation.starts_at_utc)
        .bind(activation.ends_at_utc)
        .bind(activation.status.as_str())
        .bind(activation.created_at_utc)
        .execute(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "activations",
            op = "insert",
            item_id = %activation.item_id,
            course = %activation.course,
            "Created activation window"
        );
        Ok(activation)
    }

    async fn list_for_item(&self, item_id: Uuid) -> Result<Vec<Activation>> {
        let rows = sqlx::query(
            "SELECT id, item_id, course, starts_at_utc, ends_at_utc, status, created_at_utc \
             FROM activation WHERE item_id = $1 ORDER BY starts_at_utc",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn items_active_at(&self, at: DateTime<Utc>) -> Result<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT DISTINCT item_id FROM activation \
             WHERE starts_at_utc <= $1 AND ends_at_utc > $1",
        )
        .bind(at)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn expire_ended(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE activation SET status = 'expired' \
             WHERE ends_at_utc <= $1 AND status <> 'expired'",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        let expired = result.rows_affected();
        if expired > 0 {
            debug!(
                subsystem = "db",
                component = "activations",
                op = "expire_ended",
                result_count = expired,
                "Expired ended activation windows"
            );
        }
        Ok(expired)
    }
}
