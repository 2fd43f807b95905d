//! Institution repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use curio_core::{
    CreateInstitutionRequest, Error, Institution, InstitutionRepository, Result,
};

/// PostgreSQL implementation of InstitutionRepository.
pub struct PgInstitutionRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct InstitutionRow {
    id: Uuid,
    unique_id: i64,
    name: String,
    url: String,
    enabled: bool,
    created_at_utc: chrono::DateTime<Utc>,
}

impl From<InstitutionRow> for Institution {
    fn from(row: InstitutionRow) -> Self {
        Institution {
            id: row.id,
            unique_id: row.unique_id,
            name: row.name,
            url: row.url,
            enabled: row.enabled,
            created_at_utc: row.created_at_utc,
        }
    }
}

impl PgInstitutionRepository {
    /// Create a new PgInstitutionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstitutionRepository for PgInstitutionRepository {
    async fn insert(&self, req: CreateInstitutionRequest) -> Result<Institution> {
        let institution = Institution {
            id: Uuid::now_v7(),
            unique_id: req.unique_id,
            name: req.name,
            url: req.url,
            enabled: true,
            created_at_utc: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO institution (id, unique_id, name, url, enabled, created_at_utc) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(institution.id)
        .bind(institution.unique_id)
        .bind(&institution.name)
        .bind(&institution.url)
        .bind(institution.enabled)
        .bind(institution.created_at_utc)
        .execute(&self.pool)
        .await?;

        Ok(institution)
    }

    async fn find_by_unique_id(&self, unique_id: i64) -> Result<Institution> {
        let row: Option<InstitutionRow> = sqlx::query_as(
            "SELECT id, unique_id, name, url, enabled, created_at_utc \
             FROM institution WHERE unique_id = $1",
        )
        .bind(unique_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Institution::from)
            .ok_or(Error::InstitutionNotFound(unique_id))
    }

    async fn list(&self) -> Result<Vec<Institution>> {
        let rows: Vec<InstitutionRow> = sqlx::query_as(
            "SELECT id, unique_id, name, url, enabled, created_at_utc \
             FROM institution ORDER BY unique_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Institution::from).collect())
    }
}
