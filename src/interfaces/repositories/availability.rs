use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::{
        availability::{AvailabilityInput, AvailabilityStatus},
        resource::SqlValue,
    },
    errors::AppError,
    repositories::{
        content::{insert_builder, update_builder},
        sqlx_repo::SqlxAvailabilityRepo,
    },
};

const TABLE: &str = "availability_status";

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<AvailabilityStatus>, AppError>;
    async fn active(&self) -> Result<Option<AvailabilityStatus>, AppError>;
    /// Inserts when `id` is `None`, updates otherwise. Activating a row
    /// deactivates every other row in the same transaction.
    async fn save(
        &self,
        id: Option<Uuid>,
        input: &AvailabilityInput,
    ) -> Result<AvailabilityStatus, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxAvailabilityRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxAvailabilityRepo { pool }
    }
}

fn columns(input: &AvailabilityInput) -> Vec<(&'static str, SqlValue)> {
    vec![
        ("status", input.status.trim().to_string().into()),
        ("message", input.message.clone().into()),
        ("is_active", input.is_active.into()),
    ]
}

#[async_trait]
impl AvailabilityRepository for SqlxAvailabilityRepo {
    async fn list(&self) -> Result<Vec<AvailabilityStatus>, AppError> {
        let rows: Vec<AvailabilityStatus> =
            sqlx::query_as("SELECT * FROM availability_status ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn active(&self) -> Result<Option<AvailabilityStatus>, AppError> {
        let row: Option<AvailabilityStatus> = sqlx::query_as(
            r#"
            SELECT * FROM availability_status
            WHERE is_active = TRUE
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(
        &self,
        id: Option<Uuid>,
        input: &AvailabilityInput,
    ) -> Result<AvailabilityStatus, AppError> {
        let mut tx = self.pool.begin().await?;

        if input.is_active {
            sqlx::query(
                r#"
                UPDATE availability_status
                SET is_active = FALSE, updated_at = NOW()
                WHERE is_active = TRUE AND ($1::uuid IS NULL OR id <> $1)
                "#,
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let saved: AvailabilityStatus = match id {
            None => insert_builder(TABLE, columns(input))
                .build_query_as()
                .fetch_one(&mut *tx)
                .await?,
            Some(id) => update_builder(TABLE, id, columns(input))
                .build_query_as()
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Availability status {id} not found")))?,
        };

        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability_status WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Availability status {id} not found")));
        }
        Ok(())
    }
}
