use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::resource::{ListQuery, Resource, SqlValue, WriteModel},
    errors::AppError,
    repositories::sqlx_repo::SqlxContentRepo,
};

#[async_trait]
pub trait ContentRepository<R: Resource>: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Vec<R>, AppError>;
    async fn find(&self, id: &Uuid) -> Result<Option<R>, AppError>;
    async fn insert(&self, input: &R::Input) -> Result<R, AppError>;
    async fn update(&self, id: &Uuid, input: &R::Input) -> Result<R, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}

/// `SELECT * FROM <table> [WHERE id <> $1] ORDER BY <order> [LIMIT $n]`
pub fn select_query<'a, R: Resource>(query: ListQuery) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", R::TABLE));
    if let Some(exclude) = query.exclude_id {
        builder.push(" WHERE id <> ").push_bind(exclude);
    }
    builder.push(format!(" ORDER BY {}", R::ORDER_BY));
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(limit);
    }
    builder
}

pub fn insert_builder<'a>(
    table: &str,
    columns: Vec<(&'static str, SqlValue)>,
) -> QueryBuilder<'a, Postgres> {
    let names = columns.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ");

    let mut builder = QueryBuilder::new(format!("INSERT INTO {table} ({names}) VALUES ("));
    for (i, (_, value)) in columns.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        value.push_bind(&mut builder);
    }
    builder.push(") RETURNING *");
    builder
}

pub fn update_builder<'a>(
    table: &str,
    id: Uuid,
    columns: Vec<(&'static str, SqlValue)>,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {table} SET "));
    for (name, value) in columns {
        builder.push(format!("{name} = "));
        value.push_bind(&mut builder);
        builder.push(", ");
    }
    builder.push("updated_at = NOW() WHERE id = ").push_bind(id);
    builder.push(" RETURNING *");
    builder
}

pub fn insert_query<'a, R: Resource>(input: &R::Input) -> QueryBuilder<'a, Postgres> {
    insert_builder(R::TABLE, input.columns())
}

pub fn update_query<'a, R: Resource>(id: Uuid, input: &R::Input) -> QueryBuilder<'a, Postgres> {
    update_builder(R::TABLE, id, input.columns())
}

#[async_trait]
impl<R: Resource> ContentRepository<R> for SqlxContentRepo<R> {
    async fn list(&self, query: ListQuery) -> Result<Vec<R>, AppError> {
        let rows = select_query::<R>(query)
            .build_query_as::<R>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: &Uuid) -> Result<Option<R>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", R::TABLE);
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, input: &R::Input) -> Result<R, AppError> {
        let row = insert_query::<R>(input)
            .build_query_as::<R>()
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: &Uuid, input: &R::Input) -> Result<R, AppError> {
        update_query::<R>(*id, input)
            .build_query_as::<R>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No {} row with id {id}", R::TABLE)))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No {} row with id {id}", R::TABLE)));
        }
        Ok(())
    }
}
