use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

/// A table that the admin dashboard manages through the generic content repository.
pub trait Resource:
    for<'r> FromRow<'r, PgRow> + Serialize + Clone + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;

    /// ORDER BY clause used for listings, without the keyword.
    const ORDER_BY: &'static str;

    type Input: WriteModel;

    fn id(&self) -> Uuid;
}

/// Column/value pairs written on insert and update.
pub trait WriteModel: Validate + Clone + Send + Sync + 'static {
    fn columns(&self) -> Vec<(&'static str, SqlValue)>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    TextList(Vec<String>),
    Int(i32),
    Bool(bool),
    Uuid(Option<Uuid>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    pub fn push_bind(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::Text(v) => builder.push_bind(v),
            SqlValue::TextList(v) => builder.push_bind(v),
            SqlValue::Int(v) => builder.push_bind(v),
            SqlValue::Bool(v) => builder.push_bind(v),
            SqlValue::Uuid(v) => builder.push_bind(v),
            SqlValue::Timestamp(v) => builder.push_bind(v),
        };
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Vec<String>> for SqlValue {
    fn from(value: Vec<String>) -> Self {
        SqlValue::TextList(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

/// Equality/inequality filter and limit for listing queries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListQuery {
    pub exclude_id: Option<Uuid>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn limit(limit: i64) -> Self {
        ListQuery { exclude_id: None, limit: Some(limit) }
    }

    pub fn related_to(id: Uuid, limit: i64) -> Self {
        ListQuery { exclude_id: Some(id), limit: Some(limit) }
    }
}
