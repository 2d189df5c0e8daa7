use std::marker::PhantomData;

use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxBlogPostRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxAvailabilityRepo {
    pub pool: PgPool,
}

/// Generic CRUD over one `Resource` table.
pub struct SqlxContentRepo<R> {
    pub pool: PgPool,
    _resource: PhantomData<fn() -> R>,
}

impl<R> SqlxContentRepo<R> {
    pub fn new(pool: PgPool) -> Self {
        SqlxContentRepo { pool, _resource: PhantomData }
    }
}

impl<R> Clone for SqlxContentRepo<R> {
    fn clone(&self) -> Self {
        SqlxContentRepo::new(self.pool.clone())
    }
}
