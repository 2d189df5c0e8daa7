use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool, Postgres, QueryBuilder, Transaction};

use crate::{
    entities::{
        blog_post::{BlogPost, BlogPostDetail, BlogPostInput, Category, PostTagRow, Tag},
        resource::ListQuery,
    },
    errors::AppError,
    repositories::{
        content::{insert_builder, update_builder},
        sqlx_repo::SqlxBlogPostRepo,
    },
};

#[async_trait]
pub trait BlogPostRepository: Sync + Send {
    /// Published posts, newest publication first.
    async fn list_published(&self, query: ListQuery) -> Result<Vec<BlogPostDetail>, AppError>;
    /// Every post regardless of status, newest first.
    async fn list_all(&self) -> Result<Vec<BlogPostDetail>, AppError>;
    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<BlogPostDetail>, AppError>;
    async fn increment_views(&self, slug: &str) -> Result<(), AppError>;
    async fn create(&self, input: &BlogPostInput) -> Result<BlogPostDetail, AppError>;
    async fn update(&self, id: &Uuid, input: &BlogPostInput) -> Result<BlogPostDetail, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }

    async fn hydrate(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPostDetail>, AppError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: Vec<Uuid> = posts.iter().filter_map(|p| p.category_id).collect();
        let categories: Vec<Category> = if category_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as("SELECT * FROM blog_categories WHERE id = ANY($1)")
                .bind(category_ids)
                .fetch_all(&self.pool)
                .await?
        };

        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let tag_rows: Vec<PostTagRow> = sqlx::query_as(
            r#"
            SELECT pt.post_id, t.*
            FROM blog_post_tags pt
            JOIN blog_tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name ASC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut tags_by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags_by_post.entry(row.post_id).or_default().push(row.tag);
        }

        Ok(posts
            .into_iter()
            .map(|post| BlogPostDetail {
                category: post
                    .category_id
                    .and_then(|cid| categories.iter().find(|c| c.id == cid).cloned()),
                tags: tags_by_post.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect())
    }

    async fn hydrate_one(&self, post: BlogPost) -> Result<BlogPostDetail, AppError> {
        self.hydrate(vec![post])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("Post vanished while loading tags".into()))
    }
}

async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM blog_post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut **tx)
        .await?;

    if !tag_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO blog_post_tags (post_id, tag_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(tag_ids.to_vec())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

fn slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("blog_posts_slug_key") {
            return AppError::Conflict("A post with this slug already exists".into());
        }
    }
    AppError::from(e)
}

fn published_query<'a>(query: ListQuery) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("SELECT * FROM blog_posts WHERE status = 'published'");
    if let Some(exclude) = query.exclude_id {
        builder.push(" AND id <> ").push_bind(exclude);
    }
    builder.push(" ORDER BY published_at DESC NULLS LAST");
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(limit);
    }
    builder
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn list_published(&self, query: ListQuery) -> Result<Vec<BlogPostDetail>, AppError> {
        let posts: Vec<BlogPost> = published_query(query)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;
        self.hydrate(posts).await
    }

    async fn list_all(&self) -> Result<Vec<BlogPostDetail>, AppError> {
        let posts: Vec<BlogPost> =
            sqlx::query_as("SELECT * FROM blog_posts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        self.hydrate(posts).await
    }

    async fn get_published_by_slug(&self, slug: &str) -> Result<Option<BlogPostDetail>, AppError> {
        let post: Option<BlogPost> = sqlx::query_as(
            "SELECT * FROM blog_posts WHERE slug = $1 AND status = 'published'",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match post {
            Some(post) => Ok(Some(self.hydrate_one(post).await?)),
            None => Ok(None),
        }
    }

    async fn increment_views(&self, slug: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE blog_posts SET views = views + 1 WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create(&self, input: &BlogPostInput) -> Result<BlogPostDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let post: BlogPost = insert_builder("blog_posts", input.columns())
            .build_query_as()
            .fetch_one(&mut *tx)
            .await
            .map_err(slug_conflict)?;
        replace_tags(&mut tx, post.id, &input.tag_ids).await?;

        tx.commit().await?;
        self.hydrate_one(post).await
    }

    async fn update(&self, id: &Uuid, input: &BlogPostInput) -> Result<BlogPostDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let post: BlogPost = update_builder("blog_posts", *id, input.columns())
            .build_query_as()
            .fetch_optional(&mut *tx)
            .await
            .map_err(slug_conflict)?
            .ok_or_else(|| AppError::NotFound(format!("Blog post {id} not found")))?;
        replace_tags(&mut tx, post.id, &input.tag_ids).await?;

        tx.commit().await?;
        self.hydrate_one(post).await
    }

    async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog post {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_posts_exclude_the_current_one() {
        let sql = published_query(ListQuery::related_to(Uuid::nil(), 3)).into_sql();
        assert_eq!(
            sql,
            "SELECT * FROM blog_posts WHERE status = 'published' AND id <> $1 \
             ORDER BY published_at DESC NULLS LAST LIMIT $2"
        );
    }
}
