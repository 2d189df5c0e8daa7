use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::resource::{Resource, SqlValue, WriteModel},
    forms::{
        blank_as_none, estimate_read_time, lenient_bool, list_field, optional_datetime,
        optional_uuid, slug_or_generate, uuid_list, SLUG_PATTERN,
    },
    utils::markdown::{plain_text, safe_markdown_to_html},
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub images: Vec<String>,
    pub category_id: Option<Uuid>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub author_avatar: Option<String>,
    pub status: String,
    pub featured: bool,
    pub read_time: i32,
    pub views: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tag row joined through `blog_post_tags`.
#[derive(Debug, sqlx::FromRow)]
pub struct PostTagRow {
    pub post_id: Uuid,
    #[sqlx(flatten)]
    pub tag: Tag,
}

/// A post with its category and tags resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

impl Resource for Category {
    const TABLE: &'static str = "blog_categories";
    const ORDER_BY: &'static str = "name ASC";
    type Input = CategoryInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for Tag {
    const TABLE: &'static str = "blog_tags";
    const ORDER_BY: &'static str = "name ASC";
    type Input = TagInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BlogPostInput {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(regex(path = *SLUG_PATTERN, message = "Slug may only contain lowercase letters, digits and dashes"))]
    pub slug: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub content: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub featured_image: Option<String>,

    #[serde(default, deserialize_with = "list_field")]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "optional_uuid")]
    pub category_id: Option<Uuid>,

    #[serde(default, deserialize_with = "uuid_list")]
    pub tag_ids: Vec<Uuid>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub author_name: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid author email"))]
    pub author_email: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub author_avatar: Option<String>,

    #[serde(default)]
    pub status: PostStatus,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,

    #[serde(default, deserialize_with = "optional_datetime")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub read_time: i32,
}

impl BlogPostInput {
    /// Fills the derived fields: slug, read time and publication stamp.
    pub fn normalize(mut self) -> Self {
        self.slug = slug_or_generate(&self.slug, &self.title);
        self.read_time = estimate_read_time(&self.content);
        if self.status == PostStatus::Published && self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
        self
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", self.title.trim().to_string().into()),
            ("slug", self.slug.clone().into()),
            ("excerpt", self.excerpt.clone().into()),
            ("content", self.content.clone().into()),
            ("featured_image", self.featured_image.clone().into()),
            ("images", self.images.clone().into()),
            ("category_id", SqlValue::Uuid(self.category_id)),
            ("author_name", self.author_name.clone().into()),
            ("author_email", self.author_email.clone().into()),
            ("author_avatar", self.author_avatar.clone().into()),
            ("status", self.status.as_str().to_string().into()),
            ("featured", self.featured.into()),
            ("read_time", self.read_time.into()),
            ("published_at", SqlValue::Timestamp(self.published_at)),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(regex(path = *SLUG_PATTERN, message = "Slug may only contain lowercase letters, digits and dashes"))]
    pub slug: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub color: Option<String>,
}

impl CategoryInput {
    pub fn normalize(mut self) -> Self {
        self.slug = slug_or_generate(&self.slug, &self.name);
        self
    }
}

impl WriteModel for CategoryInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", self.name.trim().to_string().into()),
            ("slug", self.slug.clone().into()),
            ("description", self.description.clone().into()),
            ("color", self.color.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 50, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(regex(path = *SLUG_PATTERN, message = "Slug may only contain lowercase letters, digits and dashes"))]
    pub slug: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub color: Option<String>,
}

impl TagInput {
    pub fn normalize(mut self) -> Self {
        self.slug = slug_or_generate(&self.slug, &self.name);
        self
    }
}

impl WriteModel for TagInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", self.name.trim().to_string().into()),
            ("slug", self.slug.clone().into()),
            ("color", self.color.clone().into()),
        ]
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryBadge {
    pub name: String,
    pub color: Option<String>,
}

/// Listing card for the blog and home pages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub date: Option<String>,
    pub read_time: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<CategoryBadge>,
    pub featured: bool,
    pub views: i32,
}

const EXCERPT_CHARS: usize = 160;

fn derived_excerpt(content: &str) -> String {
    let text = plain_text(content);
    if text.chars().count() <= EXCERPT_CHARS {
        return text;
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    match cut.rfind(' ') {
        Some(idx) => format!("{}...", &cut[..idx]),
        None => format!("{cut}..."),
    }
}

pub fn read_time_label(minutes: i32) -> String {
    format!("{} min read", minutes.max(1))
}

impl From<&BlogPostDetail> for PostCard {
    fn from(detail: &BlogPostDetail) -> Self {
        let post = &detail.post;
        PostCard {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post
                .excerpt
                .clone()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| derived_excerpt(&post.content)),
            author: post.author_name.clone().unwrap_or_else(|| "Anonymous".to_string()),
            date: post.published_at.map(|at| at.date_naive().to_string()),
            read_time: read_time_label(post.read_time),
            image: post.featured_image.clone(),
            tags: detail.tags.iter().map(|t| t.name.clone()).collect(),
            category: detail.category.as_ref().map(|c| CategoryBadge {
                name: c.name.clone(),
                color: c.color.clone(),
            }),
            featured: post.featured,
            views: post.views,
        }
    }
}

/// Full post for the detail page, markdown rendered to sanitized HTML.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostView {
    #[serde(flatten)]
    pub detail: BlogPostDetail,
    pub content_html: String,
    pub read_time_label: String,
}

impl From<BlogPostDetail> for BlogPostView {
    fn from(detail: BlogPostDetail) -> Self {
        let content_html = safe_markdown_to_html(&detail.post.content);
        let read_time_label = read_time_label(detail.post.read_time);
        BlogPostView { detail, content_html, read_time_label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_derives_slug_read_time_and_publication_stamp() {
        let input: BlogPostInput = serde_json::from_value(json!({
            "title": "Hello, World!  Foo",
            "slug": "",
            "content": "x".repeat(2500),
            "status": "published",
            "tag_ids": ""
        }))
        .unwrap();

        let input = input.normalize();
        assert_eq!(input.slug, "hello-world-foo");
        assert_eq!(input.read_time, 3);
        assert!(input.published_at.is_some());
        assert!(input.tag_ids.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn drafts_are_not_stamped() {
        let input: BlogPostInput = serde_json::from_value(json!({"title": "Draft"})).unwrap();
        let input = input.normalize();
        assert_eq!(input.status, PostStatus::Draft);
        assert!(input.published_at.is_none());
    }

    #[test]
    fn explicit_slug_must_be_url_safe() {
        let input: CategoryInput =
            serde_json::from_value(json!({"name": "Design", "slug": "Not A Slug"})).unwrap();
        assert!(input.normalize().validate().is_err());
    }

    #[test]
    fn blank_category_id_becomes_null() {
        let input: BlogPostInput =
            serde_json::from_value(json!({"title": "T", "category_id": "  "})).unwrap();
        assert!(input.category_id.is_none());
    }

    #[test]
    fn long_bodies_get_a_word_boundary_excerpt() {
        let body = format!("## Intro\n\n{}", "word ".repeat(60));
        let excerpt = derived_excerpt(&body);
        assert!(excerpt.starts_with("Intro word"));
        assert!(excerpt.ends_with("word..."));
        assert!(excerpt.chars().count() <= EXCERPT_CHARS + 3);
    }
}
