pub mod sqlx_repo;
pub mod content;
pub mod blog_post;
pub mod availability;
pub mod user;
