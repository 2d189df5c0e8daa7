use std::sync::Arc;

use crate::{
    entities::{
        about::{AboutProfile, Achievement, CareerTimelineItem, Skill},
        blog_post::{Category, Tag},
        project::Project,
    },
    repositories::{
        availability::AvailabilityRepository,
        blog_post::BlogPostRepository,
        content::ContentRepository,
        sqlx_repo::{SqlxAvailabilityRepo, SqlxBlogPostRepo, SqlxContentRepo, SqlxUserRepo},
        user::UserRepository,
    },
};

pub type Repo<R> = Arc<dyn ContentRepository<R>>;

/// Every store the handlers read from, behind trait objects so tests can swap
/// in memory-backed versions.
#[derive(Clone)]
pub struct SharedRepositories {
    pub projects: Repo<Project>,
    pub categories: Repo<Category>,
    pub tags: Repo<Tag>,
    pub profiles: Repo<AboutProfile>,
    pub timeline: Repo<CareerTimelineItem>,
    pub skills: Repo<Skill>,
    pub achievements: Repo<Achievement>,
    pub posts: Arc<dyn BlogPostRepository>,
    pub availability: Arc<dyn AvailabilityRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            projects: Arc::new(SqlxContentRepo::<Project>::new(pool.clone())),
            categories: Arc::new(SqlxContentRepo::<Category>::new(pool.clone())),
            tags: Arc::new(SqlxContentRepo::<Tag>::new(pool.clone())),
            profiles: Arc::new(SqlxContentRepo::<AboutProfile>::new(pool.clone())),
            timeline: Arc::new(SqlxContentRepo::<CareerTimelineItem>::new(pool.clone())),
            skills: Arc::new(SqlxContentRepo::<Skill>::new(pool.clone())),
            achievements: Arc::new(SqlxContentRepo::<Achievement>::new(pool.clone())),
            posts: Arc::new(SqlxBlogPostRepo::new(pool.clone())),
            availability: Arc::new(SqlxAvailabilityRepo::new(pool.clone())),
            users: Arc::new(SqlxUserRepo::new(pool)),
        }
    }
}
