use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::resource::{Resource, SqlValue, WriteModel},
    forms::{blank_as_none, lenient_i32},
};

pub const SKILL_FILTERS: [&str; 5] = ["All", "Design", "Frontend", "Backend", "Tools"];

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AboutProfile {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CareerTimelineItem {
    pub id: Uuid,
    pub title: String,
    pub company: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: i32,
    pub category: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for AboutProfile {
    const TABLE: &'static str = "about_profile";
    const ORDER_BY: &'static str = "created_at DESC";
    type Input = AboutProfileInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for CareerTimelineItem {
    const TABLE: &'static str = "career_timeline";
    const ORDER_BY: &'static str = "order_index ASC";
    type Input = TimelineInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for Skill {
    const TABLE: &'static str = "skills";
    const ORDER_BY: &'static str = "order_index ASC";
    type Input = SkillInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Resource for Achievement {
    const TABLE: &'static str = "achievements";
    const ORDER_BY: &'static str = "order_index ASC";
    type Input = AchievementInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AboutProfileInput {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub profile_image: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub resume_url: Option<String>,
}

impl WriteModel for AboutProfileInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", self.name.trim().to_string().into()),
            ("title", self.title.clone().into()),
            ("bio", self.bio.clone().into()),
            ("profile_image", self.profile_image.clone().into()),
            ("resume_url", self.resume_url.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TimelineInput {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub company: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub period: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub icon: Option<String>,

    #[serde(default, deserialize_with = "lenient_i32")]
    pub order_index: i32,
}

impl WriteModel for TimelineInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", self.title.trim().to_string().into()),
            ("company", self.company.clone().into()),
            ("period", self.period.clone().into()),
            ("description", self.description.clone().into()),
            ("icon", self.icon.clone().into()),
            ("order_index", self.order_index.into()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SkillInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_i32")]
    #[validate(range(min = 0, max = 100, message = "Level must be between 0 and 100"))]
    pub level: i32,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient_i32")]
    pub order_index: i32,
}

impl WriteModel for SkillInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", self.name.trim().to_string().into()),
            ("level", self.level.into()),
            ("category", self.category.clone().into()),
            ("order_index", self.order_index.into()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AchievementInput {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub year: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub icon: Option<String>,

    #[serde(default, deserialize_with = "lenient_i32")]
    pub order_index: i32,
}

impl WriteModel for AchievementInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", self.title.trim().to_string().into()),
            ("description", self.description.clone().into()),
            ("year", self.year.clone().into()),
            ("icon", self.icon.clone().into()),
            ("order_index", self.order_index.into()),
        ]
    }
}

/// Profile block on the about page; bio split into paragraphs on blank lines.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub title: String,
    pub bio: Vec<String>,
    pub profile_image: Option<String>,
    pub resume_url: Option<String>,
}

pub fn split_paragraphs(bio: &str) -> Vec<String> {
    bio.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<AboutProfile> for ProfileView {
    fn from(profile: AboutProfile) -> Self {
        ProfileView {
            name: profile.name,
            title: profile.title.unwrap_or_default(),
            bio: profile.bio.as_deref().map(split_paragraphs).unwrap_or_default(),
            profile_image: profile.profile_image,
            resume_url: profile.resume_url,
        }
    }
}

/// `All` (or no filter) keeps every skill; any other value must equal the
/// category exactly.
pub fn filter_skills(skills: Vec<Skill>, filter: Option<&str>) -> Vec<Skill> {
    match filter {
        None | Some("All") => skills,
        Some(wanted) => skills
            .into_iter()
            .filter(|s| s.category.as_deref() == Some(wanted))
            .collect(),
    }
}
