use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::resource::{Resource, SqlValue, WriteModel},
    forms::{blank_as_none, list_field},
};

pub const DEFAULT_PROJECT_IMAGE: &str =
    "https://images.pexels.com/photos/196644/pexels-photo-196644.jpeg?auto=compress&cs=tinysrgb&w=600";

/// Tag filters offered on the projects listing.
pub const PROJECT_FILTERS: [&str; 6] =
    ["All", "Web Design", "Mobile Apps", "UI/UX", "Frontend", "Branding"];

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Project {
    const TABLE: &'static str = "projects";
    const ORDER_BY: &'static str = "created_at DESC";
    type Input = ProjectInput;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub long_description: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "list_field")]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "list_field")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "list_field")]
    pub technologies: Vec<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub live_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub github_url: Option<String>,
}

impl WriteModel for ProjectInput {
    fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", self.title.trim().to_string().into()),
            ("description", self.description.clone().into()),
            ("long_description", self.long_description.clone().into()),
            ("image", self.image.clone().into()),
            ("images", self.images.clone().into()),
            ("tags", self.tags.clone().into()),
            ("technologies", self.technologies.clone().into()),
            ("date", self.date.clone().into()),
            ("status", self.status.clone().into()),
            ("live_url", self.live_url.clone().into()),
            ("github_url", self.github_url.clone().into()),
        ]
    }
}

/// A project as the public pages render it, with every gap filled in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    pub date: String,
    pub status: String,
    pub live_url: String,
    pub github_url: String,
}

impl ProjectView {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Gallery source: the image list, or the cover image on its own.
    pub fn gallery_images(&self) -> Vec<String> {
        if self.images.is_empty() {
            vec![self.image.clone()]
        } else {
            self.images.clone()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty(values: Vec<String>, default: &[&str]) -> Vec<String> {
    if values.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        values
    }
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        let title = if project.title.trim().is_empty() {
            "Untitled Project".to_string()
        } else {
            project.title
        };
        let description = non_blank(project.description);
        let long_description = non_blank(project.long_description)
            .or_else(|| description.clone())
            .unwrap_or_else(|| "No description available.".to_string());

        ProjectView {
            id: project.id.to_string(),
            title,
            description: description.unwrap_or_else(|| "No description available.".to_string()),
            long_description,
            image: non_blank(project.image).unwrap_or_else(|| DEFAULT_PROJECT_IMAGE.to_string()),
            images: project.images,
            tags: non_empty(project.tags, &["Web Design"]),
            technologies: non_empty(project.technologies, &["React", "TypeScript"]),
            date: non_blank(project.date).unwrap_or_else(|| Utc::now().date_naive().to_string()),
            status: non_blank(project.status).unwrap_or_else(|| "Completed".to_string()),
            live_url: non_blank(project.live_url).unwrap_or_else(|| "#".to_string()),
            github_url: non_blank(project.github_url).unwrap_or_else(|| "#".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            title: " ".into(),
            description: None,
            long_description: None,
            image: None,
            images: vec![],
            tags: vec![],
            technologies: vec![],
            date: None,
            status: None,
            live_url: Some("".into()),
            github_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn render_defaults_fill_missing_fields() {
        let view = ProjectView::from(bare_project());

        assert_eq!(view.title, "Untitled Project");
        assert_eq!(view.description, "No description available.");
        assert_eq!(view.long_description, "No description available.");
        assert_eq!(view.image, DEFAULT_PROJECT_IMAGE);
        assert_eq!(view.tags, vec!["Web Design"]);
        assert_eq!(view.technologies, vec!["React", "TypeScript"]);
        assert_eq!(view.status, "Completed");
        assert_eq!(view.live_url, "#");
        assert_eq!(view.github_url, "#");
        assert_eq!(view.date, Utc::now().date_naive().to_string());
    }

    #[test]
    fn long_description_falls_back_to_description() {
        let mut project = bare_project();
        project.description = Some("Short".into());
        let view = ProjectView::from(project);
        assert_eq!(view.long_description, "Short");
    }

    #[test]
    fn gallery_uses_cover_when_no_images() {
        let view = ProjectView::from(bare_project());
        assert_eq!(view.gallery_images(), vec![DEFAULT_PROJECT_IMAGE.to_string()]);
    }
}
