use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    admin_form::AdminTab,
    entities::{
        about::{
            AboutProfile, AboutProfileInput, Achievement, AchievementInput, CareerTimelineItem,
            Skill, SkillInput, TimelineInput,
        },
        availability::{AvailabilityInput, AvailabilityStatus},
        blog_post::{BlogPostDetail, BlogPostInput, Category, CategoryInput, Tag, TagInput},
        project::{Project, ProjectInput},
        resource::{ListQuery, Resource},
    },
    errors::AppError,
    shared_repos::{Repo, SharedRepositories},
};

/// One dashboard list. A failed read never affects the other lists.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SliceState<T> {
    Loaded { items: Vec<T> },
    Failed { message: String },
}

impl<T> SliceState<T> {
    fn settle(section: &str, result: Result<Vec<T>, AppError>) -> Self {
        match result {
            Ok(items) => SliceState::Loaded { items },
            Err(e) => {
                warn!(section, error = %e, "Dashboard list failed");
                SliceState::Failed { message: e.to_string() }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SliceState::Loaded { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub projects: SliceState<Project>,
    pub posts: SliceState<BlogPostDetail>,
    pub categories: SliceState<Category>,
    pub tags: SliceState<Tag>,
    pub profile: SliceState<AboutProfile>,
    pub timeline: SliceState<CareerTimelineItem>,
    pub skills: SliceState<Skill>,
    pub achievements: SliceState<Achievement>,
    pub availability: SliceState<AvailabilityStatus>,
}

/// Rows of a single tab, tagged with the tab name.
#[derive(Debug, Serialize)]
#[serde(tag = "tab", content = "items", rename_all = "snake_case")]
pub enum TabRows {
    Overview(Box<Dashboard>),
    Projects(Vec<Project>),
    Posts(Vec<BlogPostDetail>),
    Categories(Vec<Category>),
    Tags(Vec<Tag>),
    Profile(Vec<AboutProfile>),
    Timeline(Vec<CareerTimelineItem>),
    Skills(Vec<Skill>),
    Achievements(Vec<Achievement>),
    Availability(Vec<AvailabilityStatus>),
}

/// A decoded and validated admin form.
#[derive(Debug, Clone)]
pub enum AdminCommand {
    Project(ProjectInput),
    Post(BlogPostInput),
    Category(CategoryInput),
    Tag(TagInput),
    Profile(AboutProfileInput),
    Timeline(TimelineInput),
    Skill(SkillInput),
    Achievement(AchievementInput),
    Availability(AvailabilityInput),
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, AppError> {
    serde_json::from_value(payload).map_err(|e| AppError::InvalidInput(e.to_string()))
}

impl AdminCommand {
    /// Decodes the tab's form payload, fills derived fields and validates.
    pub fn decode(tab: AdminTab, payload: Value) -> Result<Self, AppError> {
        let command = match tab {
            AdminTab::Overview => {
                return Err(AppError::NotFound("The overview tab has no form".into()))
            }
            AdminTab::Projects => AdminCommand::Project(parse(payload)?),
            AdminTab::Posts => AdminCommand::Post(parse::<BlogPostInput>(payload)?.normalize()),
            AdminTab::Categories => {
                AdminCommand::Category(parse::<CategoryInput>(payload)?.normalize())
            }
            AdminTab::Tags => AdminCommand::Tag(parse::<TagInput>(payload)?.normalize()),
            AdminTab::Profile => AdminCommand::Profile(parse(payload)?),
            AdminTab::Timeline => AdminCommand::Timeline(parse(payload)?),
            AdminTab::Skills => AdminCommand::Skill(parse(payload)?),
            AdminTab::Achievements => AdminCommand::Achievement(parse(payload)?),
            AdminTab::Availability => AdminCommand::Availability(parse(payload)?),
        };
        command.validate()?;
        Ok(command)
    }

    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            AdminCommand::Project(input) => input.validate(),
            AdminCommand::Post(input) => input.validate(),
            AdminCommand::Category(input) => input.validate(),
            AdminCommand::Tag(input) => input.validate(),
            AdminCommand::Profile(input) => input.validate(),
            AdminCommand::Timeline(input) => input.validate(),
            AdminCommand::Skill(input) => input.validate(),
            AdminCommand::Achievement(input) => input.validate(),
            AdminCommand::Availability(input) => input.validate(),
        }
    }

    pub fn tab(&self) -> AdminTab {
        match self {
            AdminCommand::Project(_) => AdminTab::Projects,
            AdminCommand::Post(_) => AdminTab::Posts,
            AdminCommand::Category(_) => AdminTab::Categories,
            AdminCommand::Tag(_) => AdminTab::Tags,
            AdminCommand::Profile(_) => AdminTab::Profile,
            AdminCommand::Timeline(_) => AdminTab::Timeline,
            AdminCommand::Skill(_) => AdminTab::Skills,
            AdminCommand::Achievement(_) => AdminTab::Achievements,
            AdminCommand::Availability(_) => AdminTab::Availability,
        }
    }
}

/// The row a create or update wrote.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AdminItem {
    Project(Project),
    Post(Box<BlogPostDetail>),
    Category(Category),
    Tag(Tag),
    Profile(AboutProfile),
    Timeline(CareerTimelineItem),
    Skill(Skill),
    Achievement(Achievement),
    Availability(AvailabilityStatus),
}

async fn write<R: Resource>(
    repo: &Repo<R>,
    id: Option<&Uuid>,
    input: &R::Input,
) -> Result<R, AppError> {
    match id {
        Some(id) => repo.update(id, input).await,
        None => repo.insert(input).await,
    }
}

#[derive(Clone)]
pub struct AdminHandler {
    repos: SharedRepositories,
}

impl AdminHandler {
    pub fn new(repos: SharedRepositories) -> Self {
        AdminHandler { repos }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Dashboard {
        let repos = &self.repos;
        let (
            projects,
            posts,
            categories,
            tags,
            profile,
            timeline,
            skills,
            achievements,
            availability,
        ) = futures::join!(
            repos.projects.list(ListQuery::all()),
            repos.posts.list_all(),
            repos.categories.list(ListQuery::all()),
            repos.tags.list(ListQuery::all()),
            repos.profiles.list(ListQuery::all()),
            repos.timeline.list(ListQuery::all()),
            repos.skills.list(ListQuery::all()),
            repos.achievements.list(ListQuery::all()),
            repos.availability.list(),
        );

        Dashboard {
            projects: SliceState::settle("projects", projects),
            posts: SliceState::settle("posts", posts),
            categories: SliceState::settle("categories", categories),
            tags: SliceState::settle("tags", tags),
            profile: SliceState::settle("profile", profile),
            timeline: SliceState::settle("timeline", timeline),
            skills: SliceState::settle("skills", skills),
            achievements: SliceState::settle("achievements", achievements),
            availability: SliceState::settle("availability", availability),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, tab: AdminTab) -> Result<TabRows, AppError> {
        let repos = &self.repos;
        let rows = match tab {
            AdminTab::Overview => TabRows::Overview(Box::new(self.dashboard().await)),
            AdminTab::Projects => TabRows::Projects(repos.projects.list(ListQuery::all()).await?),
            AdminTab::Posts => TabRows::Posts(repos.posts.list_all().await?),
            AdminTab::Categories => {
                TabRows::Categories(repos.categories.list(ListQuery::all()).await?)
            }
            AdminTab::Tags => TabRows::Tags(repos.tags.list(ListQuery::all()).await?),
            AdminTab::Profile => TabRows::Profile(repos.profiles.list(ListQuery::all()).await?),
            AdminTab::Timeline => TabRows::Timeline(repos.timeline.list(ListQuery::all()).await?),
            AdminTab::Skills => TabRows::Skills(repos.skills.list(ListQuery::all()).await?),
            AdminTab::Achievements => {
                TabRows::Achievements(repos.achievements.list(ListQuery::all()).await?)
            }
            AdminTab::Availability => TabRows::Availability(repos.availability.list().await?),
        };
        Ok(rows)
    }

    pub async fn create(&self, command: &AdminCommand) -> Result<AdminItem, AppError> {
        let item = self.dispatch(command, None).await?;
        info!(tab = %command.tab(), "Admin item created");
        Ok(item)
    }

    pub async fn update(&self, id: &Uuid, command: &AdminCommand) -> Result<AdminItem, AppError> {
        let item = self.dispatch(command, Some(id)).await?;
        info!(tab = %command.tab(), %id, "Admin item updated");
        Ok(item)
    }

    async fn dispatch(
        &self,
        command: &AdminCommand,
        id: Option<&Uuid>,
    ) -> Result<AdminItem, AppError> {
        let repos = &self.repos;
        let item = match command {
            AdminCommand::Project(input) => {
                AdminItem::Project(write(&repos.projects, id, input).await?)
            }
            AdminCommand::Post(input) => {
                let detail = match id {
                    Some(id) => repos.posts.update(id, input).await?,
                    None => repos.posts.create(input).await?,
                };
                AdminItem::Post(Box::new(detail))
            }
            AdminCommand::Category(input) => {
                AdminItem::Category(write(&repos.categories, id, input).await?)
            }
            AdminCommand::Tag(input) => AdminItem::Tag(write(&repos.tags, id, input).await?),
            AdminCommand::Profile(input) => {
                AdminItem::Profile(write(&repos.profiles, id, input).await?)
            }
            AdminCommand::Timeline(input) => {
                AdminItem::Timeline(write(&repos.timeline, id, input).await?)
            }
            AdminCommand::Skill(input) => AdminItem::Skill(write(&repos.skills, id, input).await?),
            AdminCommand::Achievement(input) => {
                AdminItem::Achievement(write(&repos.achievements, id, input).await?)
            }
            AdminCommand::Availability(input) => {
                AdminItem::Availability(repos.availability.save(id.copied(), input).await?)
            }
        };
        Ok(item)
    }

    /// Deletion is permanent, so it must be confirmed explicitly.
    pub async fn delete(&self, tab: AdminTab, id: &Uuid, confirmed: bool) -> Result<(), AppError> {
        let no_rows = || AppError::NotFound("The overview tab has no rows".into());
        if !tab.has_form() {
            return Err(no_rows());
        }
        if !confirmed {
            return Err(AppError::ConfirmationRequired(
                "Are you sure you want to delete this item? \
                 Repeat the request with confirm=true"
                    .into(),
            ));
        }

        let repos = &self.repos;
        match tab {
            AdminTab::Overview => return Err(no_rows()),
            AdminTab::Projects => repos.projects.delete(id).await?,
            AdminTab::Posts => repos.posts.delete(id).await?,
            AdminTab::Categories => repos.categories.delete(id).await?,
            AdminTab::Tags => repos.tags.delete(id).await?,
            AdminTab::Profile => repos.profiles.delete(id).await?,
            AdminTab::Timeline => repos.timeline.delete(id).await?,
            AdminTab::Skills => repos.skills.delete(id).await?,
            AdminTab::Achievements => repos.achievements.delete(id).await?,
            AdminTab::Availability => repos.availability.delete(id).await?,
        }

        info!(%tab, %id, "Admin item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_payload_gets_slug_and_read_time() {
        let command = AdminCommand::decode(
            AdminTab::Posts,
            json!({"title": "Hello, World!  Foo", "slug": "", "content": "x".repeat(1500)}),
        )
        .unwrap();
        let AdminCommand::Post(post) = command else {
            panic!("expected a post command");
        };
        assert_eq!(post.slug, "hello-world-foo");
        assert_eq!(post.read_time, 2);
    }

    #[test]
    fn project_lists_accept_comma_separated_text() {
        let command = AdminCommand::decode(
            AdminTab::Projects,
            json!({"title": "Site", "tags": "UI/UX, , Frontend", "images": ["a.png", " "]}),
        )
        .unwrap();
        let AdminCommand::Project(project) = command else {
            panic!("expected a project command");
        };
        assert_eq!(project.tags, ["UI/UX", "Frontend"]);
        assert_eq!(project.images, ["a.png"]);
    }

    #[test]
    fn availability_command_keeps_its_tab() {
        let command = AdminCommand::decode(
            AdminTab::Availability,
            json!({"status": "Busy", "message": "", "is_active": "on"}),
        )
        .unwrap();
        assert_eq!(command.tab(), AdminTab::Availability);
        let AdminCommand::Availability(input) = command else {
            panic!("expected an availability command");
        };
        assert!(input.is_active);
        assert!(input.message.is_none());
    }

    #[test]
    fn failed_slice_carries_its_message() {
        let loaded = SliceState::settle("skills", Ok(vec![1, 2]));
        assert!(loaded.is_loaded());

        let down = AppError::InternalError("down".into());
        let failed = SliceState::<i32>::settle("projects", Err(down));
        assert!(!failed.is_loaded());
        assert!(matches!(
            failed,
            SliceState::Failed { ref message } if message == "Internal server error: down"
        ));
    }

    #[test]
    fn skill_level_out_of_range_is_rejected() {
        let payload = json!({"name": "Figma", "level": "150"});
        let err = AdminCommand::decode(AdminTab::Skills, payload).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn overview_and_malformed_payloads_are_refused() {
        assert!(matches!(
            AdminCommand::decode(AdminTab::Overview, json!({})),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            AdminCommand::decode(AdminTab::Tags, json!({"name": 7})),
            Err(AppError::InvalidInput(_))
        ));
    }
}
