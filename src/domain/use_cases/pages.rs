use serde::Serialize;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{
    background_task::BackgroundTasks,
    entities::{
        about::{filter_skills, Achievement, CareerTimelineItem, ProfileView, Skill, SKILL_FILTERS},
        availability::AvailabilityView,
        blog_post::{BlogPostDetail, BlogPostView, PostCard},
        contact::{ContactPage, CONTACT_INFO},
        page::{DataSource, Link, PageState},
        project::{ProjectView, PROJECT_FILTERS},
        resource::ListQuery,
        resume::{Resume, RESUME},
    },
    gallery::GalleryLayout,
    shared_repos::SharedRepositories,
    use_cases::fallback,
};

const HOME_PROJECTS: i64 = 3;
const HOME_POSTS: i64 = 3;
const RELATED_LIMIT: i64 = 3;

#[derive(Debug, Serialize)]
pub struct Hero {
    pub title: &'static str,
    pub tagline: &'static str,
}

static HERO: Hero = Hero {
    title: "Product Designer",
    tagline: "Product designer obsessed with accessibility, rapid prototyping, and AI-driven innovation. \
              Partnering with teams to turn bold ideas into inclusive, responsive experiences, fast. \
              Let's build digital products that empower every user and push what's possible.",
};

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub hero: &'static Hero,
    pub featured_projects: PageState<Vec<ProjectView>>,
    pub latest_posts: PageState<Vec<PostCard>>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsPage {
    pub filters: Vec<&'static str>,
    pub active_filter: String,
    pub projects: Vec<ProjectView>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailPage {
    pub project: ProjectView,
    pub gallery: GalleryLayout,
    pub related: Vec<ProjectView>,
}

#[derive(Debug, Serialize)]
pub struct BlogPage {
    pub featured: Option<PostCard>,
    pub posts: Vec<PostCard>,
}

impl BlogPage {
    /// The first featured post leads the page; no featured post stays in `posts`.
    pub fn from_cards(cards: Vec<PostCard>) -> Self {
        let (featured, posts): (Vec<_>, Vec<_>) = cards.into_iter().partition(|c| c.featured);
        BlogPage { featured: featured.into_iter().next(), posts }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogPostPage {
    pub post: BlogPostView,
    pub gallery: GalleryLayout,
    pub related: Vec<PostCard>,
}

#[derive(Debug, Serialize)]
pub struct AboutPage {
    pub profile: ProfileView,
    pub timeline: Vec<CareerTimelineItem>,
    pub skill_filters: Vec<&'static str>,
    pub active_skill_filter: String,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,
}

fn cards(details: &[BlogPostDetail]) -> Vec<PostCard> {
    details.iter().map(PostCard::from).collect()
}

fn live_or_empty<T>(items: Vec<T>) -> PageState<Vec<T>> {
    if items.is_empty() {
        PageState::Empty
    } else {
        PageState::live(items)
    }
}

/// Reads behind every public page. Listing pages never fail: a read error
/// swaps in fallback content. Detail pages report absence as `NotFound`.
#[derive(Clone)]
pub struct PagesHandler {
    repos: SharedRepositories,
    tasks: BackgroundTasks,
}

impl PagesHandler {
    pub fn new(repos: SharedRepositories, tasks: BackgroundTasks) -> Self {
        PagesHandler { repos, tasks }
    }

    #[instrument(skip(self))]
    pub async fn home(&self) -> HomePage {
        let (projects, posts) = futures::join!(
            self.repos.projects.list(ListQuery::limit(HOME_PROJECTS)),
            self.repos.posts.list_published(ListQuery::limit(HOME_POSTS)),
        );

        let featured_projects = match projects {
            Ok(rows) => live_or_empty(rows.into_iter().map(ProjectView::from).collect()),
            Err(e) => {
                warn!(error = %e, "Home projects read failed, serving fallback");
                PageState::fallback(fallback::featured_projects())
            }
        };

        let latest_posts = match posts {
            Ok(rows) => live_or_empty(cards(&rows)),
            Err(e) => {
                warn!(error = %e, "Home posts read failed");
                PageState::Empty
            }
        };

        HomePage { hero: &HERO, featured_projects, latest_posts }
    }

    #[instrument(skip(self))]
    pub async fn projects(&self, filter: Option<&str>) -> PageState<ProjectsPage> {
        let active_filter = filter.unwrap_or("All").to_string();
        let (projects, source) = match self.repos.projects.list(ListQuery::all()).await {
            Ok(rows) if rows.is_empty() => return PageState::Empty,
            Ok(rows) => {
                let views = rows.into_iter().map(ProjectView::from).collect::<Vec<_>>();
                (views, DataSource::Live)
            }
            Err(e) => {
                warn!(error = %e, "Projects read failed, serving fallback");
                (fallback::projects(), DataSource::Fallback)
            }
        };

        let projects = match active_filter.as_str() {
            "All" => projects,
            tag => projects.into_iter().filter(|p| p.has_tag(tag)).collect(),
        };

        PageState::Ready {
            data: ProjectsPage {
                filters: PROJECT_FILTERS.to_vec(),
                active_filter,
                projects,
            },
            source,
        }
    }

    #[instrument(skip(self))]
    pub async fn project_detail(&self, id: &str) -> PageState<ProjectDetailPage> {
        let not_found = || {
            PageState::not_found(
                "The project you're looking for doesn't exist.",
                Link::new("Back to Projects", "/projects"),
            )
        };

        let Ok(id) = Uuid::parse_str(id) else {
            return not_found();
        };

        let project = match self.repos.projects.find(&id).await {
            Ok(Some(project)) => ProjectView::from(project),
            Ok(None) => return not_found(),
            Err(e) => {
                warn!(%id, error = %e, "Project read failed");
                return not_found();
            }
        };

        let related_query = ListQuery::related_to(id, RELATED_LIMIT);
        let related = match self.repos.projects.list(related_query).await {
            Ok(rows) => rows.into_iter().map(ProjectView::from).collect(),
            Err(e) => {
                warn!(%id, error = %e, "Related projects read failed");
                Vec::new()
            }
        };

        let gallery = GalleryLayout::build(&project.gallery_images());
        PageState::live(ProjectDetailPage { project, gallery, related })
    }

    #[instrument(skip(self))]
    pub async fn blog(&self) -> PageState<BlogPage> {
        match self.repos.posts.list_published(ListQuery::all()).await {
            Ok(rows) if rows.is_empty() => PageState::Empty,
            Ok(rows) => PageState::live(BlogPage::from_cards(cards(&rows))),
            Err(e) => {
                warn!(error = %e, "Blog read failed, serving fallback");
                PageState::fallback(BlogPage::from_cards(fallback::blog_posts()))
            }
        }
    }

    /// Schedules the view increment without waiting on it.
    #[instrument(skip(self))]
    pub async fn blog_post(&self, slug: &str) -> PageState<BlogPostPage> {
        let not_found = || {
            PageState::not_found(
                "The blog post you're looking for doesn't exist.",
                Link::new("Back to Blog", "/blog"),
            )
        };

        let detail = match self.repos.posts.get_published_by_slug(slug).await {
            Ok(Some(detail)) => detail,
            Ok(None) => return not_found(),
            Err(e) => {
                warn!(%slug, error = %e, "Blog post read failed");
                return not_found();
            }
        };

        self.tasks.spawn_view_increment(self.repos.posts.clone(), slug.to_string());

        let post_id = detail.post.id;
        let related = match self
            .repos
            .posts
            .list_published(ListQuery::related_to(post_id, RELATED_LIMIT))
            .await
        {
            Ok(rows) => cards(&rows),
            Err(e) => {
                warn!(%slug, error = %e, "Related posts read failed");
                Vec::new()
            }
        };

        let gallery = GalleryLayout::build(&detail.post.images);
        PageState::live(BlogPostPage { post: BlogPostView::from(detail), gallery, related })
    }

    /// Each section falls back on its own; the page is marked `fallback` if any did.
    #[instrument(skip(self))]
    pub async fn about(&self, skill: Option<&str>) -> PageState<AboutPage> {
        let (profile, timeline, skills, achievements) = futures::join!(
            self.repos.profiles.list(ListQuery::limit(1)),
            self.repos.timeline.list(ListQuery::all()),
            self.repos.skills.list(ListQuery::all()),
            self.repos.achievements.list(ListQuery::all()),
        );

        let mut degraded = false;
        let mut settle = |section: &str, failed: bool| {
            if failed {
                degraded = true;
                warn!(section, "About page read failed, serving fallback");
            }
        };

        settle("profile", profile.is_err());
        settle("timeline", timeline.is_err());
        settle("skills", skills.is_err());
        settle("achievements", achievements.is_err());

        let profile = profile
            .ok()
            .and_then(|rows| rows.into_iter().next())
            .map(ProfileView::from)
            .unwrap_or_else(fallback::profile);
        let active_skill_filter = skill.unwrap_or("All").to_string();

        let page = AboutPage {
            profile,
            timeline: timeline.unwrap_or_default(),
            skill_filters: SKILL_FILTERS.to_vec(),
            skills: filter_skills(skills.unwrap_or_default(), Some(&active_skill_filter)),
            active_skill_filter,
            achievements: achievements.unwrap_or_default(),
        };

        if degraded {
            PageState::fallback(page)
        } else {
            PageState::live(page)
        }
    }

    pub fn resume(&self) -> PageState<&'static Resume> {
        PageState::Ready { data: &RESUME, source: DataSource::Static }
    }

    #[instrument(skip(self))]
    pub async fn contact(&self) -> PageState<ContactPage> {
        let contact_info = CONTACT_INFO.to_vec();
        match self.repos.availability.active().await {
            Ok(Some(status)) => PageState::live(ContactPage {
                availability: AvailabilityView::from(status),
                contact_info,
            }),
            Ok(None) => PageState::fallback(ContactPage {
                availability: AvailabilityView::available(),
                contact_info,
            }),
            Err(e) => {
                warn!(error = %e, "Availability read failed, serving default");
                PageState::fallback(ContactPage {
                    availability: AvailabilityView::available(),
                    contact_info,
                })
            }
        }
    }
}
