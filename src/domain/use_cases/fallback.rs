//! Hard-coded content served when a listing read fails.

use crate::entities::{
    about::ProfileView,
    blog_post::PostCard,
    project::ProjectView,
};

const PEXELS: &str = "https://images.pexels.com/photos";

fn photo(id: u32, width: u32) -> String {
    format!("{PEXELS}/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w={width}")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct ProjectSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    long_description: &'static str,
    photo: u32,
    tags: &'static [&'static str],
    technologies: &'static [&'static str],
    date: &'static str,
    status: &'static str,
}

impl ProjectSeed {
    fn view(&self, width: u32) -> ProjectView {
        ProjectView {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            long_description: self.long_description.to_string(),
            image: photo(self.photo, width),
            images: Vec::new(),
            tags: strings(self.tags),
            technologies: strings(self.technologies),
            date: self.date.to_string(),
            status: self.status.to_string(),
            live_url: "#".to_string(),
            github_url: "#".to_string(),
        }
    }
}

const FEATURED_PROJECTS: [ProjectSeed; 3] = [
    ProjectSeed {
        id: "1",
        title: "E-commerce Platform",
        description: "Modern shopping experience with advanced filtering and seamless checkout.",
        long_description: "Modern shopping experience with advanced filtering and seamless checkout.",
        photo: 230544,
        tags: &["UI/UX", "Frontend", "React"],
        technologies: &["React", "TypeScript"],
        date: "2024-01-20",
        status: "Completed",
    },
    ProjectSeed {
        id: "2",
        title: "Mobile Banking App",
        description: "Secure and intuitive banking interface for iOS and Android platforms.",
        long_description: "Secure and intuitive banking interface for iOS and Android platforms.",
        photo: 259249,
        tags: &["Mobile", "Fintech", "Design"],
        technologies: &["React Native"],
        date: "2024-01-15",
        status: "In Progress",
    },
    ProjectSeed {
        id: "3",
        title: "SaaS Dashboard",
        description: "Clean and powerful analytics dashboard for business intelligence.",
        long_description: "Clean and powerful analytics dashboard for business intelligence.",
        photo: 590022,
        tags: &["Dashboard", "Analytics", "SaaS"],
        technologies: &["React", "TypeScript"],
        date: "2024-01-05",
        status: "Completed",
    },
];

const LISTED_PROJECTS: [ProjectSeed; 2] = [
    ProjectSeed {
        id: "1",
        title: "E-commerce Platform",
        description: "Modern shopping experience with advanced filtering, wishlist functionality, \
                      and seamless checkout process. Built with React and integrated with Stripe for payments.",
        long_description: "A comprehensive e-commerce solution that revolutionizes online shopping. \
                           Features include intelligent product recommendations, real-time inventory \
                           management, and mobile-first responsive design.",
        photo: 230544,
        tags: &["Web Design", "UI/UX", "Frontend"],
        technologies: &["React", "TypeScript", "Tailwind CSS", "Stripe API"],
        date: "2024-01-20",
        status: "Completed",
    },
    ProjectSeed {
        id: "2",
        title: "Mobile Banking App",
        description: "Secure and intuitive banking interface for iOS and Android platforms with \
                      biometric authentication and real-time transaction tracking.",
        long_description: "A next-generation mobile banking application prioritizing security and user \
                           experience. Features include budget tracking, expense categorization, and \
                           seamless money transfers.",
        photo: 259249,
        tags: &["Mobile Apps", "UI/UX", "Fintech"],
        technologies: &["React Native", "Firebase", "Biometric Auth"],
        date: "2024-01-15",
        status: "In Progress",
    },
];

/// Three cards for the home page.
pub fn featured_projects() -> Vec<ProjectView> {
    FEATURED_PROJECTS.iter().map(|p| p.view(400)).collect()
}

pub fn projects() -> Vec<ProjectView> {
    LISTED_PROJECTS.iter().map(|p| p.view(600)).collect()
}

const AUTHOR: &str = "Alex Designer";

struct PostSeed {
    slug: &'static str,
    title: &'static str,
    excerpt: &'static str,
    date: &'static str,
    minutes: u8,
    photo: u32,
    tags: &'static [&'static str],
    featured: bool,
}

const POSTS: [PostSeed; 6] = [
    PostSeed {
        slug: "future-of-web-design-trends-2024",
        title: "The Future of Web Design: Trends to Watch in 2024",
        excerpt: "Exploring emerging trends in web design and user experience that will shape the digital landscape.",
        date: "2024-01-15",
        minutes: 5,
        photo: 196644,
        tags: &["Web Design", "Trends", "UX"],
        featured: true,
    },
    PostSeed {
        slug: "building-accessible-interfaces-guide",
        title: "Building Accessible Interfaces: A Developer's Guide",
        excerpt: "Best practices for creating inclusive digital experiences that work for everyone.",
        date: "2024-01-10",
        minutes: 7,
        photo: 574077,
        tags: &["Accessibility", "Development", "UX"],
        featured: false,
    },
    PostSeed {
        slug: "design-systems-at-scale-lessons",
        title: "Design Systems at Scale: Lessons Learned",
        excerpt: "How to build and maintain design systems for large organizations and growing teams.",
        date: "2024-01-05",
        minutes: 6,
        photo: 590022,
        tags: &["Design Systems", "Process", "Team"],
        featured: false,
    },
    PostSeed {
        slug: "psychology-color-digital-design",
        title: "The Psychology of Color in Digital Design",
        excerpt: "Understanding how colors affect user behavior and emotional responses in digital interfaces.",
        date: "2023-12-28",
        minutes: 4,
        photo: 1509534,
        tags: &["Psychology", "Color Theory", "UI Design"],
        featured: false,
    },
    PostSeed {
        slug: "responsive-design-2024-beyond-mobile",
        title: "Responsive Design in 2024: Beyond Mobile-First",
        excerpt: "Modern approaches to responsive design that consider all devices and contexts.",
        date: "2023-12-20",
        minutes: 5,
        photo: 265667,
        tags: &["Responsive Design", "Mobile", "Development"],
        featured: false,
    },
    PostSeed {
        slug: "micro-interactions-details-that-matter",
        title: "Micro-Interactions: The Details That Matter",
        excerpt: "How small animations and interactions can significantly improve user experience.",
        date: "2023-12-15",
        minutes: 3,
        photo: 1181244,
        tags: &["Animation", "UX", "Interaction Design"],
        featured: false,
    },
];

pub fn blog_posts() -> Vec<PostCard> {
    POSTS
        .iter()
        .map(|p| PostCard {
            slug: p.slug.to_string(),
            title: p.title.to_string(),
            excerpt: p.excerpt.to_string(),
            author: AUTHOR.to_string(),
            date: Some(p.date.to_string()),
            read_time: format!("{} min read", p.minutes),
            image: Some(photo(p.photo, 600)),
            tags: strings(p.tags),
            category: None,
            featured: p.featured,
            views: 0,
        })
        .collect()
}

pub fn profile() -> ProfileView {
    ProfileView {
        name: "Profile".to_string(),
        title: String::new(),
        bio: vec![
            "Hello! I'm James, a passionate full-stack developer with over 5 years of experience \
             building modern web applications. I specialize in React, Next.js, and Firebase, \
             focusing on creating intuitive and performant user experiences."
                .to_string(),
        ],
        profile_image: Some("/IMG_2698.jpeg".to_string()),
        resume_url: Some("#".to_string()),
    }
}
