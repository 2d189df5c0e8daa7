use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::entities::page::Link;

#[derive(Debug, Serialize)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
    pub aria_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Footer {
    pub name: &'static str,
    pub tagline: &'static str,
    pub social: Vec<SocialLink>,
    pub copyright: String,
    pub admin_link: Link,
}

#[derive(Debug, Serialize)]
pub struct SiteChrome {
    pub brand: &'static str,
    pub navigation: Vec<Link>,
    pub footer: Footer,
}

const NAVIGATION: [(&str, &str); 6] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Projects", "/projects"),
    ("Blog", "/blog"),
    ("Resume", "/resume"),
    ("Contact", "/contact"),
];

impl SiteChrome {
    pub fn current() -> Self {
        SiteChrome {
            brand: "James Geiger",
            navigation: NAVIGATION.iter().map(|(label, href)| Link::new(*label, *href)).collect(),
            footer: Footer {
                name: "James Geiger, M. Ed.",
                tagline: "Product Designer • Accessibility Advocate • AI Innovation",
                social: vec![
                    SocialLink {
                        label: "Instagram",
                        href: "https://instagram.com/thegeigerux",
                        aria_label: "Follow on Instagram",
                    },
                    SocialLink {
                        label: "LinkedIn",
                        href: "https://linkedin.com/in/thegeigerux",
                        aria_label: "Connect on LinkedIn",
                    },
                ],
                copyright: format!("© {} James Geiger. All rights reserved.", Utc::now().year()),
                admin_link: Link::new("Admin", "/login"),
            },
        }
    }
}
