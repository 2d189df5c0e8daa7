use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const THEME_COOKIE: &str = "theme";
pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Stored cookie wins over the client hint; dark when neither parses.
    pub fn resolve(cookie: Option<&str>, hint: Option<&str>) -> (Self, ThemeOrigin) {
        if let Some(theme) = cookie.and_then(|v| v.parse().ok()) {
            return (theme, ThemeOrigin::Cookie);
        }
        if let Some(theme) = hint.and_then(|v| v.parse().ok()) {
            return (theme, ThemeOrigin::ClientHint);
        }
        (Theme::default(), ThemeOrigin::Default)
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"').to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeOrigin {
    Cookie,
    ClientHint,
    Default,
}

#[derive(Debug, Serialize)]
pub struct ThemePreference {
    pub theme: Theme,
    pub origin: ThemeOrigin,
}

#[derive(Debug, Deserialize)]
pub struct ThemeUpdate {
    pub theme: Theme,
}
