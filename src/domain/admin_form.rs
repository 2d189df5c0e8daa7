use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    Overview,
    Projects,
    Posts,
    Categories,
    Tags,
    Profile,
    Timeline,
    Skills,
    Achievements,
    Availability,
}

impl AdminTab {
    pub const ALL: [AdminTab; 10] = [
        AdminTab::Overview,
        AdminTab::Projects,
        AdminTab::Posts,
        AdminTab::Categories,
        AdminTab::Tags,
        AdminTab::Profile,
        AdminTab::Timeline,
        AdminTab::Skills,
        AdminTab::Achievements,
        AdminTab::Availability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::Overview => "overview",
            AdminTab::Projects => "projects",
            AdminTab::Posts => "posts",
            AdminTab::Categories => "categories",
            AdminTab::Tags => "tags",
            AdminTab::Profile => "profile",
            AdminTab::Timeline => "timeline",
            AdminTab::Skills => "skills",
            AdminTab::Achievements => "achievements",
            AdminTab::Availability => "availability",
        }
    }

    /// Every tab but the overview edits one content type.
    pub fn has_form(&self) -> bool {
        *self != AdminTab::Overview
    }
}

impl FromStr for AdminTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown admin tab: {s}")))
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditTarget {
    Create,
    Edit { id: Uuid },
}

/// Form lifecycle on a tab.
///
/// `Listing -> open -> FormOpen -> submit -> Listing` when the write succeeds;
/// a failed submit keeps the form open on the same target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    Listing,
    FormOpen { target: EditTarget },
}

impl FormState {
    pub fn open(target: EditTarget) -> Self {
        FormState::FormOpen { target }
    }

    pub fn submitted<T, E>(self, result: &Result<T, E>) -> Self {
        match (self, result) {
            (FormState::FormOpen { .. }, Ok(_)) => FormState::Listing,
            (state, _) => state,
        }
    }

    /// Moving to another tab closes the form; reselecting the current tab keeps it.
    pub fn switch_tab(self, from: AdminTab, to: AdminTab) -> Self {
        if from == to {
            self
        } else {
            FormState::Listing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Create,
    Update,
    Delete,
}

impl AdminAction {
    pub fn success_message(&self) -> &'static str {
        match self {
            AdminAction::Create => "Created successfully!",
            AdminAction::Update => "Updated successfully!",
            AdminAction::Delete => "Deleted successfully!",
        }
    }
}

/// Body of every admin mutation response.
#[derive(Debug, Serialize)]
pub struct AdminOutcome<T> {
    pub tab: AdminTab,
    pub form: FormState,
    pub alert: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AdminOutcome<T> {
    pub fn settle(
        tab: AdminTab,
        form: FormState,
        action: AdminAction,
        result: Result<T, &AppError>,
    ) -> Self {
        let form = form.submitted(&result);
        match result {
            Ok(item) => AdminOutcome {
                tab,
                form,
                alert: action.success_message().to_string(),
                item: Some(item),
                error: None,
            },
            Err(err) => {
                let message = backend_message(err);
                AdminOutcome {
                    tab,
                    form,
                    alert: format!("Error: {message}"),
                    item: None,
                    error: Some(message),
                }
            }
        }
    }
}

/// The message a failed write reports, without the variant prefix.
pub fn backend_message(err: &AppError) -> String {
    match err {
        AppError::InvalidInput(msg)
        | AppError::NotFound(msg)
        | AppError::Conflict(msg)
        | AppError::ConfirmationRequired(msg)
        | AppError::InternalError(msg) => msg.clone(),
        other => other.to_string(),
    }
}
