use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::forms::{blank_as_none, lenient_bool};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AvailabilityStatus {
    pub id: Uuid,
    pub status: String,
    pub message: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AvailabilityInput {
    #[validate(length(min = 1, max = 50, message = "Status is required"))]
    pub status: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
}

/// What the contact page shows about current availability.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvailabilityView {
    pub status: String,
    pub message: String,
}

impl AvailabilityView {
    pub fn available() -> Self {
        AvailabilityView {
            status: "Available".to_string(),
            message: "I'm currently accepting new freelance projects and collaborations. \
                      Let's discuss your needs and see how I can help bring your vision to life."
                .to_string(),
        }
    }
}

impl From<AvailabilityStatus> for AvailabilityView {
    fn from(status: AvailabilityStatus) -> Self {
        AvailabilityView {
            status: status.status,
            message: status.message.unwrap_or_default(),
        }
    }
}
