use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{entities::availability::AvailabilityView, forms::blank_as_none};

pub const CONTACT_ACKNOWLEDGEMENT: &str = "Thank you for your message! I'll get back to you soon.";

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 150, message = "Subject is too long"))]
    pub subject: Option<String>,

    #[validate(length(min = 5, max = 5000, message = "Message must be between 5 and 5000 characters"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactAcknowledgement {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactInfo {
    pub label: &'static str,
    pub value: &'static str,
    pub href: &'static str,
}

pub const CONTACT_INFO: [ContactInfo; 2] = [
    ContactInfo {
        label: "Email",
        value: "thegeigerux@gmail.com",
        href: "mailto:thegeigerux@gmail.com",
    },
    ContactInfo {
        label: "Location",
        value: "Charlotte, NC",
        href: "#",
    },
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactPage {
    pub availability: AvailabilityView,
    pub contact_info: Vec<ContactInfo>,
}
