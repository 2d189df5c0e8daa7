pub mod home;
pub mod pages;
pub mod admin;
pub mod auth;
pub mod contact;
pub mod preferences;
pub mod site;
pub mod system;
pub mod json_error;
