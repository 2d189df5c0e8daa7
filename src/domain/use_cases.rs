pub mod auth;
pub mod pages;
pub mod admin;
pub mod contact;
pub mod extractors;
pub mod fallback;
