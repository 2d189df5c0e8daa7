pub mod resource;
pub mod project;
pub mod blog_post;
pub mod about;
pub mod availability;
pub mod user;
pub mod token;
pub mod contact;
pub mod page;
pub mod theme;
pub mod site;
pub mod resume;
