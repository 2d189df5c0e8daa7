pub mod entities;
pub mod use_cases;
pub mod password;
pub mod forms;
pub mod gallery;
pub mod admin_form;
