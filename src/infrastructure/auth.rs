pub mod jwt;
pub mod password;
pub mod deny_list;
