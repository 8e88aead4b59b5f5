pub mod check_config;
pub mod contact;
pub mod links;
pub mod submit;
