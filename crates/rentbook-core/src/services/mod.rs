//! Domain services (business logic)

pub mod auth_service;
pub mod access_control;

pub use auth_service::AuthService;
pub use access_control::AccessControl;
