//! Business logic services for the application layer.

pub mod auth_service;
pub mod playground_service;

pub use auth_service::AuthService;
pub use playground_service::PlaygroundService;
