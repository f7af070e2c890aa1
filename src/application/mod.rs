//! Application layer - Use cases and orchestration

pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod init;
pub mod manage_config;

pub use auth::AuthService;
pub use dashboard::{dashboard_for, AdminOverview, Dashboard, StudentOverview, TeacherOverview};
pub use directory::DirectoryService;
pub use manage_config::ConfigService;
