//! academia - School administration records
//!
//! Keeps admins, teachers and students in a single persisted record store and
//! exposes lookups, enrollment, and attendance/marks updates through an async
//! directory service, with role-specific dashboards on top.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::AcademiaError;
