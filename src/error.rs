//! Error types for academia

use crate::domain::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for academia
#[derive(Debug, Error)]
pub enum AcademiaError {
    #[error("An account with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("A student with ID '{0}' already exists")]
    DuplicateStudentId(String),

    #[error("A teacher with ID '{0}' already exists")]
    DuplicateTeacherId(String),

    #[error("Marks must be between 0 and 100, got {0}")]
    MarksOutOfRange(f64),

    #[error("Not an academia directory: {0}")]
    NotAcademiaDirectory(PathBuf),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid credentials or role: no {role} with email '{email}'")]
    InvalidCredentials { email: String, role: Role },

    #[error("This action requires a {expected} account, but the current user is {actual}")]
    RoleMismatch { expected: Role, actual: Role },

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Teacher not found: {0}")]
    TeacherNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl AcademiaError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AcademiaError::NotAcademiaDirectory(_) => 2,
            AcademiaError::DuplicateEmail(_)
            | AcademiaError::DuplicateStudentId(_)
            | AcademiaError::DuplicateTeacherId(_) => 3,
            AcademiaError::StudentNotFound(_)
            | AcademiaError::TeacherNotFound(_)
            | AcademiaError::InvalidCredentials { .. }
            | AcademiaError::NotLoggedIn => 4,
            AcademiaError::MarksOutOfRange(_) | AcademiaError::RoleMismatch { .. } => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            AcademiaError::NotAcademiaDirectory(path) => {
                format!(
                    "Not an academia directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'academia init' in this directory to create a new workspace\n\
                    • Navigate to an existing academia directory\n\
                    • Set ACADEMIA_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            AcademiaError::DuplicateEmail(email) => {
                format!(
                    "An account with email '{}' already exists.\n\n\
                    Suggestions:\n\
                    • Emails are unique across admins, teachers and students\n\
                    • Use 'academia student list' or 'academia teacher list' to find the existing account",
                    email
                )
            }
            AcademiaError::DuplicateStudentId(id) | AcademiaError::DuplicateTeacherId(id) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Choose a different ID than '{}'\n\
                    • IDs are compared exactly (case-sensitive)",
                    self, id
                )
            }
            AcademiaError::InvalidCredentials { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the email spelling (matching is exact)\n\
                    • Make sure the role matches the account: admin, teacher, student\n\
                    • Create an admin account with 'academia signup'",
                    self
                )
            }
            AcademiaError::NotLoggedIn => "Not logged in\n\n\
                Suggestions:\n\
                • Log in first: academia login --email <EMAIL> --role <ROLE>"
                .to_string(),
            AcademiaError::RoleMismatch { expected, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Log in with a {} account: academia login --email <EMAIL> --role {}",
                    self,
                    expected,
                    expected.as_str().to_lowercase()
                )
            }
            AcademiaError::MarksOutOfRange(_) => {
                format!("{}\n\nExample: academia marks <ID> Jan Math 85", self)
            }
            AcademiaError::Config(msg) => {
                if msg.contains("Invalid role") {
                    format!("{}\n\nExample: academia login --email a@b.com --role teacher", msg)
                } else if msg.contains("Invalid attendance status") {
                    format!("{}\n\nExample: academia attendance <ID> Mar absent", msg)
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using AcademiaError
pub type Result<T> = std::result::Result<T, AcademiaError>;
