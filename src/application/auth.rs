//! Login session use case

use crate::application::dashboard::{dashboard_for, Dashboard};
use crate::application::DirectoryService;
use crate::domain::{AppUser, AttendanceStatus, Role, Teacher};
use crate::error::{AcademiaError, Result};
use crate::infrastructure::{KeyValueStore, SessionStore};
use tracing::{info, warn};

/// Service for logging in and out and acting as the current user
pub struct AuthService<'a, S: KeyValueStore> {
    directory: &'a DirectoryService<S>,
    sessions: SessionStore,
}

impl<'a, S: KeyValueStore> AuthService<'a, S> {
    pub fn new(directory: &'a DirectoryService<S>, sessions: SessionStore) -> Self {
        AuthService {
            directory,
            sessions,
        }
    }

    /// Look the user up and remember them. An unknown email/role pair is
    /// reported as invalid credentials.
    pub async fn login(&self, email: &str, role: Role) -> Result<AppUser> {
        let user = self.directory.login(email, role).await.ok_or_else(|| {
            AcademiaError::InvalidCredentials {
                email: email.to_string(),
                role,
            }
        })?;

        self.sessions.save(&user)?;
        info!(id = %user.id(), role = %role, "Logged in");
        Ok(user)
    }

    /// Returns whether someone was logged in
    pub fn logout(&self) -> Result<bool> {
        self.sessions.clear()
    }

    pub fn current_user(&self) -> Result<AppUser> {
        self.sessions.load()?.ok_or(AcademiaError::NotLoggedIn)
    }

    /// The logged-in teacher. Any other role fails with `RoleMismatch`.
    pub fn current_teacher(&self) -> Result<Teacher> {
        let user = self.current_user()?;
        let teacher = user.require_teacher()?.clone();
        Ok(teacher)
    }

    /// Record attendance as the logged-in teacher.
    /// Returns whether the student exists.
    pub async fn record_attendance(
        &self,
        student_id: &str,
        month: &str,
        status: AttendanceStatus,
    ) -> Result<bool> {
        let teacher = self.current_teacher()?;
        info!(teacher = %teacher.id, student = %student_id, "Recording attendance");
        self.directory
            .update_student_attendance(student_id, month, status)
            .await
    }

    /// Record marks as the logged-in teacher.
    /// Returns whether the student exists.
    pub async fn record_marks(
        &self,
        student_id: &str,
        month: &str,
        subject: &str,
        marks: f64,
    ) -> Result<bool> {
        let teacher = self.current_teacher()?;
        info!(teacher = %teacher.id, student = %student_id, "Recording marks");
        self.directory
            .update_student_marks(student_id, month, subject, marks)
            .await
    }

    /// Dashboard of the current user. A session whose account has been
    /// deleted is cleared and reported as logged out.
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let user = self.current_user()?;
        match dashboard_for(self.directory, &user).await {
            Some(dashboard) => Ok(dashboard),
            None => {
                warn!(id = %user.id(), "Session refers to a deleted account, clearing it");
                self.sessions.clear()?;
                Err(AcademiaError::NotLoggedIn)
            }
        }
    }
}
