//! Directory service: the only reader and writer of the record store
//!
//! Every operation runs `load -> mutate -> save` while holding the service's
//! mutex and the store's own lock. The mutex serializes callers sharing this
//! service; the store lock serializes services in other processes.
//! A mutation is only reported as successful once its save has completed.

use crate::domain::records::{upsert_attendance, upsert_mark, validate_marks};
use crate::domain::{
    Admin, AppUser, AttendanceStatus, NewStudent, NewTeacher, Role, Student, Teacher,
};
use crate::error::{AcademiaError, Result};
use crate::infrastructure::{
    FileKeyValueStore, FileSystemRepository, KeyValueStore, RecordStore, SchoolRepository,
    StoreDocument,
};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// What a mutation asks the service to do with the document it changed
enum Commit<T> {
    /// Persist the document, then resolve with the value
    Write(T),
    /// Nothing changed; resolve without saving
    Skip(T),
}

pub struct DirectoryService<S: KeyValueStore> {
    store: Mutex<RecordStore<S>>,
    latency: Duration,
}

impl DirectoryService<FileKeyValueStore> {
    /// Open the directory of a workspace using its configured store key and latency
    pub fn open(repository: &FileSystemRepository) -> Result<Self> {
        let config = repository.load_config()?;
        let store = repository.record_store(&config);
        debug!(key = %store.key(), latency_ms = config.latency_ms, "Opening directory");
        Ok(DirectoryService::new(store).with_latency(config.latency()))
    }
}

impl<S: KeyValueStore> DirectoryService<S> {
    /// Take exclusive ownership of the record store
    pub fn new(store: RecordStore<S>) -> Self {
        DirectoryService {
            store: Mutex::new(store),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation by `latency` before it resolves
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(StoreDocument) -> T,
    {
        let value = {
            let store = self.store.lock().await;
            let _guard = store
                .lock()
                .map_err(|e| warn!(error = %e, "Could not lock record store, reading unlocked"))
                .ok();
            f(store.load())
        };
        self.settle().await;
        value
    }

    async fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<Commit<T>>,
    {
        let outcome = {
            let store = self.store.lock().await;
            Self::apply(&store, f)
        };
        self.settle().await;
        outcome
    }

    /// One read-modify-write cycle under the store's cross-process lock
    fn apply<T, F>(store: &RecordStore<S>, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<Commit<T>>,
    {
        let _guard = store.lock()?;
        let mut document = store.load_for_update()?;
        match f(&mut document)? {
            Commit::Write(value) => {
                store.save(&document)?;
                Ok(value)
            }
            Commit::Skip(value) => Ok(value),
        }
    }

    /// Create an admin account. Fails if the email is used by anyone.
    #[instrument(skip(self))]
    pub async fn signup_admin(&self, name: &str, email: &str) -> Result<Admin> {
        self.transact(|document| {
            if document.email_taken(email) {
                warn!("Admin signup rejected: email already in use");
                return Err(AcademiaError::DuplicateEmail(email.to_string()));
            }

            let admin = Admin::new(name, email);
            document.admins.push(admin.clone());
            info!(id = %admin.id, "Admin signed up");
            Ok(Commit::Write(admin))
        })
        .await
    }

    /// Exact email lookup within the collection for `role`
    #[instrument(skip(self))]
    pub async fn login(&self, email: &str, role: Role) -> Option<AppUser> {
        self.read(|document| match role {
            Role::Admin => document
                .admins
                .into_iter()
                .find(|a| a.email == email)
                .map(AppUser::from),
            Role::Teacher => document
                .teachers
                .into_iter()
                .find(|t| t.email == email)
                .map(AppUser::from),
            Role::Student => document
                .students
                .into_iter()
                .find(|s| s.email == email)
                .map(AppUser::from),
        })
        .await
    }

    pub async fn list_students(&self) -> Vec<Student> {
        self.read(|document| document.students).await
    }

    pub async fn list_teachers(&self) -> Vec<Teacher> {
        self.read(|document| document.teachers).await
    }

    pub async fn get_student_by_id(&self, id: &str) -> Option<Student> {
        self.read(|document| document.students.into_iter().find(|s| s.id == id))
            .await
    }

    pub async fn get_teacher_by_id(&self, id: &str) -> Option<Teacher> {
        self.read(|document| document.teachers.into_iter().find(|t| t.id == id))
            .await
    }

    /// Students whose class label equals `class_name` exactly, in collection order
    pub async fn get_students_by_class(&self, class_name: &str) -> Vec<Student> {
        self.read(|document| {
            document
                .students
                .into_iter()
                .filter(|s| s.class_name == class_name)
                .collect()
        })
        .await
    }

    #[instrument(skip(self, new_student), fields(email = %new_student.email, student_id = %new_student.student_id))]
    pub async fn add_student(&self, new_student: NewStudent) -> Result<Student> {
        self.transact(|document| {
            if document.email_taken(&new_student.email) {
                warn!("Student rejected: email already in use");
                return Err(AcademiaError::DuplicateEmail(new_student.email));
            }
            if document
                .students
                .iter()
                .any(|s| s.student_id == new_student.student_id)
            {
                warn!("Student rejected: student ID already in use");
                return Err(AcademiaError::DuplicateStudentId(new_student.student_id));
            }

            let student = new_student.into_student();
            document.students.push(student.clone());
            info!(id = %student.id, "Student added");
            Ok(Commit::Write(student))
        })
        .await
    }

    /// Remove a student. `false` if no student has this id.
    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: &str) -> Result<bool> {
        self.transact(|document| {
            let before = document.students.len();
            document.students.retain(|s| s.id != id);
            if document.students.len() < before {
                info!("Student deleted");
                Ok(Commit::Write(true))
            } else {
                Ok(Commit::Skip(false))
            }
        })
        .await
    }

    #[instrument(skip(self, new_teacher), fields(email = %new_teacher.email, teacher_id = %new_teacher.teacher_id))]
    pub async fn add_teacher(&self, new_teacher: NewTeacher) -> Result<Teacher> {
        self.transact(|document| {
            if document.email_taken(&new_teacher.email) {
                warn!("Teacher rejected: email already in use");
                return Err(AcademiaError::DuplicateEmail(new_teacher.email));
            }
            if document
                .teachers
                .iter()
                .any(|t| t.teacher_id == new_teacher.teacher_id)
            {
                warn!("Teacher rejected: teacher ID already in use");
                return Err(AcademiaError::DuplicateTeacherId(new_teacher.teacher_id));
            }

            let teacher = new_teacher.into_teacher();
            document.teachers.push(teacher.clone());
            info!(id = %teacher.id, "Teacher added");
            Ok(Commit::Write(teacher))
        })
        .await
    }

    /// Remove a teacher. `false` if no teacher has this id.
    #[instrument(skip(self))]
    pub async fn delete_teacher(&self, id: &str) -> Result<bool> {
        self.transact(|document| {
            let before = document.teachers.len();
            document.teachers.retain(|t| t.id != id);
            if document.teachers.len() < before {
                info!("Teacher deleted");
                Ok(Commit::Write(true))
            } else {
                Ok(Commit::Skip(false))
            }
        })
        .await
    }

    /// Set the attendance status for `month`. Returns whether the student exists.
    #[instrument(skip(self))]
    pub async fn update_student_attendance(
        &self,
        id: &str,
        month: &str,
        status: AttendanceStatus,
    ) -> Result<bool> {
        self.transact(|document| {
            match document.students.iter_mut().find(|s| s.id == id) {
                Some(student) => {
                    upsert_attendance(&mut student.attendance, month, status);
                    info!("Attendance recorded");
                    Ok(Commit::Write(true))
                }
                None => Ok(Commit::Skip(false)),
            }
        })
        .await
    }

    /// Set the mark for `(month, subject)`. Values outside 0..=100 are rejected
    /// before the store is touched. Returns whether the student exists.
    #[instrument(skip(self))]
    pub async fn update_student_marks(
        &self,
        id: &str,
        month: &str,
        subject: &str,
        marks: f64,
    ) -> Result<bool> {
        let marks = validate_marks(marks)?;

        self.transact(|document| {
            match document.students.iter_mut().find(|s| s.id == id) {
                Some(student) => {
                    upsert_mark(&mut student.marks, month, subject, marks);
                    info!("Marks recorded");
                    Ok(Commit::Write(true))
                }
                None => Ok(Commit::Skip(false)),
            }
        })
        .await
    }
}
