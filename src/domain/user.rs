//! User entities and the role-tagged `AppUser` variant

use crate::domain::records::{AttendanceRecord, MarkRecord};
use crate::domain::Role;
use crate::error::{AcademiaError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Generate a fresh entity id, prefixed by the role's letter (e.g. `s3f2...`).
pub fn generate_id(role: Role) -> String {
    format!("{}{}", role.id_prefix(), Uuid::new_v4().simple())
}

/// Administrator account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Admin {
    pub fn new(name: &str, email: &str) -> Self {
        Admin {
            id: generate_id(Role::Admin),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Admin,
        }
    }
}

/// Student with attendance and marks history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub student_id: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub attendance: Vec<AttendanceRecord>,
    pub marks: Vec<MarkRecord>,
}

/// Teacher with department and the classes they teach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub teacher_id: String,
    pub department: String,
    pub classes: Vec<String>,
}

/// Fields supplied when enrolling a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub class_name: String,
}

impl NewStudent {
    /// Build the persisted student with a fresh id and empty history
    pub fn into_student(self) -> Student {
        Student {
            id: generate_id(Role::Student),
            name: self.name,
            email: self.email,
            role: Role::Student,
            student_id: self.student_id,
            class_name: self.class_name,
            attendance: Vec::new(),
            marks: Vec::new(),
        }
    }
}

/// Fields supplied when hiring a teacher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub teacher_id: String,
    pub department: String,
    pub classes: Vec<String>,
}

impl NewTeacher {
    /// Build the persisted teacher with a fresh id. Duplicate class labels
    /// collapse to their first occurrence.
    pub fn into_teacher(self) -> Teacher {
        let mut classes: Vec<String> = Vec::with_capacity(self.classes.len());
        for class in self.classes {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }

        Teacher {
            id: generate_id(Role::Teacher),
            name: self.name,
            email: self.email,
            role: Role::Teacher,
            teacher_id: self.teacher_id,
            department: self.department,
            classes,
        }
    }
}

/// Any signed-in user, discriminated by the `role` field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AppUser {
    Admin(Admin),
    Teacher(Teacher),
    Student(Student),
}

impl AppUser {
    pub fn role(&self) -> Role {
        match self {
            AppUser::Admin(_) => Role::Admin,
            AppUser::Teacher(_) => Role::Teacher,
            AppUser::Student(_) => Role::Student,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AppUser::Admin(a) => &a.id,
            AppUser::Teacher(t) => &t.id,
            AppUser::Student(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AppUser::Admin(a) => &a.name,
            AppUser::Teacher(t) => &t.name,
            AppUser::Student(s) => &s.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            AppUser::Admin(a) => &a.email,
            AppUser::Teacher(t) => &t.email,
            AppUser::Student(s) => &s.email,
        }
    }

    /// Narrow to a teacher, failing with `RoleMismatch` for any other role
    pub fn require_teacher(&self) -> Result<&Teacher> {
        match self {
            AppUser::Teacher(t) => Ok(t),
            other => Err(AcademiaError::RoleMismatch {
                expected: Role::Teacher,
                actual: other.role(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for AppUser {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let role = value
            .get("role")
            .cloned()
            .ok_or_else(|| D::Error::missing_field("role"))?;
        let role: Role = serde_json::from_value(role).map_err(D::Error::custom)?;

        match role {
            Role::Admin => serde_json::from_value(value).map(AppUser::Admin),
            Role::Teacher => serde_json::from_value(value).map(AppUser::Teacher),
            Role::Student => serde_json::from_value(value).map(AppUser::Student),
        }
        .map_err(D::Error::custom)
    }
}

impl From<Admin> for AppUser {
    fn from(admin: Admin) -> Self {
        AppUser::Admin(admin)
    }
}

impl From<Teacher> for AppUser {
    fn from(teacher: Teacher) -> Self {
        AppUser::Teacher(teacher)
    }
}

impl From<Student> for AppUser {
    fn from(student: Student) -> Self {
        AppUser::Student(student)
    }
}
