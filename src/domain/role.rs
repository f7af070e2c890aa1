//! User role definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles determine which collection a user lives in and which dashboard they see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// School administrator (no extra fields)
    Admin,
    /// Teacher with a department and a set of classes
    Teacher,
    /// Student with attendance and marks
    Student,
}

impl Role {
    /// Prefix used when generating ids for this role
    pub fn id_prefix(&self) -> char {
        match self {
            Role::Admin => 'a',
            Role::Teacher => 't',
            Role::Student => 's',
        }
    }

    /// Wire name as persisted in the store document
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrator" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(format!(
                "Invalid role: '{}'. Valid roles are: admin, teacher, student",
                s
            )),
        }
    }
}
