//! Per-student attendance and mark records

use crate::error::{AcademiaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted mark value
pub const MIN_MARKS: f64 = 0.0;
/// Highest accepted mark value
pub const MAX_MARKS: f64 = 100.0;

/// Attendance status for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        };
        f.write_str(label)
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(format!(
                "Invalid attendance status: '{}'. Valid statuses are: present, absent, late",
                s
            )),
        }
    }
}

/// Attendance fact keyed by month within a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub month: String,
    pub status: AttendanceStatus,
}

/// Mark fact keyed by (month, subject) within a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkRecord {
    pub month: String,
    pub subject: String,
    pub marks: f64,
}

/// Reject mark values outside `[MIN_MARKS, MAX_MARKS]` (NaN included).
pub fn validate_marks(marks: f64) -> Result<f64> {
    if marks.is_finite() && (MIN_MARKS..=MAX_MARKS).contains(&marks) {
        Ok(marks)
    } else {
        Err(AcademiaError::MarksOutOfRange(marks))
    }
}

/// Overwrite the status for `month`, or append a new record if none exists.
pub fn upsert_attendance(records: &mut Vec<AttendanceRecord>, month: &str, status: AttendanceStatus) {
    match records.iter_mut().find(|r| r.month == month) {
        Some(record) => record.status = status,
        None => records.push(AttendanceRecord {
            month: month.to_string(),
            status,
        }),
    }
}

/// Overwrite the value for `(month, subject)`, or append a new record if none exists.
pub fn upsert_mark(records: &mut Vec<MarkRecord>, month: &str, subject: &str, marks: f64) {
    match records
        .iter_mut()
        .find(|r| r.month == month && r.subject == subject)
    {
        Some(record) => record.marks = marks,
        None => records.push(MarkRecord {
            month: month.to_string(),
            subject: subject.to_string(),
            marks,
        }),
    }
}
