//! Dashboard figures derived from student records

use crate::domain::records::{AttendanceRecord, AttendanceStatus, MarkRecord};
use crate::domain::Student;
use std::collections::BTreeMap;

/// Round to one decimal place, the precision every dashboard shows
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Present-month count against all recorded months
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub total: usize,
    pub percentage: f64,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let total = records.len();
        let percentage = if total > 0 {
            round1(present as f64 / total as f64 * 100.0)
        } else {
            0.0
        };

        AttendanceSummary {
            present,
            total,
            percentage,
        }
    }
}

/// Mean of all mark values, one decimal; 0.0 when there are none
pub fn average_marks(records: &[MarkRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records.iter().map(|r| r.marks).sum();
    round1(total / records.len() as f64)
}

/// One month's marks, subject by subject
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMarks {
    pub month: String,
    pub subjects: Vec<(String, f64)>,
}

/// Pivot mark records into one row per month, months in order of first
/// appearance and subjects in record order
pub fn marks_by_month(records: &[MarkRecord]) -> Vec<MonthlyMarks> {
    let mut rows: Vec<MonthlyMarks> = Vec::new();
    for record in records {
        let position = match rows.iter().position(|row| row.month == record.month) {
            Some(position) => position,
            None => {
                rows.push(MonthlyMarks {
                    month: record.month.clone(),
                    subjects: Vec::new(),
                });
                rows.len() - 1
            }
        };
        rows[position]
            .subjects
            .push((record.subject.clone(), record.marks));
    }
    rows
}

/// Per-class figures for the admin overview
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBreakdown {
    pub class_name: String,
    pub students: usize,
    pub attendance_rate: f64,
}

/// Group students by class label, ordered by label. The attendance rate pools
/// every record in the class.
pub fn class_breakdown(students: &[Student]) -> Vec<ClassBreakdown> {
    let mut by_class: BTreeMap<&str, (usize, Vec<AttendanceRecord>)> = BTreeMap::new();
    for student in students {
        let entry = by_class.entry(student.class_name.as_str()).or_default();
        entry.0 += 1;
        entry.1.extend(student.attendance.iter().cloned());
    }

    by_class
        .into_iter()
        .map(|(class_name, (count, records))| ClassBreakdown {
            class_name: class_name.to_string(),
            students: count,
            attendance_rate: AttendanceSummary::from_records(&records).percentage,
        })
        .collect()
}
