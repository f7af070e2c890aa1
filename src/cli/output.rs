//! Output formatting utilities

use crate::application::Dashboard;
use crate::domain::summary::marks_by_month;
use crate::domain::{AppUser, Student, Teacher};

/// Format a list of students for display
pub fn format_student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students found".to_string();
    }

    let mut output = String::new();
    for student in students {
        output.push_str(&format!(
            "{:<34} {:<10} {:<8} {} <{}>\n",
            student.id, student.student_id, student.class_name, student.name, student.email
        ));
    }
    output
}

/// Format a list of teachers for display
pub fn format_teacher_list(teachers: &[Teacher]) -> String {
    if teachers.is_empty() {
        return "No teachers found".to_string();
    }

    let mut output = String::new();
    for teacher in teachers {
        output.push_str(&format!(
            "{:<34} {:<10} {:<12} {} <{}> [{}]\n",
            teacher.id,
            teacher.teacher_id,
            teacher.department,
            teacher.name,
            teacher.email,
            teacher.classes.join(", ")
        ));
    }
    output
}

/// Format one student with full attendance and marks history
pub fn format_student_detail(student: &Student) -> String {
    let mut output = format!(
        "{} <{}>\nID: {}\nStudent ID: {}\nClass: {}\n",
        student.name, student.email, student.id, student.student_id, student.class_name
    );

    output.push_str("\nAttendance:\n");
    if student.attendance.is_empty() {
        output.push_str("  (none)\n");
    }
    for record in &student.attendance {
        output.push_str(&format!("  {:<6} {}\n", record.month, record.status));
    }

    output.push_str("\nMarks:\n");
    if student.marks.is_empty() {
        output.push_str("  (none)\n");
    }
    for record in &student.marks {
        output.push_str(&format!(
            "  {:<6} {:<12} {}\n",
            record.month, record.subject, record.marks
        ));
    }
    output
}

/// One-line description of a user
pub fn format_user(user: &AppUser) -> String {
    format!(
        "{} <{}> ({}, id {})",
        user.name(),
        user.email(),
        user.role(),
        user.id()
    )
}

/// Format a role-specific dashboard
pub fn format_dashboard(dashboard: &Dashboard) -> String {
    match dashboard {
        Dashboard::Admin(overview) => {
            let mut output = format!(
                "Admin dashboard - {}\n\nStudents: {}\nTeachers: {}\n",
                overview.admin.name, overview.student_count, overview.teacher_count
            );
            if !overview.classes.is_empty() {
                output.push_str("\nClass      Students  Attendance\n");
                for class in &overview.classes {
                    output.push_str(&format!(
                        "{:<10} {:>8}  {:>9.1}%\n",
                        class.class_name, class.students, class.attendance_rate
                    ));
                }
            }
            output
        }
        Dashboard::Teacher(overview) => format!(
            "Teacher dashboard - {}\n\nDepartment: {}\nClasses: {}\nTotal students: {}\n",
            overview.teacher.name,
            overview.teacher.department,
            overview.teacher.classes.join(", "),
            overview.student_count
        ),
        Dashboard::Student(overview) => {
            let mut output = format!(
                "Student dashboard - {}\n\nOverall attendance: {:.1}% ({} of {} months present)\nAverage marks: {:.1}\nClass: {}\n",
                overview.student.name,
                overview.attendance.percentage,
                overview.attendance.present,
                overview.attendance.total,
                overview.average_marks,
                overview.student.class_name
            );
            if !overview.student.attendance.is_empty() {
                output.push_str("\nAttendance history:\n");
                for record in &overview.student.attendance {
                    output.push_str(&format!("  {:<6} {}\n", record.month, record.status));
                }
            }
            let months = marks_by_month(&overview.student.marks);
            if !months.is_empty() {
                output.push_str("\nMarks by month:\n");
                for row in &months {
                    let subjects: Vec<String> = row
                        .subjects
                        .iter()
                        .map(|(subject, marks)| format!("{} {}", subject, marks))
                        .collect();
                    output.push_str(&format!("  {:<6} {}\n", row.month, subjects.join(", ")));
                }
            }
            output
        }
    }
}
