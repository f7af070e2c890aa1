//! Role-specific dashboard use case

use crate::application::DirectoryService;
use crate::domain::summary::{average_marks, class_breakdown};
use crate::domain::{Admin, AppUser, AttendanceSummary, ClassBreakdown, Student, Teacher};
use crate::infrastructure::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentOverview {
    pub student: Student,
    pub attendance: AttendanceSummary,
    pub average_marks: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherOverview {
    pub teacher: Teacher,
    /// Students across every class the teacher teaches
    pub student_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub admin: Admin,
    pub student_count: usize,
    pub teacher_count: usize,
    pub classes: Vec<ClassBreakdown>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Admin(AdminOverview),
    Teacher(TeacherOverview),
    Student(StudentOverview),
}

/// Build the dashboard for `user` from the current store contents.
///
/// Teachers and students are re-read so the view reflects changes made after
/// login. Returns `None` if that entity no longer exists.
pub async fn dashboard_for<S: KeyValueStore>(
    directory: &DirectoryService<S>,
    user: &AppUser,
) -> Option<Dashboard> {
    match user {
        AppUser::Admin(admin) => {
            let students = directory.list_students().await;
            let teachers = directory.list_teachers().await;
            Some(Dashboard::Admin(AdminOverview {
                admin: admin.clone(),
                student_count: students.len(),
                teacher_count: teachers.len(),
                classes: class_breakdown(&students),
            }))
        }
        AppUser::Teacher(teacher) => {
            let teacher = directory.get_teacher_by_id(&teacher.id).await?;
            let mut student_count = 0;
            for class_name in &teacher.classes {
                student_count += directory.get_students_by_class(class_name).await.len();
            }
            Some(Dashboard::Teacher(TeacherOverview {
                teacher,
                student_count,
            }))
        }
        AppUser::Student(student) => {
            let student = directory.get_student_by_id(&student.id).await?;
            Some(Dashboard::Student(StudentOverview {
                attendance: AttendanceSummary::from_records(&student.attendance),
                average_marks: average_marks(&student.marks),
                student,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttendanceStatus, NewStudent, NewTeacher};
    use crate::infrastructure::{MemoryKeyValueStore, RecordStore};

    fn service() -> DirectoryService<MemoryKeyValueStore> {
        DirectoryService::new(RecordStore::new(MemoryKeyValueStore::new(), "test-db"))
    }

    async fn enroll(
        directory: &DirectoryService<MemoryKeyValueStore>,
        n: u32,
        class_name: &str,
    ) -> Student {
        directory
            .add_student(NewStudent {
                name: format!("Student {}", n),
                email: format!("s{}@x.com", n),
                student_id: format!("S{}", n),
                class_name: class_name.to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_student_dashboard_reflects_later_updates() {
        let directory = service();
        let student = enroll(&directory, 1, "10A").await;
        let session_user = AppUser::from(student.clone());

        directory
            .update_student_attendance(&student.id, "Jan", AttendanceStatus::Present)
            .await
            .unwrap();
        directory
            .update_student_attendance(&student.id, "Feb", AttendanceStatus::Absent)
            .await
            .unwrap();
        directory
            .update_student_marks(&student.id, "Jan", "Math", 80.0)
            .await
            .unwrap();
        directory
            .update_student_marks(&student.id, "Jan", "Science", 91.0)
            .await
            .unwrap();

        match dashboard_for(&directory, &session_user).await {
            Some(Dashboard::Student(overview)) => {
                assert_eq!(overview.attendance.present, 1);
                assert_eq!(overview.attendance.total, 2);
                assert_eq!(overview.attendance.percentage, 50.0);
                assert_eq!(overview.average_marks, 85.5);
                assert_eq!(overview.student.class_name, "10A");
            }
            other => panic!("Expected student dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_teacher_dashboard_counts_students_in_classes() {
        let directory = service();
        enroll(&directory, 1, "10A").await;
        enroll(&directory, 2, "10A").await;
        enroll(&directory, 3, "10B").await;
        enroll(&directory, 4, "11A").await;

        let teacher = directory
            .add_teacher(NewTeacher {
                name: "Bob".to_string(),
                email: "bob@x.com".to_string(),
                teacher_id: "T1".to_string(),
                department: "Science".to_string(),
                classes: vec!["10A".to_string(), "10B".to_string()],
            })
            .await
            .unwrap();

        match dashboard_for(&directory, &AppUser::from(teacher)).await {
            Some(Dashboard::Teacher(overview)) => assert_eq!(overview.student_count, 3),
            other => panic!("Expected teacher dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_admin_dashboard_totals() {
        let directory = service();
        let admin = directory.signup_admin("Root", "root@x.com").await.unwrap();
        enroll(&directory, 1, "10B").await;
        enroll(&directory, 2, "10A").await;

        match dashboard_for(&directory, &AppUser::from(admin)).await {
            Some(Dashboard::Admin(overview)) => {
                assert_eq!(overview.student_count, 2);
                assert_eq!(overview.teacher_count, 0);
                assert_eq!(overview.classes.len(), 2);
                assert_eq!(overview.classes[0].class_name, "10A");
                assert_eq!(overview.classes[0].attendance_rate, 0.0);
            }
            other => panic!("Expected admin dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deleted_student_has_no_dashboard() {
        let directory = service();
        let student = enroll(&directory, 1, "10A").await;
        directory.delete_student(&student.id).await.unwrap();

        assert!(dashboard_for(&directory, &AppUser::from(student))
            .await
            .is_none());
    }
}
