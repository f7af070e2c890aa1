//! Domain layer - School records and the rules that govern them

pub mod records;
pub mod role;
pub mod summary;
pub mod user;

pub use records::{AttendanceRecord, AttendanceStatus, MarkRecord};
pub use role::Role;
pub use summary::{AttendanceSummary, ClassBreakdown, MonthlyMarks};
pub use user::{Admin, AppUser, NewStudent, NewTeacher, Student, Teacher};
