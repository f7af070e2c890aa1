//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, StudentCommand, TeacherCommand};
pub use output::{
    format_dashboard, format_student_detail, format_student_list, format_teacher_list,
    format_user,
};
