//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "academia")]
#[command(about = "School administration records for admins, teachers and students", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Create an administrator account
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },

    /// Log in as an existing user
    Login {
        #[arg(long)]
        email: String,

        /// Role to log in as (admin, teacher, student)
        #[arg(short, long)]
        role: String,
    },

    /// Forget the logged-in user
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show the dashboard for the logged-in user
    Dashboard,

    /// Manage students
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Manage teachers
    Teacher {
        #[command(subcommand)]
        command: TeacherCommand,
    },

    /// Record a student's attendance for a month (teachers only)
    Attendance {
        /// Student record id (as shown by 'student list')
        id: String,

        /// Month label (e.g., Jan)
        month: String,

        /// present, absent or late
        status: String,
    },

    /// Record a student's marks for a month and subject (teachers only)
    Marks {
        /// Student record id (as shown by 'student list')
        id: String,

        /// Month label (e.g., Jan)
        month: String,

        subject: String,

        /// Value between 0 and 100
        #[arg(allow_negative_numbers = true)]
        marks: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Enroll a new student
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// School-assigned student ID (e.g., S100)
        #[arg(long)]
        student_id: String,

        /// Class label (e.g., 10A)
        #[arg(long = "class")]
        class_name: String,
    },

    /// List students
    List {
        /// Only students in this class (exact match)
        #[arg(long = "class")]
        class_name: Option<String>,
    },

    /// Show one student with attendance and marks
    Show { id: String },

    /// Delete a student
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TeacherCommand {
    /// Add a new teacher
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// School-assigned teacher ID (e.g., T10)
        #[arg(long)]
        teacher_id: String,

        #[arg(long)]
        department: String,

        /// Comma-separated class labels (e.g., 10A,10B)
        #[arg(long, value_delimiter = ',')]
        classes: Vec<String>,
    },

    /// List teachers
    List,

    /// Delete a teacher
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_teacher_classes() {
        let cli = Cli::try_parse_from([
            "academia",
            "teacher",
            "add",
            "--name",
            "Bob",
            "--email",
            "bob@x.com",
            "--teacher-id",
            "T1",
            "--department",
            "Science",
            "--classes",
            "10A,10B",
        ])
        .unwrap();

        match cli.command {
            Commands::Teacher {
                command: TeacherCommand::Add { classes, .. },
            } => assert_eq!(classes, vec!["10A", "10B"]),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_marks() {
        let cli =
            Cli::try_parse_from(["academia", "marks", "s1", "Jan", "Math", "-5"]).unwrap();
        match cli.command {
            Commands::Marks { marks, .. } => assert_eq!(marks, -5.0),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["academia"]).is_err());
    }
}
