use academia::application::{init::init, AuthService, ConfigService, DirectoryService};
use academia::cli::{
    format_dashboard, format_student_detail, format_student_list, format_teacher_list,
    format_user, Cli, Commands, StudentCommand, TeacherCommand,
};
use academia::domain::{AttendanceStatus, NewStudent, NewTeacher, Role};
use academia::error::{AcademiaError, Result};
use academia::infrastructure::{FileKeyValueStore, FileSystemRepository, SessionStore};
use clap::Parser;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `info`, `academia=debug`)
const LOG_ENV_VAR: &str = "ACADEMIA_LOG";

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_workspace() -> Result<(FileSystemRepository, DirectoryService<FileKeyValueStore>)> {
    let repo = FileSystemRepository::discover()?;
    let directory = DirectoryService::open(&repo)?;
    Ok((repo, directory))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => init(&path),
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("store_key = {}", config.store_key);
                println!("latency_ms = {}", config.latency_ms);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: academia config [--list | <key> [<value>]]");
                println!("Valid keys: store_key, latency_ms, created");
                Ok(())
            }
        }
        Commands::Signup { name, email } => {
            let (_, directory) = open_workspace()?;
            let admin = directory.signup_admin(&name, &email).await?;
            println!("Created admin {}", format_user(&admin.into()));
            Ok(())
        }
        Commands::Login { email, role } => {
            let role = Role::from_str(&role).map_err(AcademiaError::Config)?;
            let (repo, directory) = open_workspace()?;
            let auth = AuthService::new(&directory, SessionStore::new(repo.session_path()));
            let user = auth.login(&email, role).await?;
            println!("Logged in as {}", format_user(&user));
            Ok(())
        }
        Commands::Logout => {
            let (repo, directory) = open_workspace()?;
            let auth = AuthService::new(&directory, SessionStore::new(repo.session_path()));
            if auth.logout()? {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
            Ok(())
        }
        Commands::Whoami => {
            let (repo, directory) = open_workspace()?;
            let auth = AuthService::new(&directory, SessionStore::new(repo.session_path()));
            println!("{}", format_user(&auth.current_user()?));
            Ok(())
        }
        Commands::Dashboard => {
            let (repo, directory) = open_workspace()?;
            let auth = AuthService::new(&directory, SessionStore::new(repo.session_path()));
            print!("{}", format_dashboard(&auth.dashboard().await?));
            Ok(())
        }
        Commands::Student { command } => run_student(command).await,
        Commands::Teacher { command } => run_teacher(command).await,
        Commands::Attendance { id, month, status } => {
            let status = AttendanceStatus::from_str(&status).map_err(AcademiaError::Config)?;
            let (repo, directory) = open_workspace()?;
            let auth = AuthService::new(&directory, SessionStore::new(repo.session_path()));
            if !auth.record_attendance(&id, &month, status).await? {
                return Err(AcademiaError::StudentNotFound(id));
            }
            println!("Recorded {} for {} in {}", status, id, month);
            Ok(())
        }
        Commands::Marks {
            id,
            month,
            subject,
            marks,
        } => {
            let (repo, directory) = open_workspace()?;
            let auth = AuthService::new(&directory, SessionStore::new(repo.session_path()));
            if !auth.record_marks(&id, &month, &subject, marks).await? {
                return Err(AcademiaError::StudentNotFound(id));
            }
            println!("Recorded {} marks in {} for {} in {}", marks, subject, id, month);
            Ok(())
        }
    }
}

async fn run_student(command: StudentCommand) -> Result<()> {
    let (_, directory) = open_workspace()?;

    match command {
        StudentCommand::Add {
            name,
            email,
            student_id,
            class_name,
        } => {
            let student = directory
                .add_student(NewStudent {
                    name,
                    email,
                    student_id,
                    class_name,
                })
                .await?;
            println!("Added student {} ({})", student.name, student.id);
        }
        StudentCommand::List { class_name } => {
            let students = match class_name {
                Some(class_name) => directory.get_students_by_class(&class_name).await,
                None => directory.list_students().await,
            };
            println!("{}", format_student_list(&students).trim_end());
        }
        StudentCommand::Show { id } => {
            let student = directory
                .get_student_by_id(&id)
                .await
                .ok_or(AcademiaError::StudentNotFound(id))?;
            print!("{}", format_student_detail(&student));
        }
        StudentCommand::Delete { id } => {
            if !directory.delete_student(&id).await? {
                return Err(AcademiaError::StudentNotFound(id));
            }
            println!("Deleted student {}", id);
        }
    }
    Ok(())
}

async fn run_teacher(command: TeacherCommand) -> Result<()> {
    let (_, directory) = open_workspace()?;

    match command {
        TeacherCommand::Add {
            name,
            email,
            teacher_id,
            department,
            classes,
        } => {
            let teacher = directory
                .add_teacher(NewTeacher {
                    name,
                    email,
                    teacher_id,
                    department,
                    classes,
                })
                .await?;
            println!("Added teacher {} ({})", teacher.name, teacher.id);
        }
        TeacherCommand::List => {
            let teachers = directory.list_teachers().await;
            println!("{}", format_teacher_list(&teachers).trim_end());
        }
        TeacherCommand::Delete { id } => {
            if !directory.delete_teacher(&id).await? {
                return Err(AcademiaError::TeacherNotFound(id));
            }
            println!("Deleted teacher {}", id);
        }
    }
    Ok(())
}
