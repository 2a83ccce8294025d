//! Lectern - a command-line client for the reading-assignment tracker.
//!
//! Professors create classrooms, enroll students, catalog books, assign
//! readings with due dates, and review student-submitted summaries;
//! students view assignments and submit summaries. All business rules
//! live behind the REST API; this client handles the authenticated
//! session and role-gated command dispatch.

mod api;
mod auth;
mod config;
mod guard;
mod models;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::ApiClient;
use auth::{Session, TokenStore};
use config::Config;
use guard::RouteAccess;
use models::{NewAssignment, NewBook, NewReading, ReadingStatus, RegisterRequest, Role};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!(
        "lectern - reading-assignment tracker client

Usage: lectern <command> [args]

Session:
  login [email]                       Sign in
  register                            Create an account
  logout                              Sign out
  whoami                              Show the current user

Catalog:
  books                               List the book catalog
  books show <id>                     Show one book
  books add <title> <author> [date]   Add a book (date: YYYY-MM-DD)
  books edit <id> <title> <author> [date]  Replace a book's details
  books rm <id>                       Delete a book and its assignments

Professor:
  students                            List all student accounts
  students history <id>               A student's submission history
  classrooms                          List your classrooms
  classrooms create <name>            Create a classroom
  classrooms rename <id> <name>       Rename a classroom
  classrooms rm <id>                  Delete a classroom
  classrooms students <id>            Show a classroom roster
  classrooms enroll <id> <student>    Enroll a student
  classrooms withdraw <id> <student>  Withdraw a student
  assignments create <book> <class> <due>  Assign a reading (due: YYYY-MM-DD)
  assignments reschedule <id> <due>   Move an assignment's due date
  assignments rm <id>                 Delete an assignment
  readings                            Review queue for your classrooms
  validate <reading-id>               Accept a summary
  reject <reading-id>                 Reject a summary

Student:
  assignments                         List reading assignments
  readings                            Your submitted summaries
  submit <assignment-id> <summary>    Submit a summary"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        return Ok(());
    };

    let mut config = Config::load()?;
    let client = ApiClient::new(config.base_url())?;
    let store = TokenStore::new(Config::data_dir()?);
    let mut session = Session::new(client, store);
    session.initialize().await;

    match command {
        "login" => cmd_login(&mut session, &mut config, args.get(2).cloned()).await,
        "register" => cmd_register(&mut session).await,
        "logout" => {
            session.logout();
            println!("Logged out.");
            Ok(())
        }
        "whoami" => cmd_whoami(&session),
        "books" => cmd_books(&session, &args[2..]).await,
        "students" => cmd_students(&session, &args[2..]).await,
        "classrooms" => cmd_classrooms(&session, &args[2..]).await,
        "assignments" => cmd_assignments(&session, &args[2..]).await,
        "readings" => cmd_readings(&session).await,
        "submit" => cmd_submit(&session, &args[2..]).await,
        "validate" => cmd_decide(&session, &args[2..], ReadingStatus::Validated).await,
        "reject" => cmd_decide(&session, &args[2..], ReadingStatus::Rejected).await,
        _ => {
            print_usage();
            bail!("Unknown command: {}", command)
        }
    }
}

/// Gate a command on the session state, mirroring what a route guard
/// would do in front of a protected view.
fn require(session: &Session, role: Option<Role>) -> Result<()> {
    match guard::evaluate(session.state(), role) {
        RouteAccess::Granted => Ok(()),
        RouteAccess::Pending => bail!("Session is still initializing, try again"),
        RouteAccess::RedirectToLogin => bail!("Not signed in. Run `lectern login` first."),
        RouteAccess::RedirectToHome => bail!(
            "This command requires a {} account.",
            role.map(|r| r.as_str()).unwrap_or("different")
        ),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn parse_id(args: &[String], index: usize, what: &str) -> Result<i64> {
    args.get(index)
        .with_context(|| format!("Missing {}", what))?
        .parse()
        .with_context(|| format!("Invalid {}", what))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

async fn cmd_login(
    session: &mut Session,
    config: &mut Config,
    email_arg: Option<String>,
) -> Result<()> {
    let email = match email_arg.or_else(|| config.last_email.clone()) {
        Some(email) => email,
        None => prompt("Email")?,
    };
    let password = rpassword::prompt_password(format!("Password for {}: ", email))?;

    let user = session.login(&email, &password).await?;
    config.last_email = Some(email);
    config.save()?;
    println!("Signed in as {} ({})", user.full_name(), user.role.as_str());
    Ok(())
}

async fn cmd_register(session: &mut Session) -> Result<()> {
    let email = prompt("Email")?;
    let password = rpassword::prompt_password("Password: ")?;
    let first_name = prompt("First name")?;
    let last_name = prompt("Last name")?;
    let role = loop {
        match Role::parse(&prompt("Role (student/professor)")?) {
            Some(role) => break role,
            None => eprintln!("Please answer 'student' or 'professor'."),
        }
    };

    session
        .register(&RegisterRequest {
            email,
            password,
            first_name,
            last_name,
            role,
        })
        .await?;
    println!("Account created. You can now sign in with `lectern login`.");
    Ok(())
}

fn cmd_whoami(session: &Session) -> Result<()> {
    require(session, None)?;
    let user = session.user().context("Not signed in")?;
    println!("{} <{}> ({})", user.full_name(), user.email, user.role.as_str());
    println!("Server: {}", session.client().base_url());
    Ok(())
}

async fn cmd_books(session: &Session, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        None => {
            let books = session.client().list_books().await?;
            if books.is_empty() {
                println!("The catalog is empty.");
            }
            for book in books {
                println!("{:>4}  {}", book.id, book.label());
            }
            Ok(())
        }
        Some("show") => {
            require(session, None)?;
            let id = parse_id(args, 1, "book id")?;
            let book = session.client().get_book(id).await?;
            println!("{:>4}  {}", book.id, book.label());
            Ok(())
        }
        Some("add") => {
            require(session, Some(Role::Professor))?;
            let book = parse_book_args(&args[1..])?;
            let id = session.client().add_book(&book).await?;
            println!("Added book #{}", id);
            Ok(())
        }
        Some("edit") => {
            require(session, Some(Role::Professor))?;
            let id = parse_id(args, 1, "book id")?;
            let book = parse_book_args(&args[2..])?;
            session.client().update_book(id, &book).await?;
            println!("Updated book #{}", id);
            Ok(())
        }
        Some("rm") => {
            require(session, Some(Role::Professor))?;
            let id = parse_id(args, 1, "book id")?;
            session.client().delete_book(id).await?;
            println!("Deleted book #{} and its assignments", id);
            Ok(())
        }
        Some(other) => bail!("Unknown books subcommand: {}", other),
    }
}

fn parse_book_args(args: &[String]) -> Result<NewBook> {
    Ok(NewBook {
        title: args.first().context("Missing title")?.clone(),
        author: args.get(1).context("Missing author")?.clone(),
        published_at: args.get(2).map(|s| parse_date(s)).transpose()?,
    })
}

async fn cmd_students(session: &Session, args: &[String]) -> Result<()> {
    require(session, Some(Role::Professor))?;
    match args.first().map(String::as_str) {
        None => {
            for student in session.client().list_students().await? {
                println!("{:>4}  {} <{}>", student.id, student.full_name(), student.email);
            }
        }
        Some("history") => {
            let id = parse_id(args, 1, "student id")?;
            let submissions = session.client().student_submissions(id).await?;
            if submissions.is_empty() {
                println!("No submissions yet.");
            }
            for submission in submissions {
                println!(
                    "{:>4}  {}  [{}]  submitted {}",
                    submission.id,
                    submission.book_label(),
                    submission.status.display(),
                    submission.submitted_at.date()
                );
            }
        }
        Some(other) => bail!("Unknown students subcommand: {}", other),
    }
    Ok(())
}

async fn cmd_classrooms(session: &Session, args: &[String]) -> Result<()> {
    require(session, Some(Role::Professor))?;
    let client = session.client();
    match args.first().map(String::as_str) {
        None => {
            let classrooms = client.list_classrooms().await?;
            if classrooms.is_empty() {
                println!("No classrooms yet.");
            }
            for classroom in classrooms {
                println!("{:>4}  {}", classroom.id, classroom.name);
            }
        }
        Some("create") => {
            let name = args[1..].join(" ");
            if name.is_empty() {
                bail!("Missing classroom name");
            }
            let classroom = client.create_classroom(&name).await?;
            println!("Created classroom #{} '{}'", classroom.id, classroom.name);
        }
        Some("rename") => {
            let id = parse_id(args, 1, "classroom id")?;
            let name = args[2..].join(" ");
            if name.is_empty() {
                bail!("Missing classroom name");
            }
            client.rename_classroom(id, &name).await?;
            println!("Renamed classroom #{} to '{}'", id, name);
        }
        Some("rm") => {
            let id = parse_id(args, 1, "classroom id")?;
            client.delete_classroom(id).await?;
            println!("Deleted classroom #{}", id);
        }
        Some("students") => {
            let id = parse_id(args, 1, "classroom id")?;
            let classroom = client.get_classroom(id).await?;
            let roster = client.classroom_students(id).await?;
            println!("{} ({} enrolled)", classroom.name, roster.len());
            for student in roster {
                println!("{:>4}  {} <{}>", student.id, student.full_name(), student.email);
            }
        }
        Some("enroll") => {
            let id = parse_id(args, 1, "classroom id")?;
            let student_id = parse_id(args, 2, "student id")?;
            client.enroll_student(id, student_id).await?;
            println!("Enrolled student #{} in classroom #{}", student_id, id);
        }
        Some("withdraw") => {
            let id = parse_id(args, 1, "classroom id")?;
            let student_id = parse_id(args, 2, "student id")?;
            client.withdraw_student(id, student_id).await?;
            println!("Withdrew student #{} from classroom #{}", student_id, id);
        }
        Some(other) => bail!("Unknown classrooms subcommand: {}", other),
    }
    Ok(())
}

async fn cmd_assignments(session: &Session, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        None => {
            require(session, None)?;
            let assignments = session.client().list_assignments().await?;
            if assignments.is_empty() {
                println!("No reading assignments.");
            }
            for assignment in assignments {
                let due = assignment
                    .due_date
                    .map(|d| d.date().to_string())
                    .unwrap_or_else(|| "no due date".to_string());
                println!(
                    "{:>4}  {}  (classroom #{}, due {})",
                    assignment.id,
                    assignment.book_label(),
                    assignment.classroom_id,
                    due
                );
            }
            Ok(())
        }
        Some("create") => {
            require(session, Some(Role::Professor))?;
            let book_id = parse_id(args, 1, "book id")?;
            let classroom_id = parse_id(args, 2, "classroom id")?;
            let due_date = parse_date(args.get(3).context("Missing due date")?)?;

            let assignment = NewAssignment::new(book_id, classroom_id, due_date);
            // Reject impossible schedules before the request leaves the machine
            assignment.validate()?;

            let created = session.client().create_assignment(&assignment).await?;
            println!(
                "Assigned book #{} to classroom #{} (assignment #{})",
                created.book_id, created.classroom_id, created.id
            );
            Ok(())
        }
        Some("reschedule") => {
            require(session, Some(Role::Professor))?;
            let id = parse_id(args, 1, "assignment id")?;
            let due_date = parse_date(args.get(2).context("Missing due date")?)?;
            let updated = session.client().reschedule_assignment(id, due_date).await?;
            let due = updated
                .due_date
                .map(|d| d.date().to_string())
                .unwrap_or_else(|| "no due date".to_string());
            println!("Assignment #{} now due {}", updated.id, due);
            Ok(())
        }
        Some("rm") => {
            require(session, Some(Role::Professor))?;
            let id = parse_id(args, 1, "assignment id")?;
            session.client().delete_assignment(id).await?;
            println!("Deleted assignment #{}", id);
            Ok(())
        }
        Some(other) => bail!("Unknown assignments subcommand: {}", other),
    }
}

async fn cmd_readings(session: &Session) -> Result<()> {
    require(session, None)?;
    let user = session.user().context("Not signed in")?;
    match user.role {
        Role::Student => {
            let readings = session.client().my_readings().await?;
            if readings.is_empty() {
                println!("No submissions yet.");
            }
            for reading in readings {
                println!(
                    "{:>4}  assignment #{}  [{}]  submitted {}",
                    reading.id,
                    reading.assignment_id,
                    reading.status.display(),
                    reading.submitted_at.date()
                );
            }
        }
        Role::Professor => {
            let queue = session.client().review_queue().await?;
            if queue.is_empty() {
                println!("Nothing to review.");
            }
            for review in queue {
                println!(
                    "{:>4}  {}  {}  ({})  [{}]  submitted {}",
                    review.id,
                    review.student_label(),
                    review.book_label(),
                    review.classroom_label(),
                    review.status.display(),
                    review.submitted_at.date()
                );
            }
        }
    }
    Ok(())
}

async fn cmd_submit(session: &Session, args: &[String]) -> Result<()> {
    require(session, Some(Role::Student))?;
    let assignment_id = parse_id(args, 0, "assignment id")?;
    let summary = args[1..].join(" ");
    if summary.is_empty() {
        bail!("Missing summary text");
    }

    let reading = session
        .client()
        .submit_reading(&NewReading {
            assignment_id,
            summary,
        })
        .await?;
    println!(
        "Submitted summary #{} for assignment #{} ({})",
        reading.id,
        reading.assignment_id,
        reading.status.display()
    );
    Ok(())
}

async fn cmd_decide(session: &Session, args: &[String], status: ReadingStatus) -> Result<()> {
    require(session, Some(Role::Professor))?;
    let id = parse_id(args, 0, "reading id")?;
    let decision = session.client().decide_reading(id, status).await?;
    println!("Reading #{} is now {}", decision.id, decision.status.display());
    Ok(())
}
