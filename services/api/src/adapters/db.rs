//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use student_results_core::domain::{ExamResult, NewResult, NewStudent, Student};
use student_results_core::ports::{DatabaseService, PortError, PortResult};
use tracing::debug;

const CREATE_STUDENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    roll_number TEXT UNIQUE NOT NULL,
    email TEXT UNIQUE NOT NULL
)";

const CREATE_RESULTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER,
    subject TEXT NOT NULL,
    marks INTEGER NOT NULL,
    grade TEXT,
    semester TEXT NOT NULL,
    FOREIGN KEY (student_id) REFERENCES students (id)
)";

/// Opens a SQLite pool for `url`, creating the database file when missing.
///
/// Foreign keys are left unenforced: results may reference a student id that
/// does not exist.
pub async fn connect_pool(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(false);

    // In-memory databases vanish with their last connection, so idle
    // connections are never reaped.
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the `students` and `results` tables if they are absent.
    pub async fn create_tables(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_STUDENTS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_RESULTS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

/// Translates a `sqlx` failure into a port error carrying the raw database message.
fn to_port_error(err: sqlx::Error) -> PortError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = raw_message(&*db_err);
            match db_err.kind() {
                ErrorKind::Other => PortError::Unexpected(message),
                _ => PortError::Constraint(message),
            }
        }
        other => PortError::Unexpected(other.to_string()),
    }
}

/// SQLite's message, led by the name of its result code
/// (`SQLITE_CONSTRAINT: UNIQUE constraint failed: students.email`).
fn raw_message(db_err: &dyn DatabaseError) -> String {
    match db_err.code().as_deref().and_then(result_code_name) {
        Some(name) => format!("{}: {}", name, db_err.message()),
        None => db_err.message().to_string(),
    }
}

/// Names the primary result code behind an extended one (2067 is
/// `SQLITE_CONSTRAINT_UNIQUE`, primary code 19).
fn result_code_name(code: &str) -> Option<&'static str> {
    let primary = code.parse::<i32>().ok()? & 0xff;
    let name = match primary {
        1 => "SQLITE_ERROR",
        2 => "SQLITE_INTERNAL",
        3 => "SQLITE_PERM",
        4 => "SQLITE_ABORT",
        5 => "SQLITE_BUSY",
        6 => "SQLITE_LOCKED",
        7 => "SQLITE_NOMEM",
        8 => "SQLITE_READONLY",
        9 => "SQLITE_INTERRUPT",
        10 => "SQLITE_IOERR",
        11 => "SQLITE_CORRUPT",
        12 => "SQLITE_NOTFOUND",
        13 => "SQLITE_FULL",
        14 => "SQLITE_CANTOPEN",
        15 => "SQLITE_PROTOCOL",
        16 => "SQLITE_EMPTY",
        17 => "SQLITE_SCHEMA",
        18 => "SQLITE_TOOBIG",
        19 => "SQLITE_CONSTRAINT",
        20 => "SQLITE_MISMATCH",
        21 => "SQLITE_MISUSE",
        22 => "SQLITE_NOLFS",
        23 => "SQLITE_AUTH",
        24 => "SQLITE_FORMAT",
        25 => "SQLITE_RANGE",
        26 => "SQLITE_NOTADB",
        _ => return None,
    };
    Some(name)
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct StudentRecord {
    id: i64,
    name: String,
    roll_number: String,
    email: String,
}
impl StudentRecord {
    fn to_domain(self) -> Student {
        Student {
            id: self.id,
            name: self.name,
            roll_number: self.roll_number,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct ResultRecord {
    id: i64,
    student_id: Option<i64>,
    subject: String,
    marks: i64,
    grade: Option<String>,
    semester: String,
}
impl ResultRecord {
    fn to_domain(self) -> ExamResult {
        ExamResult {
            id: self.id,
            student_id: self.student_id,
            subject: self.subject,
            marks: self.marks,
            grade: self.grade,
            semester: self.semester,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn list_students(&self) -> PortResult<Vec<Student>> {
        let records = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, roll_number, email FROM students",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_port_error)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_student(&self, student: &NewStudent) -> PortResult<i64> {
        let done = sqlx::query("INSERT INTO students (name, roll_number, email) VALUES (?, ?, ?)")
            .bind(student.name.as_deref())
            .bind(student.roll_number.as_deref())
            .bind(student.email.as_deref())
            .execute(&self.pool)
            .await
            .map_err(to_port_error)?;

        let id = done.last_insert_rowid();
        debug!("Inserted student {}", id);
        Ok(id)
    }

    async fn get_student(&self, student_id: i64) -> PortResult<Option<Student>> {
        let record = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, roll_number, email FROM students WHERE id = ?",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(to_port_error)?;

        Ok(record.map(|r| r.to_domain()))
    }

    async fn list_results_for_student(&self, student_id: i64) -> PortResult<Vec<ExamResult>> {
        let records = sqlx::query_as::<_, ResultRecord>(
            "SELECT id, student_id, subject, marks, grade, semester FROM results WHERE student_id = ?",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(to_port_error)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_result(&self, student_id: i64, result: &NewResult) -> PortResult<i64> {
        let grade = result.grade();
        let done = sqlx::query(
            "INSERT INTO results (student_id, subject, marks, grade, semester) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(student_id)
        .bind(result.subject.as_deref())
        .bind(result.marks)
        .bind(grade.as_str())
        .bind(result.semester.as_deref())
        .execute(&self.pool)
        .await
        .map_err(to_port_error)?;

        let id = done.last_insert_rowid();
        debug!("Inserted result {} for student {} with grade {}", id, student_id, grade);
        Ok(id)
    }
}
