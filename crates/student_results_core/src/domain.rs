//! crates/student_results_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use crate::grade::{calculate_grade, Grade};

/// A student as stored in the `students` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    pub email: String,
}

/// A single exam result, scoped to one student.
///
/// `grade` is whatever was stored at insertion time. It is never re-derived
/// from `marks` on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamResult {
    pub id: i64,
    pub student_id: Option<i64>,
    pub subject: String,
    pub marks: i64,
    pub grade: Option<String>,
    pub semester: String,
}

// Creation payloads keep every field optional. Absent values are bound as NULL
// and left to the schema's NOT NULL constraints.

/// The fields submitted when creating a student.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub name: Option<String>,
    pub roll_number: Option<String>,
    pub email: Option<String>,
}

/// The fields submitted when recording a result for a student.
#[derive(Debug, Clone, Default)]
pub struct NewResult {
    pub subject: Option<String>,
    pub marks: Option<i64>,
    pub semester: Option<String>,
}

impl NewResult {
    /// The grade to store alongside this result. Missing marks match no
    /// threshold and fall through to `F`.
    pub fn grade(&self) -> Grade {
        self.marks.map(calculate_grade).unwrap_or(Grade::F)
    }
}
