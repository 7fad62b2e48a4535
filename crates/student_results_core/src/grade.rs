//! crates/student_results_core/src/grade.rs
//!
//! Maps a numeric mark to a letter grade using fixed thresholds.

use std::fmt;

/// The letter grades a result can be awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    C,
    F,
}

impl Grade {
    /// The label stored in the `results.grade` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `marks`, checking thresholds from the highest down.
///
/// Anything below 50, negative values included, is an `F`.
pub fn calculate_grade(marks: i64) -> Grade {
    match marks {
        m if m >= 90 => Grade::APlus,
        m if m >= 80 => Grade::A,
        m if m >= 70 => Grade::BPlus,
        m if m >= 60 => Grade::B,
        m if m >= 50 => Grade::C,
        _ => Grade::F,
    }
}
