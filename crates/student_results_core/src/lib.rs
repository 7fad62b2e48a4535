pub mod domain;
pub mod grade;
pub mod ports;

pub use domain::{ExamResult, NewResult, NewStudent, Student};
pub use grade::{calculate_grade, Grade};
pub use ports::{DatabaseService, PortError, PortResult, View, ViewRenderer};
