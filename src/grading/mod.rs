pub mod engine;
pub mod parse;
pub mod types;

pub use engine::{module_average, semester_average, semester_average_with, subject_average};
pub use parse::parse_grade;
pub use types::{with_grade, GradeField, Grades, Module, Subject};
