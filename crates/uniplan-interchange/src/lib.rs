//! Flat tabular interchange for UniPlan records.
//!
//! Fixed 7-column rows (Semester, CourseTitle, CourseCode,
//! MainInstructor, ClassTime, ExamDate, Capacity) with the planner's
//! Persian headers. Exporting a record set and re-importing the rows
//! reproduces field-equal records; import of foreign rows is lenient
//! and reports what it had to skip.

pub mod import;
pub mod row;

pub use import::{ImportReport, SkipReason, export_rows, import_rows};
pub use row::{COLUMN_COUNT, FlatRow, HEADERS};
