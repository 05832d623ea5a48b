//! Core types: records, time slots, Jalali dates, conflict validation, weekly grid

pub mod calendar;
pub mod grid;
pub mod record;
pub mod store;
pub mod time;
pub mod tracing;
pub mod validate;

pub use grid::{CELL_DIVIDER, CellSpan, DayRow, WeekGrid};
pub use record::{ClassRecord, Semester};
pub use store::RecordStore;
pub use time::{
    ExamDate, ParseFailure, TimeSlot, Weekday, format_class_time, format_exam_date,
    parse_class_time, parse_exam_date,
};
pub use tracing::{LogFormat, TracingError, init_tracing};
pub use validate::{Candidate, Field, Reject, validate};
