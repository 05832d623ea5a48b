//! The canonical class-schedule record.
//!
//! [`ClassRecord`] is the in-memory representation a record takes after
//! passing validation (or after a lenient import): numeric fields are
//! parsed, composite time fields are structured. Serializing back to the
//! textual grammar is the interchange layer's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::{ExamDate, TimeSlot};

/// The semester a class belongs to.
///
/// The set is closed: the original planner offers exactly these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semester {
    First,
    Second,
    Third,
    Fourth,
}

impl Semester {
    /// All semesters, in curriculum order.
    pub const ALL: [Semester; 4] = [
        Semester::First,
        Semester::Second,
        Semester::Third,
        Semester::Fourth,
    ];

    /// Returns the Persian label of this semester.
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "اول",
            Self::Second => "دوم",
            Self::Third => "سوم",
            Self::Fourth => "چهارم",
        }
    }

    /// Parses a Persian semester label.
    pub fn parse(text: &str) -> Option<Semester> {
        let text = text.trim();
        Semester::ALL.into_iter().find(|s| s.label() == text)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A canonical class-schedule record.
///
/// `class_time` and `exam_date` are optional: legacy or imported rows may
/// carry text that does not parse, and such records are valid store
/// members; they are simply excluded from conflict checking and counted
/// as unplaced by the grid builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Semester the class belongs to.
    pub semester: Semester,
    /// Course title (non-empty).
    pub course_title: String,
    /// Course code (positive).
    pub course_code: u64,
    /// Main instructor name (non-empty).
    pub main_instructor: String,
    /// Seat capacity (positive).
    pub capacity: u32,
    /// Weekly class time, when parseable.
    pub class_time: Option<TimeSlot>,
    /// Exam slot, when parseable.
    pub exam_date: Option<ExamDate>,
}

impl ClassRecord {
    /// Creates a record with no class time or exam date.
    pub fn new(
        semester: Semester,
        course_title: impl Into<String>,
        course_code: u64,
        main_instructor: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            semester,
            course_title: course_title.into(),
            course_code,
            main_instructor: main_instructor.into(),
            capacity,
            class_time: None,
            exam_date: None,
        }
    }

    /// Builder method to set the weekly class time.
    pub fn with_class_time(mut self, slot: TimeSlot) -> Self {
        self.class_time = Some(slot);
        self
    }

    /// Builder method to set the exam slot.
    pub fn with_exam_date(mut self, exam: ExamDate) -> Self {
        self.exam_date = Some(exam);
        self
    }

    /// Substring search across title, code, instructor, and semester label.
    ///
    /// A blank query matches every record.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.course_title.contains(query)
            || self.course_code.to_string().contains(query)
            || self.main_instructor.contains(query)
            || self.semester.label().contains(query)
    }
}
