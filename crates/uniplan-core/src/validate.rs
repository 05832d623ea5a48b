//! Conflict validation for candidate records.
//!
//! [`validate`] is the single gate through which a record enters the
//! store: it takes a [`Candidate`] built from raw field text, the
//! existing record snapshot, and an optional self-exclusion index (edit
//! mode), and returns either the canonical [`ClassRecord`] or a typed
//! [`Reject`] reason. The function is pure: it never mutates its inputs
//! and has no dependency on any interface layer.
//!
//! Checks run in a fixed order and the first failure short-circuits:
//!
//! 1. Required fields: instructor, title, course code, capacity.
//! 2. Exam-date calendar validity.
//! 3. Class time ordering (`start < end`).
//! 4. Half-open interval overlap against same-semester, same-day records.
//! 5. Duplicate course code within the semester.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar;
use crate::record::{ClassRecord, Semester};
use crate::time::{Weekday, parse_class_time, parse_exam_date};

/// A candidate record, as raw field text from whatever surface collected it.
///
/// `class_time` and `exam_date` carry the composite grammar forms; an
/// empty or unparsable `class_time` means "no structured time" and is
/// skipped by the time checks rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Target semester.
    pub semester: Semester,
    /// Course title text.
    pub course_title: String,
    /// Course code text, expected to parse as a positive integer.
    pub course_code: String,
    /// Main instructor text.
    pub main_instructor: String,
    /// Capacity text, expected to parse as a positive integer.
    pub capacity: String,
    /// Class time in the `<day> از <HH:MM> تا <HH:MM>` grammar.
    pub class_time: String,
    /// Exam date in the `(<HH:MM>)<date>` or bare-date grammar.
    pub exam_date: String,
}

impl Candidate {
    /// Creates a candidate with the required text fields.
    pub fn new(
        semester: Semester,
        course_title: impl Into<String>,
        course_code: impl Into<String>,
        main_instructor: impl Into<String>,
        capacity: impl Into<String>,
    ) -> Self {
        Self {
            semester,
            course_title: course_title.into(),
            course_code: course_code.into(),
            main_instructor: main_instructor.into(),
            capacity: capacity.into(),
            class_time: String::new(),
            exam_date: String::new(),
        }
    }

    /// Builder method to set the class-time text.
    pub fn with_class_time(mut self, text: impl Into<String>) -> Self {
        self.class_time = text.into();
        self
    }

    /// Builder method to set the exam-date text.
    pub fn with_exam_date(mut self, text: impl Into<String>) -> Self {
        self.exam_date = text.into();
        self
    }
}

/// A required field that failed its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CourseTitle,
    CourseCode,
    MainInstructor,
    Capacity,
}

impl Field {
    /// Returns the field name as used in messages and serialized reasons.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseTitle => "course_title",
            Self::CourseCode => "course_code",
            Self::MainInstructor => "main_instructor",
            Self::Capacity => "capacity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a candidate was rejected.
///
/// A tagged taxonomy, not a message string: callers branch on the variant
/// and each variant carries the context needed to report it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Reject {
    /// A required field is missing or does not parse.
    #[error("required field is missing or invalid: {field}")]
    Field { field: Field },

    /// The exam date is not a valid Solar Hijri calendar date.
    #[error("exam date is not a valid calendar date")]
    Date,

    /// The class start time is not earlier than its end time.
    #[error("class start time must be earlier than its end time")]
    TimeOrder,

    /// The class time overlaps another class in the same semester and day.
    #[error("another class occupies this time on {day} in semester {semester}")]
    Conflict { day: Weekday, semester: Semester },

    /// The course code is already registered in the same semester.
    #[error("course code {code} is already registered in semester {semester}")]
    DuplicateCode { semester: Semester, code: u64 },
}

/// Validates a candidate against the existing record set.
///
/// `exclude` names the index of the record being edited, so a record is
/// never checked against itself. On success the returned [`ClassRecord`]
/// is canonical: text fields trimmed, numerics parsed, composite fields
/// structured.
pub fn validate(
    candidate: &Candidate,
    existing: &[ClassRecord],
    exclude: Option<usize>,
) -> Result<ClassRecord, Reject> {
    let main_instructor = candidate.main_instructor.trim();
    if main_instructor.is_empty() {
        return Err(Reject::Field {
            field: Field::MainInstructor,
        });
    }

    let course_title = candidate.course_title.trim();
    if course_title.is_empty() {
        return Err(Reject::Field {
            field: Field::CourseTitle,
        });
    }

    let course_code = match candidate.course_code.trim().parse::<u64>() {
        Ok(code) if code > 0 => code,
        _ => {
            return Err(Reject::Field {
                field: Field::CourseCode,
            });
        }
    };

    let capacity = match candidate.capacity.trim().parse::<u32>() {
        Ok(capacity) if capacity > 0 => capacity,
        _ => {
            return Err(Reject::Field {
                field: Field::Capacity,
            });
        }
    };

    let exam_date = parse_exam_date(&candidate.exam_date);
    if !calendar::is_valid_date(&exam_date.date) {
        return Err(Reject::Date);
    }

    let class_time = parse_class_time(&candidate.class_time).ok();
    if let Some(slot) = &class_time {
        if slot.start >= slot.end {
            return Err(Reject::TimeOrder);
        }

        // Single pass over the snapshot; only same-semester records with a
        // structured time can conflict.
        for (index, other) in existing.iter().enumerate() {
            if exclude == Some(index) || other.semester != candidate.semester {
                continue;
            }
            let Some(other_slot) = &other.class_time else {
                continue;
            };
            if slot.overlaps(other_slot) {
                return Err(Reject::Conflict {
                    day: slot.day,
                    semester: candidate.semester,
                });
            }
        }
    }

    let duplicate = existing.iter().enumerate().any(|(index, other)| {
        exclude != Some(index)
            && other.semester == candidate.semester
            && other.course_code == course_code
    });
    if duplicate {
        return Err(Reject::DuplicateCode {
            semester: candidate.semester,
            code: course_code,
        });
    }

    Ok(ClassRecord {
        semester: candidate.semester,
        course_title: course_title.to_string(),
        course_code,
        main_instructor: main_instructor.to_string(),
        capacity,
        class_time,
        exam_date: Some(exam_date),
    })
}
