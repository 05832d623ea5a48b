//! The flat-table row type.
//!
//! A [`FlatRow`] is one record rendered to text in the fixed interchange
//! column order. External collaborators (spreadsheet writers, CSV
//! emitters, table widgets) consume and produce these rows; this crate
//! never touches a concrete file format.

use serde::{Deserialize, Serialize};

use uniplan_core::{ClassRecord, format_class_time, format_exam_date};

/// Number of interchange columns.
pub const COLUMN_COUNT: usize = 7;

/// Column header labels, in column order.
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "نیمسال",
    "درس",
    "کددرس",
    "مدرس‌اصلي",
    "ساعت‌کلاس",
    "تاریخ آزمون",
    "ظرفیت",
];

/// One flat-table row: every field as text, in the fixed column order
/// Semester, CourseTitle, CourseCode, MainInstructor, ClassTime,
/// ExamDate, Capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub semester: String,
    pub course_title: String,
    pub course_code: String,
    pub main_instructor: String,
    pub class_time: String,
    pub exam_date: String,
    pub capacity: String,
}

impl FlatRow {
    /// Renders a canonical record to a row.
    ///
    /// Structured fields are serialized through the codec grammar; absent
    /// class time or exam date becomes an empty cell.
    pub fn from_record(record: &ClassRecord) -> Self {
        Self {
            semester: record.semester.label().to_string(),
            course_title: record.course_title.clone(),
            course_code: record.course_code.to_string(),
            main_instructor: record.main_instructor.clone(),
            class_time: record
                .class_time
                .as_ref()
                .map(format_class_time)
                .unwrap_or_default(),
            exam_date: record
                .exam_date
                .as_ref()
                .map(format_exam_date)
                .unwrap_or_default(),
            capacity: record.capacity.to_string(),
        }
    }

    /// Builds a row from cells in column order.
    ///
    /// Returns `None` unless exactly [`COLUMN_COUNT`] cells are given.
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        let [semester, course_title, course_code, main_instructor, class_time, exam_date, capacity] =
            cells
        else {
            return None;
        };
        Some(Self {
            semester: semester.clone(),
            course_title: course_title.clone(),
            course_code: course_code.clone(),
            main_instructor: main_instructor.clone(),
            class_time: class_time.clone(),
            exam_date: exam_date.clone(),
            capacity: capacity.clone(),
        })
    }

    /// The cells of this row, in column order.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.semester,
            &self.course_title,
            &self.course_code,
            &self.main_instructor,
            &self.class_time,
            &self.exam_date,
            &self.capacity,
        ]
    }

    /// A row is blank when both its title and code cells are empty.
    ///
    /// Spreadsheets routinely carry trailing padding rows; blank rows are
    /// skipped by the importer.
    pub fn is_blank(&self) -> bool {
        self.course_title.trim().is_empty() && self.course_code.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniplan_core::{Semester, parse_class_time, parse_exam_date};

    fn sample_record() -> ClassRecord {
        ClassRecord::new(Semester::First, "ریاضی ۱", 12345, "دکتر احمدی", 40)
            .with_class_time(parse_class_time("شنبه از 08:00 تا 10:00").unwrap())
            .with_exam_date(parse_exam_date("(08:00)1405/03/20"))
    }

    #[test]
    fn from_record_serializes_through_the_grammar() {
        let row = FlatRow::from_record(&sample_record());
        assert_eq!(row.semester, "اول");
        assert_eq!(row.course_code, "12345");
        assert_eq!(row.class_time, "شنبه از 08:00 تا 10:00");
        assert_eq!(row.exam_date, "(08:00)1405/03/20");
        assert_eq!(row.capacity, "40");
    }

    #[test]
    fn absent_structured_fields_become_empty_cells() {
        let record = ClassRecord::new(Semester::Third, "درس قدیمی", 7, "نامشخص", 5);
        let row = FlatRow::from_record(&record);
        assert_eq!(row.class_time, "");
        assert_eq!(row.exam_date, "");
    }

    #[test]
    fn cells_follow_the_fixed_column_order() {
        let row = FlatRow::from_record(&sample_record());
        let cells = row.cells();
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[0], "اول");
        assert_eq!(cells[2], "12345");
        assert_eq!(cells[6], "40");
    }

    #[test]
    fn from_cells_requires_exactly_seven() {
        let cells: Vec<String> = FlatRow::from_record(&sample_record())
            .cells()
            .map(str::to_string)
            .to_vec();
        let row = FlatRow::from_cells(&cells).unwrap();
        assert_eq!(row, FlatRow::from_record(&sample_record()));

        assert!(FlatRow::from_cells(&cells[..6]).is_none());
        let mut extra = cells.clone();
        extra.push(String::new());
        assert!(FlatRow::from_cells(&extra).is_none());
    }

    #[test]
    fn blank_detection() {
        let mut row = FlatRow::default();
        assert!(row.is_blank());
        row.main_instructor = "کسی".into();
        assert!(row.is_blank());
        row.course_title = "درس".into();
        assert!(!row.is_blank());
    }
}
