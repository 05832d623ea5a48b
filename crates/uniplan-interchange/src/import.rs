//! Record ⇄ row conversion.
//!
//! Export is total: every canonical record renders to a row. Import is
//! lenient: rows bypass the conflict validator (legacy data is allowed
//! to collide), unparsable composite fields degrade to absent, and rows
//! with no canonical representation are skipped and tallied instead of
//! failing the batch.

use thiserror::Error;
use tracing::warn;

use uniplan_core::{ClassRecord, Semester, parse_class_time, parse_exam_date};

use crate::row::FlatRow;

/// Why an imported row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Both the title and code cells are empty.
    #[error("row is blank")]
    Blank,

    /// The semester cell is not one of the known labels.
    #[error("unknown semester label: {0:?}")]
    UnknownSemester(String),

    /// The course-code cell is not a positive integer.
    #[error("course code is not a positive integer: {0:?}")]
    BadCourseCode(String),

    /// The capacity cell is not a positive integer.
    #[error("capacity is not a positive integer: {0:?}")]
    BadCapacity(String),
}

/// Outcome of a lenient import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Successfully converted records, in row order.
    pub records: Vec<ClassRecord>,
    /// Skipped rows as `(row index, reason)` pairs.
    pub skipped: Vec<(usize, SkipReason)>,
}

/// Renders a record set to flat rows, in record order.
pub fn export_rows(records: &[ClassRecord]) -> Vec<FlatRow> {
    records.iter().map(FlatRow::from_record).collect()
}

/// Converts flat rows back to records.
///
/// Exporting a record set and re-importing the rows yields field-equal
/// records; arbitrary foreign rows are converted on a best-effort basis
/// and skipped (with a tally) when they cannot be represented.
pub fn import_rows(rows: &[FlatRow]) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, row) in rows.iter().enumerate() {
        match convert_row(row) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                warn!(row = index, %reason, "skipped row during import");
                report.skipped.push((index, reason));
            }
        }
    }
    report
}

fn convert_row(row: &FlatRow) -> Result<ClassRecord, SkipReason> {
    if row.is_blank() {
        return Err(SkipReason::Blank);
    }

    let semester = Semester::parse(&row.semester)
        .ok_or_else(|| SkipReason::UnknownSemester(row.semester.trim().to_string()))?;

    let course_code = match row.course_code.trim().parse::<u64>() {
        Ok(code) if code > 0 => code,
        _ => return Err(SkipReason::BadCourseCode(row.course_code.trim().to_string())),
    };

    let capacity = match row.capacity.trim().parse::<u32>() {
        Ok(capacity) if capacity > 0 => capacity,
        _ => return Err(SkipReason::BadCapacity(row.capacity.trim().to_string())),
    };

    // Composite fields degrade rather than fail: junk class-time text
    // means "no structured time", an empty exam cell means no exam.
    let class_time = parse_class_time(&row.class_time).ok();
    let exam_cell = row.exam_date.trim();
    let exam_date = (!exam_cell.is_empty()).then(|| parse_exam_date(exam_cell));

    Ok(ClassRecord {
        semester,
        course_title: row.course_title.trim().to_string(),
        course_code,
        main_instructor: row.main_instructor.trim().to_string(),
        capacity,
        class_time,
        exam_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniplan_core::{Candidate, validate};

    fn accepted(semester: Semester, title: &str, code: &str, class_time: &str) -> ClassRecord {
        let candidate = Candidate::new(semester, title, code, "دکتر احمدی", "40")
            .with_class_time(class_time)
            .with_exam_date("(08:00)1405/03/20");
        validate(&candidate, &[], None).unwrap()
    }

    #[test]
    fn export_then_import_is_field_equal() {
        let records = vec![
            accepted(Semester::First, "ریاضی ۱", "101", "شنبه از 08:00 تا 10:00"),
            accepted(Semester::First, "فیزیک ۱", "102", "یکشنبه از 10:00 تا 12:00"),
            accepted(Semester::Second, "ریاضی ۲", "101", "سه‌شنبه از 14:00 تا 16:00"),
        ];

        let rows = export_rows(&records);
        let report = import_rows(&rows);

        assert!(report.skipped.is_empty());
        assert_eq!(report.records, records);
    }

    #[test]
    fn roundtrip_preserves_absent_fields() {
        let record = ClassRecord::new(Semester::Fourth, "درس قدیمی", 9, "نامشخص", 5);
        let report = import_rows(&export_rows(std::slice::from_ref(&record)));
        assert_eq!(report.records, vec![record]);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = vec![
            FlatRow::from_record(&accepted(Semester::First, "ریاضی ۱", "101", "")),
            FlatRow::default(),
        ];
        let report = import_rows(&rows);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped, vec![(1, SkipReason::Blank)]);
    }

    #[test]
    fn unrepresentable_rows_are_skipped_with_reasons() {
        let good = FlatRow::from_record(&accepted(Semester::First, "ریاضی ۱", "101", ""));

        let mut bad_semester = good.clone();
        bad_semester.semester = "تابستان".into();
        let mut bad_code = good.clone();
        bad_code.course_code = "abc".into();
        let mut bad_capacity = good.clone();
        bad_capacity.capacity = "0".into();

        let report = import_rows(&[good, bad_semester, bad_code, bad_capacity]);
        assert_eq!(report.records.len(), 1);
        assert_eq!(
            report.skipped,
            vec![
                (1, SkipReason::UnknownSemester("تابستان".into())),
                (2, SkipReason::BadCourseCode("abc".into())),
                (3, SkipReason::BadCapacity("0".into())),
            ]
        );
    }

    #[test]
    fn junk_composite_fields_degrade_to_absent() {
        let mut row = FlatRow::from_record(&accepted(
            Semester::First,
            "ریاضی ۱",
            "101",
            "شنبه از 08:00 تا 10:00",
        ));
        row.class_time = "هر وقت شد".into();
        row.exam_date = "(بدون ساعت)؟؟".into();

        let report = import_rows(std::slice::from_ref(&row));
        let record = &report.records[0];
        assert!(record.class_time.is_none());
        // Malformed time degrades; the date text is carried for later checks.
        let exam = record.exam_date.as_ref().unwrap();
        assert_eq!(exam.time, None);
        assert_eq!(exam.date, "؟؟");
    }

    #[test]
    fn imported_legacy_rows_keep_their_raw_collisions() {
        // Two overlapping slots with the same code: the validator would
        // reject the second, the importer keeps both.
        let rows = vec![
            FlatRow {
                semester: "اول".into(),
                course_title: "الف".into(),
                course_code: "12345".into(),
                main_instructor: "x".into(),
                class_time: "شنبه از 08:00 تا 10:00".into(),
                exam_date: "1405/01/15".into(),
                capacity: "10".into(),
            },
            FlatRow {
                semester: "اول".into(),
                course_title: "ب".into(),
                course_code: "12345".into(),
                main_instructor: "y".into(),
                class_time: "شنبه از 09:00 تا 11:00".into(),
                exam_date: "1405/01/15".into(),
                capacity: "10".into(),
            },
        ];
        let report = import_rows(&rows);
        assert_eq!(report.records.len(), 2);
        assert!(report.skipped.is_empty());
    }
}
