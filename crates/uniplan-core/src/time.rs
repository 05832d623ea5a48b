//! Time types for class schedules.
//!
//! This module provides [`Weekday`] and [`TimeSlot`] for the weekly class
//! time (`<day> از <HH:MM> تا <HH:MM>`), [`ExamDate`] for the exam slot
//! (`(<HH:MM>)<date>` or a bare date), and the codec functions that map
//! between those types and their textual grammar:
//!
//! - [`parse_class_time`] / [`format_class_time`]
//! - [`parse_exam_date`] / [`format_exam_date`]
//!
//! Internal logic always works on the structured types; the grammar only
//! appears at the interchange boundary.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Regex for the class-time grammar: `<day> از <HH:MM> تا <HH:MM>`.
static CLASS_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<day>\S+) از (?P<start>\d{1,2}:\d{2}) تا (?P<end>\d{1,2}:\d{2})$")
        .expect("Invalid class-time regex")
});

/// The text did not match the expected grammar.
///
/// This is never a fatal condition: callers treat it as "no structured
/// time available": the record stays valid, is skipped by conflict
/// checking, and is tallied as unplaced by the grid builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("text does not match the class-time grammar")]
pub struct ParseFailure;

/// A teaching day of the university week.
///
/// The teaching week runs Saturday through Wednesday, matching the five
/// rows of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
}

impl Weekday {
    /// All teaching days, in grid-row order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Saturday,
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
    ];

    /// Returns the Persian name of this day.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saturday => "شنبه",
            Self::Sunday => "یکشنبه",
            Self::Monday => "دوشنبه",
            Self::Tuesday => "سه‌شنبه",
            Self::Wednesday => "چهارشنبه",
        }
    }

    /// Returns this day's position in the teaching week (0 = Saturday).
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Saturday => 0,
            Self::Sunday => 1,
            Self::Monday => 2,
            Self::Tuesday => 3,
            Self::Wednesday => 4,
        }
    }

    /// Parses a Persian day name.
    ///
    /// Matching is done on the folded form (see [`fold_persian`]), so
    /// legacy spellings with Arabic yeh/kaf or missing zero-width
    /// non-joiners still resolve.
    pub fn parse(text: &str) -> Option<Weekday> {
        let folded = fold_persian(text);
        Weekday::ALL
            .into_iter()
            .find(|day| fold_persian(day.label()) == folded)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Folds text for day-name comparison: Arabic yeh and kaf become their
/// Persian forms, zero-width non-joiners and spaces are dropped.
///
/// Legacy spreadsheets mix «ي»/«ی» and «ك»/«ک» freely and often lose the
/// joiner in «سه‌شنبه».
fn fold_persian(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| match c {
            'ي' => Some('ی'),
            'ك' => Some('ک'),
            '\u{200c}' | ' ' => None,
            c => Some(c),
        })
        .collect()
}

/// A weekly class time: one day of the week plus a start and end time.
///
/// The occupied range is the half-open interval `[start, end)`, so two
/// slots touching exactly at a boundary do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the teaching week.
    pub day: Weekday,
    /// Start of the class (inclusive).
    pub start: NaiveTime,
    /// End of the class (exclusive).
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// Checks whether two slots collide.
    ///
    /// Slots collide when they share a day and their half-open intervals
    /// intersect: `self.start < other.end && self.end > other.start`.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_class_time(self))
    }
}

/// An exam slot: an optional time of day plus a Solar Hijri date.
///
/// The date is kept textual (`"1405/01/15"`); its calendar validity is
/// the [`crate::calendar`] module's concern, not this codec's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDate {
    /// Time of the exam, when one was supplied.
    pub time: Option<NaiveTime>,
    /// The calendar date text, `YYYY/MM/DD`.
    pub date: String,
}

/// Parses a class-time string: `<day> از <HH:MM> تا <HH:MM>`.
///
/// The day must be one of the five teaching days and both times must be
/// valid `HH:MM` values. Any mismatch yields [`ParseFailure`]; whether
/// `start < end` holds is the validator's concern.
pub fn parse_class_time(text: &str) -> Result<TimeSlot, ParseFailure> {
    let caps = CLASS_TIME_REGEX.captures(text.trim()).ok_or(ParseFailure)?;
    let day = Weekday::parse(&caps["day"]).ok_or(ParseFailure)?;
    let start = parse_hhmm(&caps["start"]).ok_or(ParseFailure)?;
    let end = parse_hhmm(&caps["end"]).ok_or(ParseFailure)?;
    Ok(TimeSlot { day, start, end })
}

/// Formats a [`TimeSlot`] back into the class-time grammar.
///
/// Exact inverse of [`parse_class_time`].
pub fn format_class_time(slot: &TimeSlot) -> String {
    format!(
        "{} از {} تا {}",
        slot.day.label(),
        slot.start.format("%H:%M"),
        slot.end.format("%H:%M")
    )
}

/// Parses an exam-date string.
///
/// Grammar: `(<HH:MM>)<date>` when a leading parenthesized time is
/// present, otherwise the whole trimmed string is the date with no time
/// component (the legacy form). This parser never fails: a malformed
/// time degrades to `None` and the date text is carried as-is for the
/// calendar validator to judge.
pub fn parse_exam_date(text: &str) -> ExamDate {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('(') {
        if let Some((time_part, date_part)) = rest.split_once(')') {
            return ExamDate {
                time: parse_hhmm(time_part.trim()),
                date: date_part.trim().to_string(),
            };
        }
    }
    ExamDate {
        time: None,
        date: text.to_string(),
    }
}

/// Formats an [`ExamDate`] back into the exam-date grammar.
pub fn format_exam_date(exam: &ExamDate) -> String {
    match exam.time {
        Some(time) => format!("({}){}", time.format("%H:%M"), exam.date),
        None => exam.date.clone(),
    }
}

fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    mod weekday {
        use super::*;

        #[test]
        fn parse_canonical_names() {
            assert_eq!(Weekday::parse("شنبه"), Some(Weekday::Saturday));
            assert_eq!(Weekday::parse("یکشنبه"), Some(Weekday::Sunday));
            assert_eq!(Weekday::parse("دوشنبه"), Some(Weekday::Monday));
            assert_eq!(Weekday::parse("سه‌شنبه"), Some(Weekday::Tuesday));
            assert_eq!(Weekday::parse("چهارشنبه"), Some(Weekday::Wednesday));
        }

        #[test]
        fn parse_folds_legacy_spellings() {
            // Arabic yeh instead of Persian yeh
            assert_eq!(Weekday::parse("يکشنبه"), Some(Weekday::Sunday));
            // Missing zero-width non-joiner
            assert_eq!(Weekday::parse("سهشنبه"), Some(Weekday::Tuesday));
            // Space instead of the joiner
            assert_eq!(Weekday::parse("سه شنبه"), Some(Weekday::Tuesday));
        }

        #[test]
        fn parse_rejects_unknown_days() {
            assert_eq!(Weekday::parse("پنجشنبه"), None);
            assert_eq!(Weekday::parse("جمعه"), None);
            assert_eq!(Weekday::parse(""), None);
        }

        #[test]
        fn ordinal_matches_all_order() {
            for (index, day) in Weekday::ALL.into_iter().enumerate() {
                assert_eq!(day.ordinal(), index);
            }
        }
    }

    mod class_time {
        use super::*;

        #[test]
        fn parse_well_formed() {
            let slot = parse_class_time("شنبه از 08:00 تا 10:00").unwrap();
            assert_eq!(slot.day, Weekday::Saturday);
            assert_eq!(slot.start, hm(8, 0));
            assert_eq!(slot.end, hm(10, 0));
        }

        #[test]
        fn parse_tolerates_surrounding_whitespace() {
            let slot = parse_class_time("  دوشنبه از 14:30 تا 16:00 ").unwrap();
            assert_eq!(slot.day, Weekday::Monday);
            assert_eq!(slot.start, hm(14, 30));
        }

        #[test]
        fn parse_rejects_grammar_mismatches() {
            assert_eq!(parse_class_time(""), Err(ParseFailure));
            assert_eq!(parse_class_time("شنبه 08:00 تا 10:00"), Err(ParseFailure));
            assert_eq!(parse_class_time("شنبه از 08:00"), Err(ParseFailure));
            assert_eq!(parse_class_time("جمعه از 08:00 تا 10:00"), Err(ParseFailure));
            assert_eq!(parse_class_time("random text"), Err(ParseFailure));
        }

        #[test]
        fn parse_rejects_invalid_times() {
            assert_eq!(parse_class_time("شنبه از 24:00 تا 25:00"), Err(ParseFailure));
            assert_eq!(parse_class_time("شنبه از 08:75 تا 10:00"), Err(ParseFailure));
        }

        #[test]
        fn parse_accepts_reversed_times() {
            // Ordering is the validator's concern, not the codec's.
            let slot = parse_class_time("شنبه از 12:00 تا 10:00").unwrap();
            assert!(slot.start > slot.end);
        }

        #[test]
        fn format_is_inverse_of_parse() {
            let text = "سه‌شنبه از 08:00 تا 10:00";
            let slot = parse_class_time(text).unwrap();
            assert_eq!(format_class_time(&slot), text);
        }

        #[test]
        fn overlap_is_half_open() {
            let morning = TimeSlot::new(Weekday::Saturday, hm(8, 0), hm(10, 0));
            let touching = TimeSlot::new(Weekday::Saturday, hm(10, 0), hm(12, 0));
            let crossing = TimeSlot::new(Weekday::Saturday, hm(9, 0), hm(11, 0));
            let other_day = TimeSlot::new(Weekday::Sunday, hm(9, 0), hm(11, 0));

            assert!(!morning.overlaps(&touching));
            assert!(!touching.overlaps(&morning));
            assert!(morning.overlaps(&crossing));
            assert!(crossing.overlaps(&morning));
            assert!(!morning.overlaps(&other_day));
        }

        #[test]
        fn serde_roundtrip() {
            let slot = TimeSlot::new(Weekday::Wednesday, hm(10, 0), hm(12, 0));
            let json = serde_json::to_string(&slot).unwrap();
            let parsed: TimeSlot = serde_json::from_str(&json).unwrap();
            assert_eq!(slot, parsed);
        }
    }

    mod exam_date {
        use super::*;

        #[test]
        fn parse_with_time() {
            let exam = parse_exam_date("(08:30)1405/01/15");
            assert_eq!(exam.time, Some(hm(8, 30)));
            assert_eq!(exam.date, "1405/01/15");
        }

        #[test]
        fn parse_date_only_legacy_form() {
            let exam = parse_exam_date("1405/01/15");
            assert_eq!(exam.time, None);
            assert_eq!(exam.date, "1405/01/15");
        }

        #[test]
        fn malformed_time_degrades_to_none() {
            let exam = parse_exam_date("(8h30)1405/01/15");
            assert_eq!(exam.time, None);
            assert_eq!(exam.date, "1405/01/15");
        }

        #[test]
        fn unmatched_parenthesis_is_all_date() {
            let exam = parse_exam_date("(08:30 1405/01/15");
            assert_eq!(exam.time, None);
            assert_eq!(exam.date, "(08:30 1405/01/15");
        }

        #[test]
        fn format_is_inverse_of_parse() {
            for text in ["(08:30)1405/01/15", "1405/01/15"] {
                assert_eq!(format_exam_date(&parse_exam_date(text)), text);
            }
        }
    }
}
