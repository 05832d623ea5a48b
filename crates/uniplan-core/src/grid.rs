//! Weekly grid layout for class schedules.
//!
//! [`WeekGrid::build`] turns a flat record list into a day × hour table:
//! five day rows (Saturday through Wednesday), one column per hour of the
//! teaching window, and merged [`CellSpan`]s for multi-hour classes. The
//! output is a pure data structure; rendering it to a spreadsheet, HTML
//! table, or terminal grid is the consumer's job.
//!
//! Records whose times collide (possible for rows that bypassed the
//! validator, e.g. imported legacy data) are unioned into a single span:
//! the texts are appended with a visible divider and the span is flagged
//! `stacked`, so the outcome is deterministic regardless of input order.
//! Records that cannot be mapped to day/hour columns are counted in the
//! `unplaced` tally instead of aborting the build.

use std::ops::Range;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::record::ClassRecord;
use crate::time::{TimeSlot, Weekday};

/// Divider between stacked cell texts.
pub const CELL_DIVIDER: &str = "----------";

/// A merged run of body cells in one day row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSpan {
    /// First hour column covered (inclusive).
    pub start_col: usize,
    /// Past-the-end hour column (exclusive).
    pub end_col: usize,
    /// Cell text: `"<title>\n<instructor>"`, divider-joined when stacked.
    pub text: String,
    /// Whether this span holds more than one colliding record.
    pub stacked: bool,
}

impl CellSpan {
    /// Whether the span covers the given column.
    pub fn covers(&self, col: usize) -> bool {
        self.start_col <= col && col < self.end_col
    }
}

/// One day row of the grid, spans sorted by starting column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRow {
    /// The day this row represents.
    pub day: Weekday,
    /// Placed spans, disjoint and ordered.
    pub spans: Vec<CellSpan>,
}

/// A built weekly schedule grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    hour_start: u32,
    hour_end: u32,
    rows: Vec<DayRow>,
    unplaced: usize,
}

impl WeekGrid {
    /// The standard teaching window, 08:00 to 20:00.
    pub const DEFAULT_HOURS: Range<u32> = 8..20;

    /// Builds the grid for the given records over the `[start, end)` hour
    /// window.
    ///
    /// Callers filter the snapshot first (typically to one semester);
    /// this builder places whatever it is handed and never fails.
    pub fn build(records: &[ClassRecord], hours: Range<u32>) -> WeekGrid {
        let mut grid = WeekGrid {
            hour_start: hours.start,
            hour_end: hours.end.max(hours.start),
            rows: Weekday::ALL
                .into_iter()
                .map(|day| DayRow {
                    day,
                    spans: Vec::new(),
                })
                .collect(),
            unplaced: 0,
        };

        for record in records {
            let Some(slot) = &record.class_time else {
                grid.unplaced += 1;
                continue;
            };
            let Some((start_col, end_col)) = grid.column_range(slot) else {
                grid.unplaced += 1;
                continue;
            };
            grid.place(slot.day, start_col, end_col, cell_text(record));
        }

        if grid.unplaced > 0 {
            tracing::debug!(unplaced = grid.unplaced, "records left off the weekly grid");
        }
        grid
    }

    /// Number of hour columns.
    pub fn columns(&self) -> usize {
        (self.hour_end - self.hour_start) as usize
    }

    /// Header labels for the hour columns, e.g. `"08:00 - 09:00"`.
    pub fn hour_labels(&self) -> Vec<String> {
        (self.hour_start..self.hour_end)
            .map(|h| format!("{:02}:00 - {:02}:00", h, h + 1))
            .collect()
    }

    /// Header labels for the day rows, in row order.
    pub fn day_labels(&self) -> [&'static str; 5] {
        Weekday::ALL.map(|day| day.label())
    }

    /// All day rows, in Saturday-first order.
    pub fn rows(&self) -> &[DayRow] {
        &self.rows
    }

    /// The row for one day.
    pub fn row(&self, day: Weekday) -> &DayRow {
        &self.rows[day.ordinal()]
    }

    /// The span covering the given day and hour column, if any.
    pub fn span_at(&self, day: Weekday, col: usize) -> Option<&CellSpan> {
        self.row(day).spans.iter().find(|span| span.covers(col))
    }

    /// Number of records that could not be mapped to day/hour columns.
    pub fn unplaced(&self) -> usize {
        self.unplaced
    }

    /// Maps a slot to `[start_col, end_col)`, or `None` when the hours do
    /// not form a forward range inside the window.
    fn column_range(&self, slot: &TimeSlot) -> Option<(usize, usize)> {
        let start = slot.start.hour() as i64 - self.hour_start as i64;
        let end = slot.end.hour() as i64 - self.hour_start as i64;
        if start < 0 || end <= start || end > self.columns() as i64 {
            return None;
        }
        Some((start as usize, end as usize))
    }

    /// Places one cell text, unioning it with any spans it collides with.
    fn place(&mut self, day: Weekday, start_col: usize, end_col: usize, text: String) {
        let row = &mut self.rows[day.ordinal()];
        let (colliding, mut kept): (Vec<CellSpan>, Vec<CellSpan>) = row
            .spans
            .drain(..)
            .partition(|span| span.start_col < end_col && span.end_col > start_col);

        if colliding.is_empty() {
            kept.push(CellSpan {
                start_col,
                end_col,
                text,
                stacked: false,
            });
        } else {
            let mut merged = CellSpan {
                start_col,
                end_col,
                text: String::new(),
                stacked: true,
            };
            let mut texts = Vec::with_capacity(colliding.len() + 1);
            for span in colliding {
                merged.start_col = merged.start_col.min(span.start_col);
                merged.end_col = merged.end_col.max(span.end_col);
                texts.push(span.text);
            }
            texts.push(text);
            merged.text = texts.join(&format!("\n{CELL_DIVIDER}\n"));
            kept.push(merged);
        }

        kept.sort_by_key(|span| span.start_col);
        row.spans = kept;
    }
}

fn cell_text(record: &ClassRecord) -> String {
    format!("{}\n{}", record.course_title, record.main_instructor)
}
