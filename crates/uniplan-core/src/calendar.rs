//! Solar Hijri (Jalali) calendar validity.
//!
//! Exam dates are written as `YYYY/MM/DD` in the Solar Hijri calendar.
//! Months 1–6 have 31 days, months 7–11 have 30, and Esfand (month 12)
//! has 29 days, or 30 in a leap year. Leap years do not follow a fixed
//! table: they are determined by the break-year cycle of the arithmetic
//! Jalali calendar, which [`leap_remainder`] computes.

/// First year covered by [`BREAK_YEARS`].
pub const MIN_YEAR: i32 = -61;
/// Last year covered by [`BREAK_YEARS`].
pub const MAX_YEAR: i32 = 3177;

/// Years in which the 33-year leap sub-cycle restarts.
///
/// The arithmetic Jalali calendar is a sequence of 29/33/37-year
/// sub-cycles; these are the years where a new sub-cycle begins.
const BREAK_YEARS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Validates a `YYYY/MM/DD` Solar Hijri date string.
///
/// Fails when the text does not split on `/` into exactly three numeric
/// components, or when the (year, month, day) combination is not a real
/// calendar date.
pub fn is_valid_date(text: &str) -> bool {
    let parts: Vec<&str> = text.trim().split('/').collect();
    if parts.len() != 3 {
        return false;
    }
    let Ok(year) = parts[0].trim().parse::<i32>() else {
        return false;
    };
    let Ok(month) = parts[1].trim().parse::<u32>() else {
        return false;
    };
    let Ok(day) = parts[2].trim().parse::<u32>() else {
        return false;
    };
    is_valid_ymd(year, month, day)
}

/// Validates a (year, month, day) combination.
pub fn is_valid_ymd(year: i32, month: u32, day: u32) -> bool {
    match month_length(year, month) {
        Some(length) => day >= 1 && day <= length,
        None => false,
    }
}

/// Returns the number of days in the given month, or `None` when the
/// month is out of range or the year is outside the supported span.
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 => Some(if is_leap_year(year) { 30 } else { 29 }),
        _ => None,
    }
}

/// Whether the given Solar Hijri year is a leap year (Esfand has 30 days).
pub fn is_leap_year(year: i32) -> bool {
    leap_remainder(year) == Some(0)
}

/// Position of `year` within its four-year leap pattern.
///
/// Walks the break years to locate the sub-cycle containing `year`, then
/// reduces the offset within that sub-cycle modulo 33 and 4. A remainder
/// of 0 marks a leap year. Returns `None` outside the supported span.
fn leap_remainder(year: i32) -> Option<i32> {
    if year < BREAK_YEARS[0] || year >= BREAK_YEARS[BREAK_YEARS.len() - 1] {
        return None;
    }

    let mut cycle_start = BREAK_YEARS[0];
    let mut cycle_len = 0;
    for &break_year in &BREAK_YEARS[1..] {
        cycle_len = break_year - cycle_start;
        if year < break_year {
            break;
        }
        cycle_start = break_year;
    }

    let mut offset = year - cycle_start;
    // Years within the last few of a sub-cycle borrow their pattern from
    // the next full 33-year block.
    if cycle_len - offset < 6 {
        offset = offset - cycle_len + (cycle_len + 4) / 33 * 33;
    }

    let mut remainder = ((offset + 1) % 33 - 1) % 4;
    if remainder == -1 {
        remainder = 4;
    }
    Some(remainder)
}
