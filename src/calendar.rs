use crate::errors::CalendarError;
use crate::models::{CalendarMonth, CalendarSlot, WeightEntry};
use chrono::{Datelike, Duration, NaiveDate};

pub const COLUMNS: usize = 7;

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    let (next_year, next) = next_month(year, month);
    let following = first_of_month(next_year, next)?;
    Ok((following - first).num_days() as u32)
}

/// Lays out one month on a Sunday-first grid of `COLUMNS` columns.
///
/// Cells before the 1st are `CalendarSlot::Empty`; every day of the month
/// is flagged when some entry falls on it, whatever the time of day.
pub fn month_grid(
    year: i32,
    month: u32,
    entries: &[WeightEntry],
) -> Result<Vec<CalendarSlot>, CalendarError> {
    let first = first_of_month(year, month)?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(year, month)?;

    let mut slots = Vec::with_capacity(leading + days as usize);
    slots.extend(std::iter::repeat_n(CalendarSlot::Empty, leading));
    for offset in 0..days {
        let date = first + Duration::days(offset as i64);
        let has_entry = entries.iter().any(|entry| entry.date.date() == date);
        slots.push(CalendarSlot::Day { date, has_entry });
    }

    Ok(slots)
}

pub fn month_view(
    year: i32,
    month: u32,
    entries: &[WeightEntry],
) -> Result<CalendarMonth, CalendarError> {
    let slots = month_grid(year, month, entries)?;
    let title = first_of_month(year, month)?.format("%B %Y").to_string();
    Ok(CalendarMonth {
        year,
        month,
        title,
        slots,
    })
}
