//! Splitting a calendar month into Sunday-terminated week windows.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::AttendanceError;
use crate::model::week::{MonthCalendar, WeekWindow};

/// First and last day of `month`, or a validation failure for an impossible month.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AttendanceError> {
    let invalid = || AttendanceError::validation(format!("Invalid month {month}/{year}"));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first, last))
}

/// Splits the month into consecutive windows ending on Sunday.
///
/// The final window ends on the last day of the month whatever its weekday,
/// and a month starting on Sunday opens with a one-day window. Windows are
/// numbered from 1 and together cover every day of the month exactly once.
pub fn partition_month(year: i32, month: u32) -> Result<Vec<WeekWindow>, AttendanceError> {
    let (first, last) = month_bounds(year, month)?;

    let mut windows = Vec::with_capacity(6);
    let mut start = first;
    loop {
        let to_sunday = 6 - u64::from(start.weekday().num_days_from_monday());
        let end = start
            .checked_add_days(Days::new(to_sunday))
            .map_or(last, |sunday| sunday.min(last));

        windows.push(WeekWindow {
            week_number: windows.len() as u32 + 1,
            start,
            end,
        });

        match end.succ_opt() {
            Some(next) if end < last => start = next,
            _ => break,
        }
    }

    Ok(windows)
}

/// Looks up a week by its 1-based number.
pub fn find_window(
    year: i32,
    month: u32,
    week_number: i32,
) -> Result<WeekWindow, AttendanceError> {
    let windows = partition_month(year, month)?;
    let week_count = windows.len();

    usize::try_from(week_number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| windows.get(index).copied())
        .ok_or(AttendanceError::InvalidWeekNumber {
            week_number,
            week_count,
        })
}

/// The month's windows plus its day totals. `total_working_days` is the
/// weekday count a monthly submission is expected to declare.
pub fn month_calendar(year: i32, month: u32) -> Result<MonthCalendar, AttendanceError> {
    let weeks = partition_month(year, month)?;
    let total_days = weeks.iter().map(|w| w.days().count()).sum::<usize>() as u32;
    let total_working_days = weeks
        .iter()
        .map(|w| w.working_days().count())
        .sum::<usize>() as u32;

    Ok(MonthCalendar {
        year,
        month,
        total_days,
        total_working_days,
        weeks,
    })
}
